// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The top-level calendar component (RFC 5545 Section 3.4).

use crate::keyword::KW_GREGORIAN;
use crate::model::alarm::Alarm;
use crate::model::event::Event;
use crate::model::property::Extensions;
use crate::model::timezone::TimeZone;

/// A collection of calendaring and scheduling information.
#[derive(Debug, Clone, PartialEq)]
pub struct Calendar {
    /// Identifier for the product that created the object (RFC 5545
    /// Section 3.7.3). Required; a calendar block without one is dropped.
    pub prodid: String,

    /// Calendar scale (RFC 5545 Section 3.7.1).
    pub calscale: Option<String>,

    /// Object method, e.g. `REQUEST` (RFC 5545 Section 3.7.2).
    pub method: Option<String>,

    /// Event components in source order.
    pub events: Vec<Event>,

    /// Timezone components in source order.
    pub time_zones: Vec<TimeZone>,

    /// Top-level alarm components in source order.
    pub alarms: Vec<Alarm>,

    /// Unrecognized properties, preserved in source order.
    pub extensions: Extensions,
}

impl Calendar {
    /// The iCalendar specification version this crate reads and writes
    /// (RFC 5545 Section 3.7.4).
    pub const VERSION: &'static str = "2.0";

    /// Create an empty calendar with the default Gregorian scale.
    #[must_use]
    pub fn new(prodid: impl Into<String>) -> Self {
        Self {
            prodid: prodid.into(),
            calscale: Some(KW_GREGORIAN.to_owned()),
            method: None,
            events: Vec::new(),
            time_zones: Vec::new(),
            alarms: Vec::new(),
            extensions: Extensions::new(),
        }
    }
}
