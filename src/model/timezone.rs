// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The timezone component and its observances (RFC 5545 Section 3.6.5).

use crate::model::property::Extensions;
use crate::value::{DateTime, RecurrenceRule};

/// A grouping of component properties that defines a time zone.
///
/// At least one of `standard` and `daylight` is present; a timezone block
/// with neither is structurally invalid and is dropped during parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeZone {
    /// Text identifier for the time zone (RFC 5545 Section 3.8.3.1).
    pub tzid: String,

    /// The standard-time observance.
    pub standard: Option<Observance>,

    /// The daylight-saving-time observance.
    pub daylight: Option<Observance>,

    /// Unrecognized properties, preserved in source order.
    pub extensions: Extensions,
}

impl TimeZone {
    /// Create a timezone with the given identifier and no observances.
    ///
    /// A complete timezone needs at least one observance before encoding;
    /// the builder never produces one without.
    #[must_use]
    pub fn new(tzid: impl Into<String>) -> Self {
        Self {
            tzid: tzid.into(),
            standard: None,
            daylight: None,
            extensions: Extensions::new(),
        }
    }
}

/// A timezone's standard or daylight sub-definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Observance {
    /// Effective start of the observance (RFC 5545 Section 3.8.2.4).
    pub dtstart: DateTime,

    /// UTC offset in use when this observance begins, kept as text
    /// (RFC 5545 Section 3.8.3.4).
    pub tz_offset_to: String,

    /// UTC offset in use prior to this observance, kept as text
    /// (RFC 5545 Section 3.8.3.3).
    pub tz_offset_from: String,

    /// Rule for when the observance recurs (RFC 5545 Section 3.8.5.3).
    pub rrule: Option<RecurrenceRule>,

    /// Customary name of the observance (RFC 5545 Section 3.8.3.2).
    pub tz_name: Option<String>,

    /// Unrecognized properties, preserved in source order.
    pub extensions: Extensions,
}

impl Observance {
    /// Create an observance from its three required properties.
    #[must_use]
    pub fn new(
        dtstart: DateTime,
        tz_offset_to: impl Into<String>,
        tz_offset_from: impl Into<String>,
    ) -> Self {
        Self {
            dtstart,
            tz_offset_to: tz_offset_to.into(),
            tz_offset_from: tz_offset_from.into(),
            rrule: None,
            tz_name: None,
            extensions: Extensions::new(),
        }
    }
}
