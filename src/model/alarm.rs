// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The alarm component (RFC 5545 Section 3.6.6).

use crate::model::property::Extensions;
use crate::value::{DateTime, Duration};

/// A grouping of component properties that define an alarm.
#[derive(Debug, Clone, PartialEq)]
pub struct Alarm {
    /// Action to invoke when the alarm triggers (RFC 5545
    /// Section 3.8.6.1).
    pub action: String,

    /// When the alarm triggers (RFC 5545 Section 3.8.6.3).
    pub trigger: DateTime,

    /// Complete description (RFC 5545 Section 3.8.1.5).
    pub description: Option<String>,

    /// Short summary or subject (RFC 5545 Section 3.8.1.12).
    pub summary: Option<String>,

    /// Delay between repetitions (RFC 5545 Section 3.3.6).
    pub duration: Option<Duration>,

    /// Number of times the alarm repeats after the initial trigger
    /// (RFC 5545 Section 3.8.6.2).
    pub repeat: Option<i64>,

    /// Associated document reference (RFC 5545 Section 3.8.1.1).
    pub attach: Option<String>,

    /// Unrecognized properties, preserved in source order.
    pub extensions: Extensions,
}

impl Alarm {
    /// Create an alarm with the two required properties and nothing else.
    #[must_use]
    pub fn new(action: impl Into<String>, trigger: DateTime) -> Self {
        Self {
            action: action.into(),
            trigger,
            description: None,
            summary: None,
            duration: None,
            repeat: None,
            attach: None,
            extensions: Extensions::new(),
        }
    }

    /// An `AUDIO` alarm.
    #[must_use]
    pub fn audio(trigger: DateTime) -> Self {
        Self::new("AUDIO", trigger)
    }

    /// A `DISPLAY` alarm with the description it is required to carry.
    #[must_use]
    pub fn display(trigger: DateTime, description: impl Into<String>) -> Self {
        let mut alarm = Self::new("DISPLAY", trigger);
        alarm.description = Some(description.into());
        alarm
    }

    /// An `EMAIL` alarm with the description and summary it is required
    /// to carry.
    #[must_use]
    pub fn email(
        trigger: DateTime,
        description: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        let mut alarm = Self::new("EMAIL", trigger);
        alarm.description = Some(description.into());
        alarm.summary = Some(summary.into());
        alarm
    }
}
