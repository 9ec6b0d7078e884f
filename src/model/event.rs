// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The event component (RFC 5545 Section 3.6.1).

use crate::model::alarm::Alarm;
use crate::model::property::{Attachment, Extensions};
use crate::value::{DateTime, DateTimeList, Duration, RecurrenceRule};

/// A grouping of component properties that describes an event.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Date-time the calendar information was created or last revised
    /// (RFC 5545 Section 3.8.7.2).
    pub dtstamp: DateTime,

    /// Persistent, globally unique identifier for the component
    /// (RFC 5545 Section 3.8.4.7).
    pub uid: String,

    /// Access classification (RFC 5545 Section 3.8.1.3).
    pub classification: Option<String>,

    /// Date-time the component was created in the calendar store
    /// (RFC 5545 Section 3.8.7.1).
    pub created: Option<DateTime>,

    /// Complete description of the component, longer than `summary`
    /// (RFC 5545 Section 3.8.1.5).
    pub description: Option<String>,

    /// When the component begins (RFC 5545 Section 3.8.2.4).
    pub dtstart: Option<DateTime>,

    /// Date-time the component was last revised (RFC 5545
    /// Section 3.8.7.3).
    pub last_modified: Option<DateTime>,

    /// Intended venue for the activity (RFC 5545 Section 3.8.1.7).
    pub location: Option<String>,

    /// Organizer of the event (RFC 5545 Section 3.8.4.3).
    pub organizer: Option<String>,

    /// Relative priority (RFC 5545 Section 3.8.1.9).
    pub priority: Option<i64>,

    /// Revision sequence number (RFC 5545 Section 3.8.7.4).
    pub sequence: Option<i64>,

    /// Overall status or confirmation (RFC 5545 Section 3.8.1.11).
    pub status: Option<String>,

    /// Short summary or subject (RFC 5545 Section 3.8.1.12).
    pub summary: Option<String>,

    /// Whether the event is transparent to busy time searches
    /// (RFC 5545 Section 3.8.2.7).
    pub transparency: Option<String>,

    /// URL associated with the component (RFC 5545 Section 3.8.4.6).
    pub url: Option<String>,

    /// When the event ends: an absolute end time or a duration from the
    /// start. The two are mutually exclusive by construction.
    pub end: Option<EventEnd>,

    /// Identifies a specific instance of a recurring component
    /// (RFC 5545 Section 3.8.4.4).
    pub recurrence_id: Option<DateTime>,

    /// Rule for repeating the event (RFC 5545 Section 3.8.5.3).
    pub rrule: Option<RecurrenceRule>,

    /// Additional recurrence date-times (RFC 5545 Section 3.8.5.2).
    /// Repeated `RDATE` lines of the same kind accumulate here.
    pub rdates: Option<DateTimeList>,

    /// Recurrence exception date-times (RFC 5545 Section 3.8.5.1).
    pub exdates: Option<DateTimeList>,

    /// Attached documents, one per `ATTACH` line (RFC 5545
    /// Section 3.8.1.1).
    pub attachments: Vec<Attachment>,

    /// Nested alarm components.
    pub alarms: Vec<Alarm>,

    /// Unrecognized properties, preserved in source order.
    pub extensions: Extensions,
}

/// The two mutually exclusive ways to specify when an event ends.
#[derive(Debug, Clone, PartialEq)]
pub enum EventEnd {
    /// Absolute end date-time (`DTEND`, RFC 5545 Section 3.8.2.2).
    DtEnd(DateTime),

    /// Positive duration from the start (`DURATION`, RFC 5545
    /// Section 3.8.2.5).
    Duration(Duration),
}

impl Event {
    /// Create an event with the two required properties and nothing else.
    #[must_use]
    pub fn new(dtstamp: DateTime, uid: impl Into<String>) -> Self {
        Self {
            dtstamp,
            uid: uid.into(),
            classification: None,
            created: None,
            description: None,
            dtstart: None,
            last_modified: None,
            location: None,
            organizer: None,
            priority: None,
            sequence: None,
            status: None,
            summary: None,
            transparency: None,
            url: None,
            end: None,
            recurrence_id: None,
            rrule: None,
            rdates: None,
            exdates: None,
            attachments: Vec::new(),
            alarms: Vec::new(),
            extensions: Extensions::new(),
        }
    }

    /// Set an absolute end time, clearing any duration.
    pub fn set_dtend(&mut self, dtend: DateTime) {
        self.end = Some(EventEnd::DtEnd(dtend));
    }

    /// Set a duration, clearing any absolute end time.
    pub fn set_duration(&mut self, duration: Duration) {
        self.end = Some(EventEnd::Duration(duration));
    }

    /// The absolute end time, when one is set.
    #[must_use]
    pub fn dtend(&self) -> Option<&DateTime> {
        match &self.end {
            Some(EventEnd::DtEnd(dtend)) => Some(dtend),
            _ => None,
        }
    }

    /// The duration, when one is set.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        match self.end {
            Some(EventEnd::Duration(duration)) => Some(duration),
            _ => None,
        }
    }

    /// Whether the event is an all-day event (its start is date-only).
    #[must_use]
    pub fn is_all_day(&self) -> bool {
        self.dtstart.as_ref().is_some_and(DateTime::is_date_only)
    }
}
