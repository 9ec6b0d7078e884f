// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Wire tokens defined in iCalendar RFC 5545.
//!
//! The parsing and encoding core treats these as opaque string constants;
//! everything that maps a symbolic identifier to its literal token lives
//! here.

#![allow(missing_docs)]

pub const KW_BEGIN: &str = "BEGIN";
pub const KW_END: &str = "END";

// Section 3.4 / 3.6 - Components
pub const KW_VCALENDAR: &str = "VCALENDAR";
pub const KW_VEVENT: &str = "VEVENT";
pub const KW_VALARM: &str = "VALARM";
pub const KW_VTIMEZONE: &str = "VTIMEZONE";
pub const KW_STANDARD: &str = "STANDARD";
pub const KW_DAYLIGHT: &str = "DAYLIGHT";

// Section 3.2 - Property Parameters
pub const KW_TZID: &str = "TZID";
pub const KW_VALUE: &str = "VALUE";

// Section 3.3 - Property Value Data Types
pub const KW_DATE: &str = "DATE";
pub const KW_DATETIME: &str = "DATE-TIME";
pub const KW_PERIOD: &str = "PERIOD";

// Section 3.7 - Calendar Properties
pub const KW_VERSION: &str = "VERSION";
pub const KW_PRODID: &str = "PRODID";
pub const KW_CALSCALE: &str = "CALSCALE";
pub const KW_METHOD: &str = "METHOD";
pub const KW_GREGORIAN: &str = "GREGORIAN";

// Section 3.8.1 - Descriptive Component Properties
pub const KW_ATTACH: &str = "ATTACH";
pub const KW_CLASS: &str = "CLASS";
pub const KW_DESCRIPTION: &str = "DESCRIPTION";
pub const KW_LOCATION: &str = "LOCATION";
pub const KW_PRIORITY: &str = "PRIORITY";
pub const KW_STATUS: &str = "STATUS";
pub const KW_SUMMARY: &str = "SUMMARY";

// Section 3.8.2 - Date and Time Component Properties
pub const KW_DTSTART: &str = "DTSTART";
pub const KW_DTEND: &str = "DTEND";
pub const KW_DURATION: &str = "DURATION";
pub const KW_TRANSP: &str = "TRANSP";

// Section 3.8.3 - Time Zone Component Properties
pub const KW_TZNAME: &str = "TZNAME";
pub const KW_TZOFFSETFROM: &str = "TZOFFSETFROM";
pub const KW_TZOFFSETTO: &str = "TZOFFSETTO";

// Section 3.8.4 - Relationship Component Properties
pub const KW_ORGANIZER: &str = "ORGANIZER";
pub const KW_RECURRENCE_ID: &str = "RECURRENCE-ID";
pub const KW_URL: &str = "URL";
pub const KW_UID: &str = "UID";

// Section 3.8.5 - Recurrence Component Properties
pub const KW_EXDATE: &str = "EXDATE";
pub const KW_RDATE: &str = "RDATE";
pub const KW_RRULE: &str = "RRULE";

// Section 3.8.6 - Alarm Component Properties
pub const KW_ACTION: &str = "ACTION";
pub const KW_REPEAT: &str = "REPEAT";
pub const KW_TRIGGER: &str = "TRIGGER";

// Section 3.8.7 - Change Management Component Properties
pub const KW_CREATED: &str = "CREATED";
pub const KW_DTSTAMP: &str = "DTSTAMP";
pub const KW_LAST_MODIFIED: &str = "LAST-MODIFIED";
pub const KW_SEQUENCE: &str = "SEQUENCE";

// Section 3.3.10 - Recurrence Rule parts
pub const KW_RRULE_FREQ: &str = "FREQ";
pub const KW_RRULE_INTERVAL: &str = "INTERVAL";
pub const KW_RRULE_UNTIL: &str = "UNTIL";
pub const KW_RRULE_COUNT: &str = "COUNT";
pub const KW_RRULE_BYSECOND: &str = "BYSECOND";
pub const KW_RRULE_BYMINUTE: &str = "BYMINUTE";
pub const KW_RRULE_BYHOUR: &str = "BYHOUR";
pub const KW_RRULE_BYDAY: &str = "BYDAY";
pub const KW_RRULE_BYMONTHDAY: &str = "BYMONTHDAY";
pub const KW_RRULE_BYYEARDAY: &str = "BYYEARDAY";
pub const KW_RRULE_BYWEEKNO: &str = "BYWEEKNO";
pub const KW_RRULE_BYMONTH: &str = "BYMONTH";
pub const KW_RRULE_BYSETPOS: &str = "BYSETPOS";
pub const KW_RRULE_WKST: &str = "WKST";
