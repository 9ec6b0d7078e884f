// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property value types and their grammars as defined in RFC 5545
//! Section 3.3.
//!
//! Every conversion in this layer is a pure function from a raw value
//! string (plus the property's parameters where they matter) to a typed
//! value. Failures yield `None` or drop the offending list element; they
//! never panic and never abort the surrounding object.

pub mod datetime;
pub mod duration;
pub mod rrule;
pub mod text;

pub use self::datetime::{DateTime, DateTimeList, Period, TimeForm};
pub use self::duration::Duration;
pub use self::rrule::{Frequency, RecurrenceRule, Weekday, WeekdayNum};
