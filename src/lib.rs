// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parse and serialize iCalendar (RFC 5545) text.
//!
//! The crate covers the structural engine: un-folding and folding of
//! physical lines, extraction of nested `BEGIN`/`END` block trees, the
//! per-property value grammars (parameters, durations, recurrence rules,
//! dates and date-times with timezone resolution), a typed component
//! model, and lossless re-serialization with line folding. Recurrence
//! rules are parsed and encoded, never expanded into occurrences.
//!
//! Parsing is total: malformed lines, broken blocks and components with
//! missing required properties are dropped individually and logged, never
//! raised.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(clippy::similar_names, clippy::single_match_else, clippy::match_bool)]

pub mod formatter;
pub mod keyword;
pub mod model;
mod parser;
pub mod syntax;
pub mod value;

pub use crate::formatter::{FormatOptions, Formatter, format};
pub use crate::model::{
    Alarm, Attachment, Calendar, Event, EventEnd, Extensions, Observance, PropertyValue, TimeZone,
};
pub use crate::parser::{parse, parse_alarms, parse_events, parse_time_zones};
pub use crate::syntax::{Block, ContentLine, Parameter};
pub use crate::value::{
    DateTime, DateTimeList, Duration, Frequency, Period, RecurrenceRule, TimeForm, Weekday,
    WeekdayNum,
};
