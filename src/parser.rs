// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Public parse entry points.
//!
//! Parsing is total: every entry point returns a (possibly empty) list.
//! A malformed line, a broken block or a component missing a required
//! property drops that one piece, never the batch; what was dropped is
//! logged at debug level.

use crate::keyword::{KW_VALARM, KW_VCALENDAR, KW_VEVENT, KW_VTIMEZONE};
use crate::model::alarm::Alarm;
use crate::model::builder::{build_alarm, build_calendar, build_event, build_time_zone};
use crate::model::calendar::Calendar;
use crate::model::event::Event;
use crate::model::timezone::TimeZone;
use crate::syntax::lexer::tokenize;
use crate::syntax::scanner::scan_content_lines;
use crate::syntax::tree_builder::{Block, extract_blocks};

/// Parse every top-level `VCALENDAR` in the input.
///
/// # Example
///
/// ```
/// let src = "BEGIN:VCALENDAR\r\n\
/// PRODID:-//Example Corp.//Cal Client 1.0//EN\r\n\
/// BEGIN:VEVENT\r\n\
/// UID:123@example.com\r\n\
/// DTSTAMP:20250110T120000Z\r\n\
/// SUMMARY:Team Meeting\r\n\
/// END:VEVENT\r\n\
/// END:VCALENDAR\r\n";
///
/// let calendars = vical::parse(src);
/// assert_eq!(calendars.len(), 1);
/// assert_eq!(calendars[0].events.len(), 1);
/// ```
#[must_use]
pub fn parse(src: &str) -> Vec<Calendar> {
    extract(src, KW_VCALENDAR)
        .iter()
        .filter_map(build_calendar)
        .collect()
}

/// Parse every top-level `VEVENT` in the input.
///
/// Events wrapped in a `VCALENDAR` are reached through [`parse`]; this
/// entry point serves bare event fragments.
#[must_use]
pub fn parse_events(src: &str) -> Vec<Event> {
    extract(src, KW_VEVENT).iter().filter_map(build_event).collect()
}

/// Parse every top-level `VALARM` in the input.
#[must_use]
pub fn parse_alarms(src: &str) -> Vec<Alarm> {
    extract(src, KW_VALARM).iter().filter_map(build_alarm).collect()
}

/// Parse every top-level `VTIMEZONE` in the input.
#[must_use]
pub fn parse_time_zones(src: &str) -> Vec<TimeZone> {
    extract(src, KW_VTIMEZONE)
        .iter()
        .filter_map(build_time_zone)
        .collect()
}

/// Run the syntax pipeline and log whatever it had to drop.
fn extract(src: &str, target: &str) -> Vec<Block> {
    let scanned = scan_content_lines(tokenize(src));
    for error in &scanned.errors {
        tracing::debug!(%error, "discarded content line");
    }

    let extracted = extract_blocks(&scanned.lines, target);
    for error in &extracted.errors {
        tracing::debug!(%error, "discarded block structure");
    }

    extracted.blocks
}
