// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Builders that turn extracted blocks into typed components.
//!
//! One builder per component kind, selected by the block's type token.
//! Each builder walks its block's direct properties once, dispatching by
//! property name; children are recursed for sub-components. A property
//! name the builder does not recognize lands in the component's extension
//! bag with its value kept as text.
//!
//! Failure policy follows the error taxonomy: a missing required property
//! drops the one component (siblings still build), a value that fails to
//! parse leaves its field absent, and both are logged rather than raised.

use crate::keyword::{
    KW_ACTION, KW_ATTACH, KW_CALSCALE, KW_CLASS, KW_CREATED, KW_DAYLIGHT, KW_DESCRIPTION,
    KW_DTEND, KW_DTSTAMP, KW_DTSTART, KW_DURATION, KW_EXDATE, KW_LAST_MODIFIED, KW_LOCATION,
    KW_METHOD, KW_ORGANIZER, KW_PRIORITY, KW_PRODID, KW_RDATE, KW_RECURRENCE_ID, KW_REPEAT,
    KW_RRULE, KW_SEQUENCE, KW_STANDARD, KW_STATUS, KW_SUMMARY, KW_TRANSP, KW_TRIGGER, KW_TZID,
    KW_TZNAME, KW_TZOFFSETFROM, KW_TZOFFSETTO, KW_UID, KW_URL, KW_VALARM, KW_VERSION, KW_VEVENT,
    KW_VTIMEZONE,
};
use crate::model::alarm::Alarm;
use crate::model::calendar::Calendar;
use crate::model::event::Event;
use crate::model::property::{Attachment, Extensions, PropertyValue};
use crate::model::timezone::{Observance, TimeZone};
use crate::syntax::scanner::ContentLine;
use crate::syntax::tree_builder::Block;
use crate::value::text::unescape;
use crate::value::{DateTime, DateTimeList, Duration, RecurrenceRule};

/// Build a calendar from a `VCALENDAR` block.
///
/// Requires a `PRODID` property; events, timezones and alarms are built
/// from the block's children, each dropped independently on structural
/// failure.
pub(crate) fn build_calendar(block: &Block) -> Option<Calendar> {
    let mut prodid = None;
    let mut calscale = None;
    let mut method = None;
    let mut extensions = Extensions::new();

    for line in &block.properties {
        match line.name.to_ascii_uppercase().as_str() {
            KW_PRODID => prodid = Some(unescape(&line.value)),
            KW_CALSCALE => calscale = Some(unescape(&line.value)),
            KW_METHOD => method = Some(unescape(&line.value)),
            KW_VERSION => {} // fixed at 2.0, not carried on the model
            _ => set_extension(&mut extensions, line),
        }
    }

    let Some(prodid) = prodid else {
        tracing::debug!("dropping calendar without PRODID");
        return None;
    };

    let mut calendar = Calendar::new(prodid);
    if calscale.is_some() {
        calendar.calscale = calscale;
    }
    calendar.method = method;
    calendar.extensions = extensions;

    for child in &block.children {
        match child.name.to_ascii_uppercase().as_str() {
            KW_VEVENT => calendar.events.extend(build_event(child)),
            KW_VTIMEZONE => calendar.time_zones.extend(build_time_zone(child)),
            KW_VALARM => calendar.alarms.extend(build_alarm(child)),
            _ => tracing::warn!(name = %child.name, "ignoring unsupported component type"),
        }
    }

    Some(calendar)
}

/// Build an event from a `VEVENT` block.
///
/// Requires `DTSTAMP` and `UID`; neither is defaulted.
pub(crate) fn build_event(block: &Block) -> Option<Event> {
    let dtstamp = block
        .property(KW_DTSTAMP)
        .and_then(|l| DateTime::parse(&l.value, &l.parameters));
    let uid = block.property(KW_UID).map(|l| unescape(&l.value));
    let (Some(dtstamp), Some(uid)) = (dtstamp, uid) else {
        tracing::debug!("dropping event without DTSTAMP or UID");
        return None;
    };

    let mut event = Event::new(dtstamp, uid);
    for line in &block.properties {
        match line.name.to_ascii_uppercase().as_str() {
            KW_DTSTAMP | KW_UID => {} // consumed above
            KW_CLASS => event.classification = Some(unescape(&line.value)),
            KW_CREATED => event.created = DateTime::parse(&line.value, &line.parameters),
            KW_DESCRIPTION => event.description = Some(unescape(&line.value)),
            KW_DTSTART => event.dtstart = DateTime::parse(&line.value, &line.parameters),
            KW_LAST_MODIFIED => {
                event.last_modified = DateTime::parse(&line.value, &line.parameters);
            }
            KW_LOCATION => event.location = Some(unescape(&line.value)),
            KW_ORGANIZER => event.organizer = Some(unescape(&line.value)),
            KW_PRIORITY => event.priority = parse_integer(&line.value),
            KW_SEQUENCE => event.sequence = parse_integer(&line.value),
            KW_STATUS => event.status = Some(unescape(&line.value)),
            KW_SUMMARY => event.summary = Some(unescape(&line.value)),
            KW_TRANSP => event.transparency = Some(unescape(&line.value)),
            KW_URL => event.url = Some(unescape(&line.value)),
            KW_DTEND => {
                if let Some(dtend) = DateTime::parse(&line.value, &line.parameters) {
                    event.set_dtend(dtend);
                }
            }
            KW_DURATION => {
                if let Some(duration) = Duration::parse(&line.value) {
                    event.set_duration(duration);
                }
            }
            KW_RECURRENCE_ID => {
                event.recurrence_id = DateTime::parse(&line.value, &line.parameters);
            }
            KW_RRULE => event.rrule = RecurrenceRule::parse(&line.value),
            KW_RDATE => merge_date_list(
                &mut event.rdates,
                DateTimeList::parse(&line.value, &line.parameters),
            ),
            KW_EXDATE => merge_date_list(
                &mut event.exdates,
                DateTimeList::parse(&line.value, &line.parameters),
            ),
            KW_ATTACH => event.attachments.push(Attachment {
                parameters: line.parameters.clone(),
                value: line.value.clone(),
            }),
            _ => set_extension(&mut event.extensions, line),
        }
    }

    for child in &block.children {
        match child.name.to_ascii_uppercase().as_str() {
            KW_VALARM => event.alarms.extend(build_alarm(child)),
            _ => tracing::warn!(name = %child.name, "ignoring unsupported component type"),
        }
    }

    Some(event)
}

/// Build an alarm from a `VALARM` block.
///
/// Requires `ACTION` and a `TRIGGER` that parses as a date-time.
pub(crate) fn build_alarm(block: &Block) -> Option<Alarm> {
    let action = block.property(KW_ACTION).map(|l| unescape(&l.value));
    let trigger = block
        .property(KW_TRIGGER)
        .and_then(|l| DateTime::parse(&l.value, &l.parameters));
    let (Some(action), Some(trigger)) = (action, trigger) else {
        tracing::debug!("dropping alarm without ACTION or a date-time TRIGGER");
        return None;
    };

    let mut alarm = Alarm::new(action, trigger);
    for line in &block.properties {
        match line.name.to_ascii_uppercase().as_str() {
            KW_ACTION | KW_TRIGGER => {} // consumed above
            KW_DESCRIPTION => alarm.description = Some(unescape(&line.value)),
            KW_SUMMARY => alarm.summary = Some(unescape(&line.value)),
            KW_DURATION => alarm.duration = Duration::parse(&line.value),
            KW_REPEAT => alarm.repeat = parse_integer(&line.value),
            KW_ATTACH => alarm.attach = Some(unescape(&line.value)),
            _ => set_extension(&mut alarm.extensions, line),
        }
    }

    Some(alarm)
}

/// Build a timezone from a `VTIMEZONE` block.
///
/// Requires `TZID`. One of the standard and daylight observances must
/// occur; only the first block of each kind is considered.
pub(crate) fn build_time_zone(block: &Block) -> Option<TimeZone> {
    let mut tzid = None;
    let mut extensions = Extensions::new();

    for line in &block.properties {
        match line.name.to_ascii_uppercase().as_str() {
            KW_TZID => tzid = Some(unescape(&line.value)),
            _ => set_extension(&mut extensions, line),
        }
    }

    let Some(tzid) = tzid else {
        tracing::debug!("dropping timezone without TZID");
        return None;
    };

    let mut time_zone = TimeZone::new(tzid);
    time_zone.extensions = extensions;
    time_zone.standard = block
        .children_named(KW_STANDARD)
        .next()
        .and_then(build_observance);
    time_zone.daylight = block
        .children_named(KW_DAYLIGHT)
        .next()
        .and_then(build_observance);

    if time_zone.standard.is_none() && time_zone.daylight.is_none() {
        tracing::debug!(tzid = %time_zone.tzid, "dropping timezone without any observance");
        return None;
    }

    Some(time_zone)
}

/// Build an observance from a `STANDARD` or `DAYLIGHT` block.
///
/// Requires `DTSTART` and both UTC offsets.
fn build_observance(block: &Block) -> Option<Observance> {
    let mut dtstart = None;
    let mut tz_offset_to = None;
    let mut tz_offset_from = None;
    let mut rrule = None;
    let mut tz_name = None;
    let mut extensions = Extensions::new();

    for line in &block.properties {
        match line.name.to_ascii_uppercase().as_str() {
            KW_DTSTART => dtstart = DateTime::parse(&line.value, &line.parameters),
            KW_TZOFFSETTO => tz_offset_to = Some(unescape(&line.value)),
            KW_TZOFFSETFROM => tz_offset_from = Some(unescape(&line.value)),
            KW_RRULE => rrule = RecurrenceRule::parse(&line.value),
            KW_TZNAME => tz_name = Some(unescape(&line.value)),
            _ => set_extension(&mut extensions, line),
        }
    }

    let (Some(dtstart), Some(tz_offset_to), Some(tz_offset_from)) =
        (dtstart, tz_offset_to, tz_offset_from)
    else {
        tracing::debug!("dropping observance without DTSTART and both offsets");
        return None;
    };

    let mut observance = Observance::new(dtstart, tz_offset_to, tz_offset_from);
    observance.rrule = rrule;
    observance.tz_name = tz_name;
    observance.extensions = extensions;
    Some(observance)
}

/// Record an unrecognized property under its literal name, value as text.
fn set_extension(extensions: &mut Extensions, line: &ContentLine) {
    extensions.set(
        line.name.clone(),
        PropertyValue::Text(unescape(&line.value)),
    );
}

/// Parse a decimal integer property value, tolerating a leading `+`.
fn parse_integer(value: &str) -> Option<i64> {
    let value = value.trim();
    let value = value.strip_prefix('+').unwrap_or(value);
    lexical::parse(value).ok()
}

/// Accumulate a repeated list-valued property into its one list field.
///
/// Lists merge when they agree on type and timezone; a later line of a
/// different kind is dropped.
fn merge_date_list(slot: &mut Option<DateTimeList>, parsed: Option<DateTimeList>) {
    let Some(parsed) = parsed else { return };
    match slot {
        None => *slot = Some(parsed),
        Some(existing) => {
            if !existing.merge(parsed) {
                tracing::debug!("dropping repeated date list of mismatched kind");
            }
        }
    }
}
