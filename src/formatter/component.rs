// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Component emission: `BEGIN:<type>`, one line per present property,
//! children recursively, `END:<type>`.

use std::io::{self, Write};

use crate::formatter::Formatter;
use crate::formatter::property::content_line;
use crate::keyword::{
    KW_ACTION, KW_ATTACH, KW_BEGIN, KW_CALSCALE, KW_CLASS, KW_CREATED, KW_DAYLIGHT,
    KW_DESCRIPTION, KW_DTEND, KW_DTSTAMP, KW_DTSTART, KW_DURATION, KW_END, KW_EXDATE,
    KW_LAST_MODIFIED, KW_LOCATION, KW_METHOD, KW_ORGANIZER, KW_PRIORITY, KW_PRODID, KW_RDATE,
    KW_RECURRENCE_ID, KW_REPEAT, KW_RRULE, KW_SEQUENCE, KW_STANDARD, KW_STATUS, KW_SUMMARY,
    KW_TRANSP, KW_TRIGGER, KW_TZID, KW_TZNAME, KW_TZOFFSETFROM, KW_TZOFFSETTO, KW_UID, KW_URL,
    KW_VALARM, KW_VCALENDAR, KW_VERSION, KW_VEVENT, KW_VTIMEZONE,
};
use crate::model::alarm::Alarm;
use crate::model::calendar::Calendar;
use crate::model::event::{Event, EventEnd};
use crate::model::property::{Extensions, PropertyValue};
use crate::model::timezone::{Observance, TimeZone};
use crate::value::DateTime;

pub(crate) fn write_calendar<W: Write>(
    f: &mut Formatter<W>,
    calendar: &Calendar,
) -> io::Result<()> {
    write_begin(f, KW_VCALENDAR)?;
    write_text(f, KW_VERSION, Some(Calendar::VERSION))?;
    write_text(f, KW_PRODID, Some(&calendar.prodid))?;
    write_text(f, KW_CALSCALE, calendar.calscale.as_deref())?;
    write_text(f, KW_METHOD, calendar.method.as_deref())?;
    write_extensions(f, &calendar.extensions)?;

    for event in &calendar.events {
        write_event(f, event)?;
    }
    for time_zone in &calendar.time_zones {
        write_time_zone(f, time_zone)?;
    }
    for alarm in &calendar.alarms {
        write_alarm(f, alarm)?;
    }

    write_end(f, KW_VCALENDAR)
}

pub(crate) fn write_event<W: Write>(f: &mut Formatter<W>, event: &Event) -> io::Result<()> {
    write_begin(f, KW_VEVENT)?;
    write_date_time(f, KW_DTSTAMP, Some(&event.dtstamp))?;
    write_text(f, KW_UID, Some(&event.uid))?;
    write_text(f, KW_CLASS, event.classification.as_deref())?;
    write_date_time(f, KW_CREATED, event.created.as_ref())?;
    write_text(f, KW_DESCRIPTION, event.description.as_deref())?;
    write_date_time(f, KW_DTSTART, event.dtstart.as_ref())?;
    write_date_time(f, KW_LAST_MODIFIED, event.last_modified.as_ref())?;
    write_text(f, KW_LOCATION, event.location.as_deref())?;
    write_text(f, KW_ORGANIZER, event.organizer.as_deref())?;
    write_integer(f, KW_PRIORITY, event.priority)?;
    write_integer(f, KW_SEQUENCE, event.sequence)?;
    write_text(f, KW_STATUS, event.status.as_deref())?;
    write_text(f, KW_SUMMARY, event.summary.as_deref())?;
    write_text(f, KW_TRANSP, event.transparency.as_deref())?;
    write_text(f, KW_URL, event.url.as_deref())?;
    match &event.end {
        Some(EventEnd::DtEnd(dtend)) => write_date_time(f, KW_DTEND, Some(dtend))?,
        Some(EventEnd::Duration(duration)) => {
            write_line(f, KW_DURATION, &PropertyValue::Duration(*duration))?;
        }
        None => {}
    }
    write_date_time(f, KW_RECURRENCE_ID, event.recurrence_id.as_ref())?;
    if let Some(rrule) = &event.rrule {
        write_line(f, KW_RRULE, &PropertyValue::RecurrenceRule(rrule.clone()))?;
    }
    if let Some(rdates) = &event.rdates {
        write_line(f, KW_RDATE, &PropertyValue::DateTimeList(rdates.clone()))?;
    }
    if let Some(exdates) = &event.exdates {
        write_line(f, KW_EXDATE, &PropertyValue::DateTimeList(exdates.clone()))?;
    }
    for attachment in &event.attachments {
        write_line(f, KW_ATTACH, &PropertyValue::Attachment(attachment.clone()))?;
    }
    write_extensions(f, &event.extensions)?;

    for alarm in &event.alarms {
        write_alarm(f, alarm)?;
    }

    write_end(f, KW_VEVENT)
}

pub(crate) fn write_alarm<W: Write>(f: &mut Formatter<W>, alarm: &Alarm) -> io::Result<()> {
    write_begin(f, KW_VALARM)?;
    write_text(f, KW_ACTION, Some(&alarm.action))?;
    write_date_time(f, KW_TRIGGER, Some(&alarm.trigger))?;
    write_text(f, KW_DESCRIPTION, alarm.description.as_deref())?;
    write_text(f, KW_SUMMARY, alarm.summary.as_deref())?;
    if let Some(duration) = alarm.duration {
        write_line(f, KW_DURATION, &PropertyValue::Duration(duration))?;
    }
    write_integer(f, KW_REPEAT, alarm.repeat)?;
    write_text(f, KW_ATTACH, alarm.attach.as_deref())?;
    write_extensions(f, &alarm.extensions)?;
    write_end(f, KW_VALARM)
}

pub(crate) fn write_time_zone<W: Write>(
    f: &mut Formatter<W>,
    time_zone: &TimeZone,
) -> io::Result<()> {
    write_begin(f, KW_VTIMEZONE)?;
    write_text(f, KW_TZID, Some(&time_zone.tzid))?;
    write_extensions(f, &time_zone.extensions)?;
    if let Some(standard) = &time_zone.standard {
        write_observance(f, KW_STANDARD, standard)?;
    }
    if let Some(daylight) = &time_zone.daylight {
        write_observance(f, KW_DAYLIGHT, daylight)?;
    }
    write_end(f, KW_VTIMEZONE)
}

fn write_observance<W: Write>(
    f: &mut Formatter<W>,
    name: &str,
    observance: &Observance,
) -> io::Result<()> {
    write_begin(f, name)?;
    write_text(f, KW_TZOFFSETFROM, Some(&observance.tz_offset_from))?;
    if let Some(rrule) = &observance.rrule {
        write_line(f, KW_RRULE, &PropertyValue::RecurrenceRule(rrule.clone()))?;
    }
    write_date_time(f, KW_DTSTART, Some(&observance.dtstart))?;
    write_text(f, KW_TZNAME, observance.tz_name.as_deref())?;
    write_text(f, KW_TZOFFSETTO, Some(&observance.tz_offset_to))?;
    write_extensions(f, &observance.extensions)?;
    write_end(f, name)
}

fn write_begin<W: Write>(f: &mut Formatter<W>, name: &str) -> io::Result<()> {
    f.write_content_line(&format!("{KW_BEGIN}:{name}"))
}

fn write_end<W: Write>(f: &mut Formatter<W>, name: &str) -> io::Result<()> {
    f.write_content_line(&format!("{KW_END}:{name}"))
}

fn write_line<W: Write>(f: &mut Formatter<W>, key: &str, value: &PropertyValue) -> io::Result<()> {
    f.write_content_line(&content_line(key, value))
}

/// One text line, nothing when the field is absent.
fn write_text<W: Write>(f: &mut Formatter<W>, key: &str, value: Option<&str>) -> io::Result<()> {
    match value {
        Some(value) => write_line(f, key, &PropertyValue::Text(value.to_owned())),
        None => Ok(()),
    }
}

fn write_date_time<W: Write>(
    f: &mut Formatter<W>,
    key: &str,
    value: Option<&DateTime>,
) -> io::Result<()> {
    match value {
        Some(value) => write_line(f, key, &PropertyValue::DateTime(value.clone())),
        None => Ok(()),
    }
}

fn write_integer<W: Write>(f: &mut Formatter<W>, key: &str, value: Option<i64>) -> io::Result<()> {
    match value {
        Some(value) => write_line(f, key, &PropertyValue::Integer(value)),
        None => Ok(()),
    }
}

/// Extension properties re-encode under their literal names, in insertion
/// order.
fn write_extensions<W: Write>(f: &mut Formatter<W>, extensions: &Extensions) -> io::Result<()> {
    for (name, value) in extensions.iter() {
        write_line(f, name, value)?;
    }
    Ok(())
}
