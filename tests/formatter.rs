// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Tests for the formatter: exact output text, folding behavior and
//! property ordering.

use jiff::civil;
use vical::{
    Alarm, Calendar, DateTime, Duration, Event, FormatOptions, Observance, TimeZone, format,
};

fn utc(h: i8, m: i8) -> DateTime {
    DateTime::utc(civil::DateTime::new(2025, 1, 10, h, m, 0, 0).unwrap())
}

#[test]
fn formats_minimal_calendar_exactly() {
    let calendar = Calendar::new("-//Example Corp.//Cal Client 1.0//EN");
    let output = format(&calendar).unwrap();
    assert_eq!(
        output,
        "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example Corp.//Cal Client 1.0//EN\r\n\
CALSCALE:GREGORIAN\r\n\
END:VCALENDAR\r\n"
    );
}

#[test]
fn formats_event_with_duration_end() {
    let mut calendar = Calendar::new("-//Test//Test//EN");
    let mut event = Event::new(utc(12, 0), "1@example.com");
    event.set_duration(Duration::hours(1));
    calendar.events.push(event);

    let output = format(&calendar).unwrap();
    assert!(output.contains("BEGIN:VEVENT\r\n"));
    assert!(output.contains("DTSTAMP:20250110T120000Z\r\n"));
    assert!(output.contains("UID:1@example.com\r\n"));
    assert!(output.contains("DURATION:P0DT1H0M0S\r\n"));
    assert!(!output.contains("DTEND"));
    assert!(output.contains("END:VEVENT\r\n"));
}

#[test]
fn absent_fields_emit_nothing() {
    let mut calendar = Calendar::new("-//Test//Test//EN");
    calendar.calscale = None;
    calendar.events.push(Event::new(utc(12, 0), "1"));

    let output = format(&calendar).unwrap();
    assert!(!output.contains("CALSCALE"));
    assert!(!output.contains("SUMMARY"));
    assert!(!output.contains("DESCRIPTION"));
    assert!(!output.contains("RRULE"));
}

#[test]
fn date_only_start_gets_value_date_parameter() {
    let mut calendar = Calendar::new("-//Test//Test//EN");
    let mut event = Event::new(utc(12, 0), "1");
    event.dtstart = Some(DateTime::date_only(civil::Date::new(2024, 1, 1).unwrap()));
    calendar.events.push(event);

    let output = format(&calendar).unwrap();
    assert!(output.contains("DTSTART;VALUE=DATE:20240101\r\n"));
}

#[test]
fn zoned_start_gets_tzid_parameter() {
    let mut calendar = Calendar::new("-//Test//Test//EN");
    let mut event = Event::new(utc(12, 0), "1");
    event.dtstart = Some(DateTime::zoned(
        civil::DateTime::new(2025, 6, 15, 13, 30, 0, 0).unwrap(),
        "America/New_York",
    ));
    calendar.events.push(event);

    let output = format(&calendar).unwrap();
    assert!(output.contains("DTSTART;TZID=America/New_York:20250615T133000\r\n"));
}

#[test]
fn escapes_text_values() {
    let mut calendar = Calendar::new("-//Test//Test//EN");
    let mut event = Event::new(utc(12, 0), "1");
    event.summary = Some("Comma, semi; back\\ and\nnewline".into());
    calendar.events.push(event);

    let output = format(&calendar).unwrap();
    assert!(output.contains("SUMMARY:Comma\\, semi\\; back\\\\ and\\nnewline\r\n"));
}

#[test]
fn folds_long_lines_at_75_characters() {
    let mut calendar = Calendar::new("-//Test//Test//EN");
    let mut event = Event::new(utc(12, 0), "1");
    event.description = Some("x".repeat(200));
    calendar.events.push(event);

    let output = format(&calendar).unwrap();
    for line in output.split("\r\n") {
        // Continuation lines carry one leading space over the limit.
        assert!(line.chars().count() <= 76, "line too long: {line:?}");
    }
    assert!(output.contains("\r\n x"));
}

#[test]
fn folding_can_be_disabled() {
    let mut calendar = Calendar::new("-//Test//Test//EN");
    let mut event = Event::new(utc(12, 0), "1");
    event.description = Some("y".repeat(200));
    calendar.events.push(event);

    let options = FormatOptions::default().folding(None);
    let mut buffer = Vec::new();
    options.write(&calendar, &mut buffer).unwrap();
    let output = String::from_utf8(buffer).unwrap();
    assert!(output.contains(&"y".repeat(200)));
    assert!(!output.contains("\r\n y"));
}

#[test]
fn multi_valued_attachments_emit_one_line_each() {
    use vical::{Attachment, Parameter};

    let mut calendar = Calendar::new("-//Test//Test//EN");
    let mut event = Event::new(utc(12, 0), "1");
    event.attachments.push(Attachment::new("http://example.com/a.pdf"));
    let mut second = Attachment::new("http://example.com/b.png");
    second.parameters.push(Parameter::new("FMTTYPE", "image/png"));
    event.attachments.push(second);
    calendar.events.push(event);

    let output = format(&calendar).unwrap();
    assert!(output.contains("ATTACH:http://example.com/a.pdf\r\n"));
    assert!(output.contains("ATTACH;FMTTYPE=image/png:http://example.com/b.png\r\n"));
}

#[test]
fn time_zone_emits_observances_in_fixed_order() {
    let mut calendar = Calendar::new("-//Test//Test//EN");
    let mut time_zone = TimeZone::new("America/New_York");
    let mut daylight = Observance::new(
        DateTime::floating(civil::DateTime::new(2007, 3, 11, 2, 0, 0, 0).unwrap()),
        "-0400",
        "-0500",
    );
    daylight.tz_name = Some("EDT".into());
    time_zone.daylight = Some(daylight);
    calendar.time_zones.push(time_zone);

    let output = format(&calendar).unwrap();
    let expected = "BEGIN:VTIMEZONE\r\n\
TZID:America/New_York\r\n\
BEGIN:DAYLIGHT\r\n\
TZOFFSETFROM:-0500\r\n\
DTSTART:20070311T020000\r\n\
TZNAME:EDT\r\n\
TZOFFSETTO:-0400\r\n\
END:DAYLIGHT\r\n\
END:VTIMEZONE\r\n";
    assert!(output.contains(expected), "output was: {output}");
}

#[test]
fn alarm_emits_action_and_trigger_first() {
    let mut calendar = Calendar::new("-//Test//Test//EN");
    calendar.alarms.push(Alarm::display(utc(8, 0), "wake up"));

    let output = format(&calendar).unwrap();
    let expected = "BEGIN:VALARM\r\n\
ACTION:DISPLAY\r\n\
TRIGGER:20250110T080000Z\r\n\
DESCRIPTION:wake up\r\n\
END:VALARM\r\n";
    assert!(output.contains(expected), "output was: {output}");
}
