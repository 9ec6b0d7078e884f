// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rule value type as defined in RFC 5545 Section 3.3.10.
//!
//! This module parses and encodes a rule's fields; it does not expand a
//! rule into concrete occurrence instances.
//!
//! Parsing is deliberately tolerant: the raw value splits into `KEY=VALUE`
//! pairs, a valid `FREQ` pair is the only hard requirement, list elements
//! that fail to parse are dropped one by one, and unknown keys are ignored.

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::keyword::{
    KW_RRULE_BYDAY, KW_RRULE_BYHOUR, KW_RRULE_BYMINUTE, KW_RRULE_BYMONTH, KW_RRULE_BYMONTHDAY,
    KW_RRULE_BYSECOND, KW_RRULE_BYSETPOS, KW_RRULE_BYWEEKNO, KW_RRULE_BYYEARDAY, KW_RRULE_COUNT,
    KW_RRULE_FREQ, KW_RRULE_INTERVAL, KW_RRULE_UNTIL, KW_RRULE_WKST,
};
use crate::value::datetime::DateTime;

/// Recurrence rule.
#[derive(Debug, Clone, PartialEq)]
pub struct RecurrenceRule {
    /// Frequency of recurrence
    pub frequency: Frequency,
    /// Interval between recurrences
    pub interval: Option<u32>,
    /// Until date for recurrence
    pub until: Option<DateTime>,
    /// Number of occurrences
    pub count: Option<u32>,
    /// Second specifier
    pub by_second: Vec<u8>,
    /// Minute specifier
    pub by_minute: Vec<u8>,
    /// Hour specifier
    pub by_hour: Vec<u8>,
    /// Day of week specifier, with optional ordinal
    pub by_day: Vec<WeekdayNum>,
    /// Day of month specifier
    pub by_month_day: Vec<i8>,
    /// Day of year specifier
    pub by_year_day: Vec<i16>,
    /// Week number specifier
    pub by_week_no: Vec<i8>,
    /// Month specifier
    pub by_month: Vec<u8>,
    /// Position in the recurrence set
    pub by_set_pos: Vec<i16>,
    /// Start day of the work week
    pub week_start: Option<Weekday>,
}

impl RecurrenceRule {
    /// Create a rule with the given frequency and no other fields set.
    #[must_use]
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            interval: None,
            until: None,
            count: None,
            by_second: Vec::new(),
            by_minute: Vec::new(),
            by_hour: Vec::new(),
            by_day: Vec::new(),
            by_month_day: Vec::new(),
            by_year_day: Vec::new(),
            by_week_no: Vec::new(),
            by_month: Vec::new(),
            by_set_pos: Vec::new(),
            week_start: None,
        }
    }

    /// Parse a recurrence rule value string such as
    /// `FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,WE`.
    ///
    /// Returns `None` when no valid `FREQ` pair is present, regardless of
    /// any other valid pairs. Within list values, invalid elements are
    /// dropped rather than failing the list; when a key repeats, its last
    /// occurrence wins. Both `UNTIL` and `COUNT` are accepted if present;
    /// this layer does not enforce their mutual exclusion.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let pairs: Vec<(&str, &str)> = raw
            .split(';')
            .filter_map(|segment| segment.split_once('='))
            .collect();

        let frequency = pairs
            .iter()
            .rev()
            .find(|(key, _)| key.eq_ignore_ascii_case(KW_RRULE_FREQ))
            .and_then(|(_, value)| Frequency::from_str(value.to_ascii_uppercase().as_str()).ok())?;

        let mut rule = Self::new(frequency);
        for (key, value) in pairs {
            match key.to_ascii_uppercase().as_str() {
                KW_RRULE_FREQ => {}
                KW_RRULE_INTERVAL => rule.interval = parse_int(value),
                KW_RRULE_UNTIL => rule.until = DateTime::parse(value, &[]),
                KW_RRULE_COUNT => rule.count = parse_int(value),
                KW_RRULE_BYSECOND => rule.by_second = parse_list(value, |n: u8| n <= 60),
                KW_RRULE_BYMINUTE => rule.by_minute = parse_list(value, |n: u8| n <= 59),
                KW_RRULE_BYHOUR => rule.by_hour = parse_list(value, |n: u8| n <= 23),
                KW_RRULE_BYDAY => {
                    rule.by_day = value.split(',').filter_map(WeekdayNum::parse).collect();
                }
                KW_RRULE_BYMONTHDAY => {
                    rule.by_month_day = parse_list(value, |n: i8| (1..=31).contains(&n.abs()));
                }
                KW_RRULE_BYYEARDAY => {
                    rule.by_year_day = parse_list(value, |n: i16| (1..=366).contains(&n.abs()));
                }
                KW_RRULE_BYWEEKNO => {
                    rule.by_week_no = parse_list(value, |n: i8| (1..=53).contains(&n.abs()));
                }
                KW_RRULE_BYMONTH => rule.by_month = parse_list(value, |n: u8| (1..=12).contains(&n)),
                KW_RRULE_BYSETPOS => {
                    rule.by_set_pos = parse_list(value, |n: i16| (1..=366).contains(&n.abs()));
                }
                KW_RRULE_WKST => {
                    rule.week_start = Weekday::from_str(value.to_ascii_uppercase().as_str()).ok();
                }
                _ => {} // unknown keys are ignored, not stored
            }
        }

        Some(rule)
    }
}

impl Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{KW_RRULE_FREQ}={}", self.frequency)?;
        if let Some(interval) = self.interval {
            write!(f, ";{KW_RRULE_INTERVAL}={interval}")?;
        }
        if let Some(until) = &self.until {
            write!(f, ";{KW_RRULE_UNTIL}={until}")?;
        }
        if let Some(count) = self.count {
            write!(f, ";{KW_RRULE_COUNT}={count}")?;
        }
        write_list(f, KW_RRULE_BYSECOND, &self.by_second)?;
        write_list(f, KW_RRULE_BYMINUTE, &self.by_minute)?;
        write_list(f, KW_RRULE_BYHOUR, &self.by_hour)?;
        write_list(f, KW_RRULE_BYDAY, &self.by_day)?;
        write_list(f, KW_RRULE_BYMONTHDAY, &self.by_month_day)?;
        write_list(f, KW_RRULE_BYYEARDAY, &self.by_year_day)?;
        write_list(f, KW_RRULE_BYWEEKNO, &self.by_week_no)?;
        write_list(f, KW_RRULE_BYMONTH, &self.by_month)?;
        write_list(f, KW_RRULE_BYSETPOS, &self.by_set_pos)?;
        if let Some(week_start) = self.week_start {
            write!(f, ";{KW_RRULE_WKST}={week_start}")?;
        }
        Ok(())
    }
}

/// Recurrence frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "UPPERCASE")]
#[expect(missing_docs)]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Day of the week, written with its two-letter token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[expect(missing_docs)]
pub enum Weekday {
    #[strum(serialize = "SU")]
    Sunday,
    #[strum(serialize = "MO")]
    Monday,
    #[strum(serialize = "TU")]
    Tuesday,
    #[strum(serialize = "WE")]
    Wednesday,
    #[strum(serialize = "TH")]
    Thursday,
    #[strum(serialize = "FR")]
    Friday,
    #[strum(serialize = "SA")]
    Saturday,
}

/// Day of the week with an optional ordinal, e.g. `2MO` or `-1SU`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdayNum {
    /// Occurrence within the month or year, negative counting backwards
    pub ordinal: Option<i8>,
    /// Day of the week
    pub weekday: Weekday,
}

impl WeekdayNum {
    /// A weekday without an ordinal.
    #[must_use]
    pub const fn every(weekday: Weekday) -> Self {
        Self {
            ordinal: None,
            weekday,
        }
    }

    /// The nth occurrence of a weekday; negative counts from the end.
    #[must_use]
    pub const fn nth(ordinal: i8, weekday: Weekday) -> Self {
        Self {
            ordinal: Some(ordinal),
            weekday,
        }
    }

    /// Parse a `[[+|-]n]DD` element.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.len() < 2 {
            return None;
        }
        let (ordinal, day) = raw.split_at_checked(raw.len() - 2)?;
        let weekday = Weekday::from_str(day.to_ascii_uppercase().as_str()).ok()?;
        let ordinal = if ordinal.is_empty() {
            None
        } else {
            Some(parse_int(ordinal).filter(|n: &i8| (1..=53).contains(&n.abs()))?)
        };
        Some(Self { ordinal, weekday })
    }
}

impl Display for WeekdayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ordinal) = self.ordinal {
            write!(f, "{ordinal}")?;
        }
        write!(f, "{}", self.weekday)
    }
}

/// Parse a decimal integer, tolerating a leading `+`.
fn parse_int<T: lexical::FromLexical>(value: &str) -> Option<T> {
    let value = value.strip_prefix('+').unwrap_or(value);
    lexical::parse(value).ok()
}

/// Parse a comma-separated number list, dropping elements that fail to
/// parse or fall outside the accepted range.
fn parse_list<T: lexical::FromLexical>(value: &str, accept: impl Fn(T) -> bool) -> Vec<T> {
    value
        .split(',')
        .filter_map(parse_int)
        .filter(|&n| accept(n))
        .collect()
}

/// Write a `;KEY=a,b,c` segment, nothing when the list is empty.
fn write_list<T: Display>(f: &mut fmt::Formatter<'_>, key: &str, list: &[T]) -> fmt::Result {
    if list.is_empty() {
        return Ok(());
    }
    write!(f, ";{key}=")?;
    for (i, item) in list.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::datetime::TimeForm;

    #[test]
    fn parses_rule_with_interval_and_count() {
        let rule = RecurrenceRule::parse("FREQ=DAILY;INTERVAL=2;COUNT=5").unwrap();
        assert_eq!(rule.frequency, Frequency::Daily);
        assert_eq!(rule.interval, Some(2));
        assert_eq!(rule.count, Some(5));
        assert_eq!(rule.until, None);
        assert!(rule.by_second.is_empty());
        assert!(rule.by_day.is_empty());
        assert_eq!(rule.week_start, None);
    }

    #[test]
    fn rejects_rule_without_freq() {
        assert!(RecurrenceRule::parse("INTERVAL=2;COUNT=5").is_none());
        assert!(RecurrenceRule::parse("").is_none());
        assert!(RecurrenceRule::parse("FREQ=SOMETIMES").is_none());
        assert!(RecurrenceRule::parse("FREQ").is_none());
    }

    #[test]
    fn parses_until_as_date_time() {
        let rule = RecurrenceRule::parse("FREQ=WEEKLY;UNTIL=19971224T000000Z").unwrap();
        let until = rule.until.unwrap();
        assert_eq!(until.form, TimeForm::Utc);
        assert_eq!(until.to_string(), "19971224T000000Z");
    }

    #[test]
    fn parses_until_as_date() {
        let rule = RecurrenceRule::parse("FREQ=WEEKLY;UNTIL=19971224").unwrap();
        assert!(rule.until.unwrap().is_date_only());
    }

    #[test]
    fn parses_byday_with_ordinals() {
        let rule = RecurrenceRule::parse("FREQ=MONTHLY;BYDAY=1FR,-1SU,MO").unwrap();
        assert_eq!(
            rule.by_day,
            [
                WeekdayNum::nth(1, Weekday::Friday),
                WeekdayNum::nth(-1, Weekday::Sunday),
                WeekdayNum::every(Weekday::Monday),
            ]
        );
    }

    #[test]
    fn drops_invalid_list_elements() {
        let rule = RecurrenceRule::parse("FREQ=DAILY;BYHOUR=9,25,banana,17").unwrap();
        assert_eq!(rule.by_hour, [9, 17]);

        let rule = RecurrenceRule::parse("FREQ=MONTHLY;BYMONTHDAY=1,-1,32,0").unwrap();
        assert_eq!(rule.by_month_day, [1, -1]);

        let rule = RecurrenceRule::parse("FREQ=MONTHLY;BYDAY=XX,2MO").unwrap();
        assert_eq!(rule.by_day, [WeekdayNum::nth(2, Weekday::Monday)]);
    }

    #[test]
    fn ignores_unknown_keys_and_bare_segments() {
        let rule = RecurrenceRule::parse("FREQ=DAILY;X-UNKNOWN=1;NOEQUALS;COUNT=3").unwrap();
        assert_eq!(rule.frequency, Frequency::Daily);
        assert_eq!(rule.count, Some(3));
    }

    #[test]
    fn accepts_until_and_count_together() {
        let rule =
            RecurrenceRule::parse("FREQ=DAILY;COUNT=5;UNTIL=19971224T000000Z").unwrap();
        assert_eq!(rule.count, Some(5));
        assert!(rule.until.is_some());
    }

    #[test]
    fn last_occurrence_of_a_key_wins() {
        let rule = RecurrenceRule::parse("FREQ=DAILY;COUNT=5;COUNT=9").unwrap();
        assert_eq!(rule.count, Some(9));
    }

    #[test]
    fn parses_week_start() {
        let rule = RecurrenceRule::parse("FREQ=WEEKLY;WKST=SU").unwrap();
        assert_eq!(rule.week_start, Some(Weekday::Sunday));
    }

    #[test]
    fn encodes_fields_in_canonical_order() {
        let mut rule = RecurrenceRule::new(Frequency::Weekly);
        rule.interval = Some(2);
        rule.by_day = vec![
            WeekdayNum::every(Weekday::Monday),
            WeekdayNum::every(Weekday::Wednesday),
        ];
        rule.week_start = Some(Weekday::Sunday);
        assert_eq!(rule.to_string(), "FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,WE;WKST=SU");
    }

    #[test]
    fn parse_of_encoded_rule_is_identity() {
        let mut rule = RecurrenceRule::new(Frequency::Monthly);
        rule.interval = Some(3);
        rule.count = Some(10);
        rule.by_day = vec![WeekdayNum::nth(-1, Weekday::Friday)];
        rule.by_month = vec![1, 6, 12];
        rule.by_set_pos = vec![-1];

        let encoded = rule.to_string();
        assert_eq!(RecurrenceRule::parse(&encoded), Some(rule), "encoded: {encoded}");
    }
}
