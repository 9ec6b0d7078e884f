// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Date, date-time and period value types as defined in RFC 5545
//! Sections 3.3.4, 3.3.5 and 3.3.9.
//!
//! Values are stored as civil (wall-clock) instants via [`jiff::civil`],
//! together with how the instant is anchored in time: date-only, floating
//! local time, UTC, or a named timezone. The anchor is resolved from the
//! property's `VALUE=` and `TZID=` parameters and a trailing `Z` suffix.

use std::fmt::{self, Display};

use jiff::civil;

use crate::keyword::{KW_DATE, KW_PERIOD, KW_TZID, KW_VALUE};
use crate::syntax::scanner::Parameter;

/// A single date or date-time property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTime {
    /// The civil (wall-clock) instant; midnight for date-only values.
    pub instant: civil::DateTime,

    /// How the instant is anchored in time.
    pub form: TimeForm,
}

/// Timezone resolution of a date or date-time value.
///
/// A date-only value carries no timezone by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeForm {
    /// Date-only value (`VALUE=DATE`).
    Date,

    /// Floating local time with no timezone reference.
    Floating,

    /// UTC time, written with a trailing `Z`.
    Utc,

    /// Time anchored to a named timezone (`TZID=` parameter).
    Zoned(String),
}

impl DateTime {
    /// Create a date-only value.
    #[must_use]
    pub fn date_only(date: civil::Date) -> Self {
        Self {
            instant: civil::DateTime::from_parts(date, civil::Time::midnight()),
            form: TimeForm::Date,
        }
    }

    /// Create a UTC date-time value.
    #[must_use]
    pub const fn utc(instant: civil::DateTime) -> Self {
        Self {
            instant,
            form: TimeForm::Utc,
        }
    }

    /// Create a floating local date-time value.
    #[must_use]
    pub const fn floating(instant: civil::DateTime) -> Self {
        Self {
            instant,
            form: TimeForm::Floating,
        }
    }

    /// Create a date-time value anchored to a named timezone.
    #[must_use]
    pub fn zoned(instant: civil::DateTime, tzid: impl Into<String>) -> Self {
        Self {
            instant,
            form: TimeForm::Zoned(tzid.into()),
        }
    }

    /// Whether this is a date-only value.
    #[must_use]
    pub const fn is_date_only(&self) -> bool {
        matches!(self.form, TimeForm::Date)
    }

    /// The timezone identifier, when the value is anchored to one.
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        match &self.form {
            TimeForm::Zoned(tzid) => Some(tzid),
            _ => None,
        }
    }

    /// Parse a date or date-time property value.
    ///
    /// The value's type is resolved from an explicit `VALUE=` parameter
    /// (`DATE`, else date-time) and the timezone from a `TZID=` parameter;
    /// a trailing `Z` marks UTC when no `TZID=` is given. Exactly one of
    /// three fixed shapes is accepted: an 8-digit date, a 15-character
    /// local date-time, or a 15-character date-time followed by `Z`. A
    /// date-time property whose value has the 8-digit date shape degrades
    /// to a date-only value. `VALUE=DATE` never carries a timezone.
    #[must_use]
    pub fn parse(raw: &str, parameters: &[Parameter]) -> Option<Self> {
        let kind = parameter_value(parameters, KW_VALUE);
        let tzid = parameter_value(parameters, KW_TZID).filter(|t| !t.is_empty());

        if kind.is_some_and(|k| k.eq_ignore_ascii_case(KW_DATE)) {
            return parse_date(raw).map(Self::date_only);
        }

        if let Some((instant, utc)) = parse_date_time(raw) {
            let form = match tzid {
                Some(tzid) => TimeForm::Zoned(tzid.to_owned()),
                None if utc => TimeForm::Utc,
                None => TimeForm::Floating,
            };
            return Some(Self { instant, form });
        }

        // A bare 8-digit value on a date-time property degrades to a date.
        parse_date(raw).map(Self::date_only)
    }
}

impl Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.form {
            TimeForm::Date => write_date(f, self.instant.date()),
            TimeForm::Floating | TimeForm::Zoned(_) => write_date_time(f, self.instant),
            TimeForm::Utc => {
                write_date_time(f, self.instant)?;
                write!(f, "Z")
            }
        }
    }
}

/// An explicit start/end range (RFC 5545 Section 3.3.9).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    /// Start of the range.
    pub start: civil::DateTime,

    /// End of the range.
    pub end: civil::DateTime,
}

impl Period {
    /// Parse a `start/end` period element, both sides date-times.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let (start, end) = raw.split_once('/')?;
        let (start, _) = parse_date_time(start)?;
        let (end, _) = parse_date_time(end)?;
        Some(Self { start, end })
    }
}

/// A list-valued date, date-time or period property value.
///
/// Mirrors the single-value forms: all elements of one list share a type
/// and timezone resolution. A date-time or period list without a `TZID=`
/// parameter is in UTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateTimeList {
    /// Date-only values (`VALUE=DATE`).
    Dates(Vec<civil::Date>),

    /// Date-time values.
    DateTimes {
        /// The civil instants in list order.
        times: Vec<civil::DateTime>,
        /// Named timezone, UTC when absent.
        tzid: Option<String>,
    },

    /// Explicit start/end ranges (`VALUE=PERIOD`).
    Periods {
        /// The ranges in list order.
        periods: Vec<Period>,
        /// Named timezone, UTC when absent.
        tzid: Option<String>,
    },
}

impl DateTimeList {
    /// Parse a comma-separated list value.
    ///
    /// Each element is parsed independently and invalid or empty elements
    /// are skipped; the parse only fails when no element survives.
    #[must_use]
    pub fn parse(raw: &str, parameters: &[Parameter]) -> Option<Self> {
        let kind = parameter_value(parameters, KW_VALUE);
        let tzid = parameter_value(parameters, KW_TZID)
            .filter(|t| !t.is_empty())
            .map(str::to_owned);

        let elements = raw.split(',').filter(|el| !el.is_empty());

        let list = if kind.is_some_and(|k| k.eq_ignore_ascii_case(KW_DATE)) {
            Self::Dates(elements.filter_map(parse_date).collect())
        } else if kind.is_some_and(|k| k.eq_ignore_ascii_case(KW_PERIOD)) {
            Self::Periods {
                periods: elements.filter_map(Period::parse).collect(),
                tzid,
            }
        } else {
            Self::DateTimes {
                times: elements
                    .filter_map(|el| parse_date_time(el).map(|(dt, _)| dt))
                    .collect(),
                tzid,
            }
        };

        (!list.is_empty()).then_some(list)
    }

    /// Number of elements in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Dates(dates) => dates.len(),
            Self::DateTimes { times, .. } => times.len(),
            Self::Periods { periods, .. } => periods.len(),
        }
    }

    /// Whether the list holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append another list's elements when both lists agree on type and
    /// timezone; returns `false` (and leaves `self` untouched) otherwise.
    pub fn merge(&mut self, other: Self) -> bool {
        match (self, other) {
            (Self::Dates(dates), Self::Dates(more)) => {
                dates.extend(more);
                true
            }
            (
                Self::DateTimes { times, tzid },
                Self::DateTimes {
                    times: more,
                    tzid: other_tzid,
                },
            ) if *tzid == other_tzid => {
                times.extend(more);
                true
            }
            (
                Self::Periods { periods, tzid },
                Self::Periods {
                    periods: more,
                    tzid: other_tzid,
                },
            ) if *tzid == other_tzid => {
                periods.extend(more);
                true
            }
            _ => false,
        }
    }
}

/// First value of the named parameter, ASCII-case-insensitive.
fn parameter_value<'a>(parameters: &'a [Parameter], key: &str) -> Option<&'a str> {
    parameters
        .iter()
        .find(|p| p.key.eq_ignore_ascii_case(key))
        .and_then(Parameter::first)
}

/// Parse the 8-digit `yyyymmdd` date shape.
///
/// ```txt
/// date-value         = date-fullyear date-month date-mday
/// date-fullyear      = 4DIGIT
/// date-month         = 2DIGIT        ;01-12
/// date-mday          = 2DIGIT        ;01-28, 01-29, 01-30, 01-31
///                                    ;based on month/year
/// ```
pub(crate) fn parse_date(src: &str) -> Option<civil::Date> {
    if src.len() != 8 || !src.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = lexical::parse::<i16, _>(src.get(..4)?).ok()?;
    let month = lexical::parse::<i8, _>(src.get(4..6)?).ok()?;
    let day = lexical::parse::<i8, _>(src.get(6..8)?).ok()?;
    civil::Date::new(year, month, day).ok()
}

/// Parse the `yyyymmddThhmmss[Z]` date-time shape; the flag reports the
/// UTC suffix.
///
/// A leap second (`60`) is contracted to `59`.
pub(crate) fn parse_date_time(src: &str) -> Option<(civil::DateTime, bool)> {
    let (body, utc) = match src.strip_suffix('Z') {
        Some(body) => (body, true),
        None => (src, false),
    };
    if body.len() != 15 || body.as_bytes().get(8) != Some(&b'T') {
        return None;
    }

    let date = parse_date(body.get(..8)?)?;

    let time = body.get(9..)?;
    if !time.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hour = lexical::parse::<i8, _>(time.get(..2)?).ok()?;
    let minute = lexical::parse::<i8, _>(time.get(2..4)?).ok()?;
    let second = lexical::parse::<i8, _>(time.get(4..6)?).ok()?;
    let second = if second == 60 { 59 } else { second };
    let time = civil::Time::new(hour, minute, second, 0).ok()?;

    Some((civil::DateTime::from_parts(date, time), utc))
}

pub(crate) fn write_date(f: &mut impl fmt::Write, date: civil::Date) -> fmt::Result {
    write!(f, "{:04}{:02}{:02}", date.year(), date.month(), date.day())
}

pub(crate) fn write_date_time(f: &mut impl fmt::Write, instant: civil::DateTime) -> fmt::Result {
    write_date(f, instant.date())?;
    write!(
        f,
        "T{:02}{:02}{:02}",
        instant.hour(),
        instant.minute(),
        instant.second()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i16, month: i8, day: i8) -> civil::Date {
        civil::Date::new(year, month, day).unwrap()
    }

    fn datetime(year: i16, month: i8, day: i8, hour: i8, minute: i8, second: i8) -> civil::DateTime {
        civil::DateTime::new(year, month, day, hour, minute, second, 0).unwrap()
    }

    #[test]
    fn parses_date() {
        #[rustfmt::skip]
        let success_cases = [
            // examples from RFC 5545 Section 3.3.4
            ("19970714", date(1997, 7, 14)),
            // extra tests
            ("20240101", date(2024, 1, 1)),
            ("20000229", date(2000, 2, 29)), // leap year
        ];
        for (src, expected) in success_cases {
            assert_eq!(parse_date(src), Some(expected), "Failed for {src}");
        }

        let fail_cases = [
            "20241301",  // invalid month
            "20240001",  // invalid month
            "20240230",  // invalid day for February
            "abcd1234",  // invalid characters
            "2024011",   // invalid length
            "202401011", // invalid length
        ];
        for src in fail_cases {
            assert!(parse_date(src).is_none(), "Parse {src} should fail");
        }
    }

    #[test]
    fn parses_date_time() {
        #[rustfmt::skip]
        let success_cases = [
            // examples from RFC 5545 Section 3.3.5
            ("19980118T230000",  (datetime(1998, 1, 18, 23, 0, 0), false)),
            ("19980119T070000Z", (datetime(1998, 1, 19, 7, 0, 0), true)),
            ("19970630T235960Z", (datetime(1997, 6, 30, 23, 59, 59), true)), // leap second contracted
            // extra tests
            ("19970714T133000",  (datetime(1997, 7, 14, 13, 30, 0), false)),
            ("19970714T173000Z", (datetime(1997, 7, 14, 17, 30, 0), true)),
        ];
        for (src, expected) in success_cases {
            assert_eq!(parse_date_time(src), Some(expected), "Failed for {src}");
        }

        let fail_cases = [
            "19980119T230000-0800", // embedded offsets are not a thing
            "19970714 133000",      // missing 'T'
            "19970714T250000",      // invalid hour
            "19970714T126000",      // invalid minute
            "19970714T123461",      // invalid second
            "19970714",             // date shape, not date-time
            "",
        ];
        for src in fail_cases {
            assert!(parse_date_time(src).is_none(), "Parse {src} should fail");
        }
    }

    #[test]
    fn resolves_value_date_parameter() {
        let params = [Parameter::new("VALUE", "DATE")];
        let parsed = DateTime::parse("20240101", &params).unwrap();
        assert_eq!(parsed, DateTime::date_only(date(2024, 1, 1)));
        assert!(parsed.is_date_only());
        assert_eq!(parsed.tzid(), None);
    }

    #[test]
    fn date_value_never_carries_timezone() {
        let params = [
            Parameter::new("VALUE", "DATE"),
            Parameter::new("TZID", "America/New_York"),
        ];
        let parsed = DateTime::parse("20240101", &params).unwrap();
        assert_eq!(parsed.form, TimeForm::Date);
    }

    #[test]
    fn resolves_utc_suffix() {
        let parsed = DateTime::parse("20250110T120000Z", &[]).unwrap();
        assert_eq!(parsed.form, TimeForm::Utc);
        assert_eq!(parsed.instant, datetime(2025, 1, 10, 12, 0, 0));
    }

    #[test]
    fn resolves_floating_time() {
        let parsed = DateTime::parse("20250110T120000", &[]).unwrap();
        assert_eq!(parsed.form, TimeForm::Floating);
    }

    #[test]
    fn tzid_parameter_wins_over_suffix() {
        let params = [Parameter::new("TZID", "Europe/Paris")];
        let parsed = DateTime::parse("20250110T120000Z", &params).unwrap();
        assert_eq!(parsed.form, TimeForm::Zoned("Europe/Paris".into()));
    }

    #[test]
    fn bare_date_degrades_to_date_only() {
        let parsed = DateTime::parse("20240101", &[]).unwrap();
        assert!(parsed.is_date_only());
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(DateTime::parse("not a date", &[]), None);
        assert_eq!(DateTime::parse("", &[]), None);
    }

    #[test]
    fn encodes_each_form() {
        assert_eq!(DateTime::date_only(date(2024, 1, 1)).to_string(), "20240101");
        assert_eq!(
            DateTime::utc(datetime(2025, 1, 10, 12, 0, 0)).to_string(),
            "20250110T120000Z"
        );
        assert_eq!(
            DateTime::floating(datetime(2025, 1, 10, 12, 0, 0)).to_string(),
            "20250110T120000"
        );
        assert_eq!(
            DateTime::zoned(datetime(2025, 1, 10, 12, 0, 0), "Europe/Paris").to_string(),
            "20250110T120000"
        );
    }

    #[test]
    fn parses_period() {
        let period = Period::parse("19970101T180000Z/19970102T070000Z").unwrap();
        assert_eq!(period.start, datetime(1997, 1, 1, 18, 0, 0));
        assert_eq!(period.end, datetime(1997, 1, 2, 7, 0, 0));

        assert!(Period::parse("19970101T180000Z").is_none());
        assert!(Period::parse("19970101T180000Z/PT1H").is_none());
    }

    #[test]
    fn parses_date_list() {
        let params = [Parameter::new("VALUE", "DATE")];
        let list = DateTimeList::parse("20240101,20240102,20240103", &params).unwrap();
        assert_eq!(
            list,
            DateTimeList::Dates(vec![date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3)])
        );
    }

    #[test]
    fn parses_date_time_list_with_tzid() {
        let params = [Parameter::new("TZID", "America/New_York")];
        let list = DateTimeList::parse("20240101T090000,20240102T090000", &params).unwrap();
        assert_eq!(
            list,
            DateTimeList::DateTimes {
                times: vec![
                    datetime(2024, 1, 1, 9, 0, 0),
                    datetime(2024, 1, 2, 9, 0, 0)
                ],
                tzid: Some("America/New_York".into()),
            }
        );
    }

    #[test]
    fn skips_invalid_list_elements() {
        let list = DateTimeList::parse("20240101T090000Z,,garbage,20240102T090000Z", &[]).unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn rejects_list_with_no_valid_element() {
        assert_eq!(DateTimeList::parse("garbage,more garbage", &[]), None);
        assert_eq!(DateTimeList::parse("", &[]), None);
    }

    #[test]
    fn parses_period_list() {
        let params = [Parameter::new("VALUE", "PERIOD")];
        let list =
            DateTimeList::parse("19970101T180000Z/19970102T070000Z", &params).unwrap();
        assert!(matches!(list, DateTimeList::Periods { ref periods, .. } if periods.len() == 1));
    }

    #[test]
    fn merges_compatible_lists() {
        let mut list = DateTimeList::parse("20240101T090000Z", &[]).unwrap();
        let more = DateTimeList::parse("20240102T090000Z", &[]).unwrap();
        assert!(list.merge(more));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn refuses_to_merge_mismatched_lists() {
        let mut list = DateTimeList::parse("20240101T090000Z", &[]).unwrap();
        let dates =
            DateTimeList::parse("20240101", &[Parameter::new("VALUE", "DATE")]).unwrap();
        assert!(!list.merge(dates));
        assert_eq!(list.len(), 1);

        let zoned = DateTimeList::parse(
            "20240102T090000",
            &[Parameter::new("TZID", "Europe/Paris")],
        )
        .unwrap();
        assert!(!list.merge(zoned));
    }
}
