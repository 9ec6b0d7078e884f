// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Duration value type as defined in RFC 5545 Section 3.3.6.
//!
//! A duration is stored as a single signed total-seconds count rather than
//! its five wire components, so arithmetic is exact; the components are
//! re-derived on demand when encoding.

use std::fmt::{self, Display};
use std::ops::{Add, Neg, Sub};

use chumsky::extra::ParserExtra;
use chumsky::input::Input;
use chumsky::prelude::*;

const SECOND: i64 = 1;
const MINUTE: i64 = 60 * SECOND;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;

/// Duration Value defined in RFC 5545 Section 3.3.6.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration {
    /// The total seconds of this duration; negative for negative durations.
    pub total_seconds: i64,
}

impl Duration {
    /// A zero-length duration.
    pub const ZERO: Self = Self { total_seconds: 0 };

    /// Create a duration from a total-seconds count.
    #[must_use]
    pub const fn new(total_seconds: i64) -> Self {
        Self { total_seconds }
    }

    /// Create a duration of whole weeks.
    #[must_use]
    pub const fn weeks(weeks: i64) -> Self {
        Self::new(weeks * WEEK)
    }

    /// Create a duration of whole days.
    #[must_use]
    pub const fn days(days: i64) -> Self {
        Self::new(days * DAY)
    }

    /// Create a duration of whole hours.
    #[must_use]
    pub const fn hours(hours: i64) -> Self {
        Self::new(hours * HOUR)
    }

    /// Create a duration of whole minutes.
    #[must_use]
    pub const fn minutes(minutes: i64) -> Self {
        Self::new(minutes * MINUTE)
    }

    /// Create a duration of whole seconds.
    #[must_use]
    pub const fn seconds(seconds: i64) -> Self {
        Self::new(seconds)
    }

    /// Parse a duration value string such as `P15DT5H0M20S` or `-P2W`.
    ///
    /// The grammar is read left-to-right exactly once:
    ///
    /// ```txt
    /// dur-value  = (["+"] / "-") "P" (dur-date / dur-time / dur-week)
    ///
    /// dur-date   = dur-day [dur-time]
    /// dur-time   = "T" (dur-hour / dur-minute / dur-second)
    /// dur-week   = 1*DIGIT "W"
    /// dur-hour   = 1*DIGIT "H" [dur-minute]
    /// dur-minute = 1*DIGIT "M" [dur-second]
    /// dur-second = 1*DIGIT "S"
    /// dur-day    = 1*DIGIT "D"
    /// ```
    ///
    /// Absent groups contribute zero; the sign applies to the whole value.
    /// Anything that does not match the grammar in full yields `None`.
    #[must_use]
    pub fn parse(src: &str) -> Option<Self> {
        duration::<_, extra::Default>()
            .then_ignore(end())
            .parse(src)
            .into_result()
            .ok()
    }

    /// Derive the wire components `(weeks, days, hours, minutes, seconds)`
    /// of the duration's magnitude.
    ///
    /// A duration that is an exact multiple of a week is expressed in whole
    /// weeks; anything else expands to days/hours/minutes/seconds with each
    /// component strictly less than the next-larger unit's multiple.
    #[must_use]
    pub const fn parts(&self) -> (u64, u64, u64, u64, u64) {
        let magnitude = self.total_seconds.unsigned_abs();
        if magnitude % (WEEK as u64) == 0 {
            return (magnitude / (WEEK as u64), 0, 0, 0, 0);
        }

        let days = magnitude / (DAY as u64);
        let rest = magnitude % (DAY as u64);
        let hours = rest / (HOUR as u64);
        let rest = rest % (HOUR as u64);
        let minutes = rest / (MINUTE as u64);
        let seconds = rest % (MINUTE as u64);
        (0, days, hours, minutes, seconds)
    }

    /// Whether the duration is negative.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.total_seconds < 0
    }
}

impl Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-")?;
        }
        let (weeks, days, hours, minutes, seconds) = self.parts();
        if self.total_seconds % WEEK == 0 {
            write!(f, "P{weeks}W")
        } else {
            write!(f, "P{days}DT{hours}H{minutes}M{seconds}S")
        }
    }
}

impl Add for Duration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.total_seconds + rhs.total_seconds)
    }
}

impl Sub for Duration {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.total_seconds - rhs.total_seconds)
    }
}

impl Neg for Duration {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.total_seconds)
    }
}

fn duration<'src, I, E>() -> impl Parser<'src, I, Duration, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    // case-sensitive
    let int = select! { c @ '0'..='9' => c }
        .repeated()
        .at_least(1)
        .at_most(10)
        .collect::<String>()
        .map(|str: String| lexical::parse::<i64, _>(&str).unwrap_or_default());

    let week = int.then_ignore(just('W')).map(|w| w * WEEK);

    let second_val = int.then_ignore(just('S'));
    let minute_val = int.then_ignore(just('M'));
    let hour_val = int.then_ignore(just('H'));

    // dur-second = 1*DIGIT "S"
    let second_only = second_val.map(|s| s * SECOND);

    // dur-minute = 1*DIGIT "M" [dur-second]
    let minute_with_second = minute_val
        .then(second_val.or_not())
        .map(|(m, s)| m * MINUTE + s.unwrap_or(0));

    // dur-hour = 1*DIGIT "H" [dur-minute]
    let hour_with_minute = hour_val
        .then(minute_val.then(second_val.or_not()).or_not())
        .map(|(h, opt_ms)| match opt_ms {
            Some((m, opt_s)) => h * HOUR + m * MINUTE + opt_s.unwrap_or(0),
            None => h * HOUR,
        });

    // dur-time = "T" (dur-hour / dur-minute / dur-second)
    let time = just('T').ignore_then(choice((hour_with_minute, minute_with_second, second_only)));

    let day = int.then_ignore(just('D')).map(|d| d * DAY);
    let date = day
        .then(time.or_not())
        .map(|(d, t)| d + t.unwrap_or(0));

    let sign = select! { c @ ('+' | '-') => c }
        .or_not()
        .map(|sign| !matches!(sign, Some('-')));
    let prefix = sign.then_ignore(just('P'));

    choice((prefix.then(date), prefix.then(time), prefix.then(week))).map(
        |(positive, seconds)| {
            Duration::new(if positive { seconds } else { -seconds })
        },
    )
}
