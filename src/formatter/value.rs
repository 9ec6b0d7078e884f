// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Value rendering for the formatter: each typed value's raw wire form and
//! the parameters it implies.

use crate::keyword::{KW_DATE, KW_PERIOD, KW_TZID, KW_VALUE};
use crate::model::property::PropertyValue;
use crate::syntax::scanner::Parameter;
use crate::value::datetime::{DateTime, DateTimeList, TimeForm};
use crate::value::text::escape;

/// Render a value's raw wire form, the inverse of its parse grammar.
pub(crate) fn render_value(value: &PropertyValue) -> String {
    match value {
        PropertyValue::Text(text) => escape(text),
        PropertyValue::Integer(int) => int.to_string(),
        PropertyValue::DateTime(datetime) => datetime.to_string(),
        PropertyValue::DateTimeList(list) => render_date_time_list(list),
        PropertyValue::Duration(duration) => duration.to_string(),
        PropertyValue::RecurrenceRule(rule) => rule.to_string(),
        // Attachment values pass through verbatim.
        PropertyValue::Attachment(attachment) => attachment.value.clone(),
    }
}

/// Parameters a value carries onto its content line: `VALUE=DATE` for
/// date-only values, `TZID=` for zoned ones, `VALUE=PERIOD` for period
/// lists, and an attachment's own parameters verbatim.
pub(crate) fn implied_parameters(value: &PropertyValue) -> Vec<Parameter> {
    match value {
        PropertyValue::DateTime(datetime) => match &datetime.form {
            TimeForm::Date => vec![Parameter::new(KW_VALUE, KW_DATE)],
            TimeForm::Zoned(tzid) => vec![Parameter::new(KW_TZID, tzid.clone())],
            TimeForm::Floating | TimeForm::Utc => Vec::new(),
        },
        PropertyValue::DateTimeList(DateTimeList::Dates(_)) => {
            vec![Parameter::new(KW_VALUE, KW_DATE)]
        }
        PropertyValue::DateTimeList(DateTimeList::DateTimes { tzid, .. }) => tzid
            .as_ref()
            .map(|tzid| vec![Parameter::new(KW_TZID, tzid.clone())])
            .unwrap_or_default(),
        PropertyValue::DateTimeList(DateTimeList::Periods { tzid, .. }) => {
            let mut parameters = vec![Parameter::new(KW_VALUE, KW_PERIOD)];
            if let Some(tzid) = tzid {
                parameters.push(Parameter::new(KW_TZID, tzid.clone()));
            }
            parameters
        }
        PropertyValue::Attachment(attachment) => attachment.parameters.clone(),
        _ => Vec::new(),
    }
}

fn render_date_time_list(list: &DateTimeList) -> String {
    let rendered: Vec<String> = match list {
        DateTimeList::Dates(dates) => dates
            .iter()
            .map(|date| DateTime::date_only(*date).to_string())
            .collect(),
        DateTimeList::DateTimes { times, tzid } => times
            .iter()
            .map(|time| render_instant(*time, tzid.is_none()))
            .collect(),
        DateTimeList::Periods { periods, tzid } => periods
            .iter()
            .map(|period| {
                let mut rendered = render_instant(period.start, tzid.is_none());
                rendered.push('/');
                rendered.push_str(&render_instant(period.end, tzid.is_none()));
                rendered
            })
            .collect(),
    };
    rendered.join(",")
}

/// A list element's instant: UTC form when the list has no `TZID=`,
/// local form otherwise.
fn render_instant(instant: jiff::civil::DateTime, utc: bool) -> String {
    if utc {
        DateTime::utc(instant).to_string()
    } else {
        DateTime::floating(instant).to_string()
    }
}
