// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Typed property values and the open-ended extension bag.

use crate::syntax::scanner::Parameter;
use crate::value::{DateTime, DateTimeList, Duration, RecurrenceRule};

/// A typed property value.
///
/// This is the unit the encoder renders: each variant knows its raw wire
/// form and, for date values, the parameters it implies (`VALUE=DATE`,
/// `TZID=`, `VALUE=PERIOD`).
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Literal text, stored unescaped.
    Text(String),

    /// Integer value.
    Integer(i64),

    /// A single date or date-time.
    DateTime(DateTime),

    /// A list of dates, date-times or periods.
    DateTimeList(DateTimeList),

    /// A signed duration.
    Duration(Duration),

    /// A recurrence rule.
    RecurrenceRule(RecurrenceRule),

    /// An attached document reference.
    Attachment(Attachment),
}

/// A document object associated with a calendar component
/// (RFC 5545 Section 3.8.1.1).
///
/// The attachment keeps every parameter of its content line verbatim plus
/// the raw value string, so unknown encodings survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Parameters of the `ATTACH` line, in source order.
    pub parameters: Vec<Parameter>,

    /// The raw attachment value, typically a URI or inline data.
    pub value: String,
}

impl Attachment {
    /// Create an attachment from a raw value with no parameters.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            parameters: Vec::new(),
            value: value.into(),
        }
    }
}

/// Ordered bag of unrecognized properties.
///
/// Lookup ignores ASCII case; insertion order is preserved and drives the
/// order extension properties are re-encoded in.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Extensions {
    entries: Vec<(String, PropertyValue)>,
}

impl Extensions {
    /// Create an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the bag holds no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of properties in the bag.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Look up a property by name, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    /// Insert a property under its literal name.
    ///
    /// When a property with the same name (ignoring ASCII case) already
    /// exists, its value is replaced in place and it keeps its position.
    pub fn set(&mut self, name: impl Into<String>, value: PropertyValue) {
        let name = name.into();
        match self
            .entries
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(&name))
        {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Iterate the properties in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case_but_keeps_literal_name() {
        let mut ext = Extensions::new();
        ext.set("X-Custom-Prop", PropertyValue::Text("a".into()));

        assert!(ext.get("X-CUSTOM-PROP").is_some());
        assert!(ext.get("x-custom-prop").is_some());
        assert_eq!(
            ext.iter().map(|(k, _)| k).collect::<Vec<_>>(),
            ["X-Custom-Prop"]
        );
    }

    #[test]
    fn replacement_keeps_insertion_order() {
        let mut ext = Extensions::new();
        ext.set("X-A", PropertyValue::Text("1".into()));
        ext.set("X-B", PropertyValue::Text("2".into()));
        ext.set("x-a", PropertyValue::Text("3".into()));

        let entries: Vec<_> = ext.iter().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries.first().unwrap().0, "X-A");
        assert_eq!(
            entries.first().unwrap().1,
            &PropertyValue::Text("3".into())
        );
    }
}
