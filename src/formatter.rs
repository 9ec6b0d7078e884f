// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! iCalendar (RFC 5545) formatter module.
//!
//! Converts the component model back into RFC 5545 text: one content
//! line per present property, folded to the maximum line length, joined
//! with CRLF terminators regardless of the input's line-break style.
//!
//! # Example
//!
//! ```
//! use vical::{format, parse};
//!
//! let input = "BEGIN:VCALENDAR\r\n\
//! VERSION:2.0\r\n\
//! PRODID:-//Example Corp.//Cal Client 1.0//EN\r\n\
//! END:VCALENDAR\r\n";
//! let calendars = parse(input);
//! let output = format(calendars.first().unwrap()).unwrap();
//! assert!(output.contains("PRODID:-//Example Corp.//Cal Client 1.0//EN\r\n"));
//! ```

mod component;
mod property;
mod value;

use std::io::{self, Write};

use crate::formatter::component::write_calendar;
use crate::model::calendar::Calendar;

/// Maximum content-line length in characters before folding, per
/// RFC 5545 Section 3.1.
pub const MAX_LINE_LENGTH: usize = 75;

/// Format a [`Calendar`] to a `String` with default options.
///
/// # Errors
///
/// Returns an error if writing to the internal buffer fails.
pub fn format(calendar: &Calendar) -> io::Result<String> {
    FormatOptions::default().write_to_string(calendar)
}

/// Formatting options for the iCalendar formatter.
#[derive(Debug, Clone, Copy)]
pub struct FormatOptions {
    /// Maximum line length in characters before folding.
    /// - `None`: no line folding
    /// - `Some(n)`: fold lines longer than n characters
    ///
    /// Default: `Some(75)` for RFC 5545 compliance.
    pub folding: Option<usize>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            folding: Some(MAX_LINE_LENGTH),
        }
    }
}

impl FormatOptions {
    /// Set the line folding option.
    #[must_use]
    pub const fn folding(mut self, folding: Option<usize>) -> Self {
        self.folding = folding;
        self
    }

    /// Write a [`Calendar`] to any `Write` implementer.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write(&self, calendar: &Calendar, w: &mut impl Write) -> io::Result<()> {
        let mut formatter = Formatter::new(w, *self);
        formatter.write(calendar)
    }

    /// Write a [`Calendar`] to a `String`.
    ///
    /// # Errors
    /// Returns an error if writing fails or if the output contains invalid
    /// UTF-8 data.
    pub fn write_to_string(&self, calendar: &Calendar) -> io::Result<String> {
        let mut buffer = Vec::new();
        self.write(calendar, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// iCalendar formatter that writes folded content lines to any `Write`
/// implementer.
#[derive(Debug)]
pub struct Formatter<W: Write> {
    /// The underlying writer.
    writer: W,
    /// Formatting options.
    options: FormatOptions,
}

impl<W: Write> Formatter<W> {
    /// Create a new formatter with options.
    #[must_use]
    pub fn new(writer: W, options: FormatOptions) -> Self {
        Self { writer, options }
    }

    /// Consumes this formatter, returning the underlying writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Write a [`Calendar`] to the underlying writer.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write(&mut self, calendar: &Calendar) -> io::Result<()> {
        write_calendar(self, calendar)
    }

    /// Write one logical content line, folding it when it exceeds the
    /// configured length.
    pub(crate) fn write_content_line(&mut self, line: &str) -> io::Result<()> {
        match self.options.folding {
            None => write!(self.writer, "{line}\r\n"),
            Some(limit) => self.writer.write_all(fold(line, limit).as_bytes()),
        }
    }
}

/// Fold one logical line into its physical representation.
///
/// The line is split at character boundaries into chunks of exactly
/// `limit` characters; every chunk after the first is prefixed with one
/// space and every chunk, the last included, is terminated with CRLF.
/// Un-folding (removing each CRLF-plus-space sequence and the final CRLF)
/// reconstructs the original line exactly.
///
/// # Panics
///
/// Panics when `limit` is zero; folding with a non-positive chunk length
/// is a caller bug, not a degradable condition.
#[must_use]
pub fn fold(line: &str, limit: usize) -> String {
    assert!(limit > 0, "fold length must be positive");

    let mut out = String::with_capacity(line.len() + 8);
    let mut chars = line.chars().peekable();
    let mut first = true;
    loop {
        if !first {
            out.push(' ');
        }
        for _ in 0..limit {
            match chars.next() {
                Some(c) => out.push(c),
                None => break,
            }
        }
        out.push_str("\r\n");
        if chars.peek().is_none() {
            break;
        }
        first = false;
    }
    out
}
