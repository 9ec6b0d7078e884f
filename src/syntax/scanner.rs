// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Scanner for iCalendar content lines.
//!
//! Converts the token stream into logical content lines. Per RFC 5545, a
//! content line has the format:
//!
//! ```text
//! contentline = name *(";" param) ":" value CRLF
//! ```
//!
//! The scanner is tolerant by design: a line without a colon is discarded,
//! a parameter segment without an equals sign is discarded while the rest
//! of its line survives, and an unterminated quoted value discards the
//! line. Dropped input is reported as diagnostics, never as a failure.

use std::iter::Peekable;

use crate::syntax::lexer::Token;

/// A scanned iCalendar content line.
///
/// One logical (unfolded) `name[;params]:value` record. Lines preserve
/// source order, which is load-bearing for extension-property
/// round-tripping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    /// Property name (e.g., "DTSTART", "SUMMARY"), original casing kept
    pub name: String,

    /// Property parameters in source order
    pub parameters: Vec<Parameter>,

    /// Raw property value (may need further parsing by the value grammar)
    pub value: String,
}

impl ContentLine {
    /// Look up the first parameter with the given key, ASCII-case-insensitive.
    #[must_use]
    pub fn parameter(&self, key: &str) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|p| p.key.eq_ignore_ascii_case(key))
    }
}

/// A property parameter (e.g., `TZID=America/New_York`).
///
/// Parameters have the format `name=value` or `name=value1,value2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name (e.g., "TZID", "VALUE")
    pub key: String,

    /// Parameter values split by commas, quoting already stripped
    pub values: Vec<String>,
}

impl Parameter {
    /// Create a single-valued parameter.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            values: vec![value.into()],
        }
    }

    /// The first value, if any.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }
}

/// Diagnostics for input the scanner discarded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    /// A line without a colon separator was discarded.
    #[error("content line {name:?} has no colon separator")]
    MissingColon {
        /// Property name of the discarded line, as far as it was read
        name: String,
    },

    /// A parameter segment without an equals sign was discarded.
    #[error("parameter segment on line {name:?} has no equals sign")]
    ParameterWithoutEquals {
        /// Property name of the line the segment belonged to
        name: String,
    },

    /// A quoted parameter value ran to the end of its line.
    #[error("unterminated quoted parameter value on line {name:?}")]
    UnterminatedQuote {
        /// Property name of the discarded line
        name: String,
    },

    /// A line that does not start with a property name was discarded.
    #[error("malformed content line")]
    MalformedLine,
}

/// Result of scanning a token stream.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    /// All well-formed content lines, in source order
    pub lines: Vec<ContentLine>,

    /// Diagnostics for discarded lines and segments
    pub errors: Vec<ScanError>,
}

/// Scan a token stream into content lines.
///
/// Malformed input never fails the scan; it is dropped and recorded in
/// [`ScanOutcome::errors`].
pub fn scan_content_lines<'src>(
    tokens: impl IntoIterator<Item = Token<'src>>,
) -> ScanOutcome {
    let mut tokens = tokens.into_iter().peekable();
    let mut outcome = ScanOutcome::default();

    while tokens.peek().is_some() {
        // Empty lines carry nothing, skip them silently.
        if matches!(tokens.peek(), Some(Token::Newline)) {
            tokens.next();
            continue;
        }

        if let Some(line) = scan_one_line(&mut tokens, &mut outcome.errors) {
            outcome.lines.push(line);
        }
    }

    outcome
}

/// Scan a single content line; `None` when the line was discarded.
fn scan_one_line<'src>(
    tokens: &mut Peekable<impl Iterator<Item = Token<'src>>>,
    errors: &mut Vec<ScanError>,
) -> Option<ContentLine> {
    let name = scan_name(tokens);
    if name.is_empty() {
        errors.push(ScanError::MalformedLine);
        consume_until_newline(tokens);
        return None;
    }

    let mut parameters = Vec::new();
    loop {
        match tokens.peek() {
            Some(Token::Semicolon) => {
                tokens.next();
                match scan_parameter(tokens) {
                    Ok(param) => parameters.push(param),
                    Err(ScanError::UnterminatedQuote { .. }) => {
                        // The closing quote is gone along with the rest of
                        // the line; nothing left to salvage.
                        errors.push(ScanError::UnterminatedQuote { name });
                        consume_until_newline(tokens);
                        return None;
                    }
                    Err(_) => {
                        errors.push(ScanError::ParameterWithoutEquals { name: name.clone() });
                        skip_parameter_segment(tokens);
                    }
                }
            }
            Some(Token::Colon) => {
                tokens.next();
                break;
            }
            Some(Token::Newline) | None => {
                errors.push(ScanError::MissingColon { name });
                tokens.next();
                return None;
            }
            Some(_) => {
                errors.push(ScanError::MissingColon { name });
                consume_until_newline(tokens);
                return None;
            }
        }
    }

    let value = scan_value(tokens);
    Some(ContentLine {
        name,
        parameters,
        value,
    })
}

/// Collect consecutive `Word` tokens into a name.
///
/// Property and parameter names are iana-tokens or x-names: letters,
/// digits and hyphens, which the lexer groups into `Word` tokens.
fn scan_name<'src>(tokens: &mut Peekable<impl Iterator<Item = Token<'src>>>) -> String {
    let mut name = String::new();
    while let Some(&Token::Word(text)) = tokens.peek() {
        name.push_str(text);
        tokens.next();
    }
    name
}

/// Scan one `name=value[,value]*` parameter after its leading semicolon.
fn scan_parameter<'src>(
    tokens: &mut Peekable<impl Iterator<Item = Token<'src>>>,
) -> Result<Parameter, ScanError> {
    let key = scan_name(tokens);
    if key.is_empty() || !matches!(tokens.peek(), Some(Token::Equal)) {
        return Err(ScanError::ParameterWithoutEquals { name: key });
    }
    tokens.next(); // consume '='

    let mut values = Vec::new();
    loop {
        values.push(scan_parameter_value(tokens)?);
        match tokens.peek() {
            Some(Token::Comma) => {
                tokens.next();
            }
            _ => break,
        }
    }

    Ok(Parameter { key, values })
}

/// Scan one parameter value, quoted or bare.
fn scan_parameter_value<'src>(
    tokens: &mut Peekable<impl Iterator<Item = Token<'src>>>,
) -> Result<String, ScanError> {
    let mut value = String::new();

    if matches!(tokens.peek(), Some(Token::DQuote)) {
        tokens.next(); // consume opening quote
        loop {
            match tokens.peek() {
                Some(Token::DQuote) => {
                    tokens.next();
                    return Ok(value);
                }
                // Leave the line break for the caller's recovery.
                Some(Token::Newline) | None => {
                    return Err(ScanError::UnterminatedQuote {
                        name: String::new(),
                    });
                }
                Some(&token) => {
                    value.push_str(token.as_str());
                    tokens.next();
                }
            }
        }
    }

    // Bare values run until a structural separator. Only the first `=` of
    // a segment separates key from value; later ones are value content.
    while let Some(&token) = tokens.peek() {
        match token {
            Token::Semicolon | Token::Colon | Token::Comma | Token::Newline => break,
            _ => {
                value.push_str(token.as_str());
                tokens.next();
            }
        }
    }
    Ok(value)
}

/// Collect value content up to (and consuming) the line break.
fn scan_value<'src>(tokens: &mut Peekable<impl Iterator<Item = Token<'src>>>) -> String {
    let mut value = String::new();
    for token in tokens.by_ref() {
        if matches!(token, Token::Newline) {
            break;
        }
        value.push_str(token.as_str());
    }
    value
}

/// Skip a broken parameter segment up to the next `;`, `:` or line break.
fn skip_parameter_segment<'src>(tokens: &mut Peekable<impl Iterator<Item = Token<'src>>>) {
    while let Some(token) = tokens.peek() {
        match token {
            Token::Semicolon | Token::Colon | Token::Newline => break,
            _ => {
                tokens.next();
            }
        }
    }
}

/// Consume all tokens until a newline is found (including the newline).
fn consume_until_newline<'src>(tokens: &mut Peekable<impl Iterator<Item = Token<'src>>>) {
    for token in tokens.by_ref() {
        if matches!(token, Token::Newline) {
            break;
        }
    }
}
