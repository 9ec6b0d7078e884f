// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Lexer for iCalendar content as defined in RFC 5545.
//!
//! Line un-folding happens here: any line break immediately followed by a
//! single space or tab is a folding sequence and is skipped entirely, so the
//! token stream only ever contains logical-line content. Both CRLF and bare
//! LF line breaks are recognized.

use std::fmt::{self, Display};

use logos::Logos;

/// Tokenize iCalendar source text.
///
/// Lexing never fails: byte sequences that match no token class (stray
/// control characters, a bare CR) are surfaced as [`Token::Error`] and left
/// for the scanner to discard.
pub fn tokenize(src: &str) -> impl Iterator<Item = Token<'_>> {
    Token::lexer(src).map(|tok| tok.unwrap_or(Token::Error))
}

/// Token emitted by the iCalendar lexer.
#[derive(PartialEq, Eq, Clone, Copy, Logos)]
#[logos(skip r"\r?\n[ \t]")] // skip folding
pub enum Token<'a> {
    /// Double Quote ("), decimal codepoint 22
    #[token(r#"""#)]
    DQuote,

    /// Comma (,), decimal codepoint 44
    #[token(",")]
    Comma,

    /// Colon (:), decimal codepoint 58
    #[token(":")]
    Colon,

    /// Semicolon (;), decimal codepoint 59
    #[token(";")]
    Semicolon,

    /// Equal sign (=), decimal codepoint 61
    #[token("=")]
    Equal,

    /// ASCII symbols: sequences of printable ASCII characters
    #[regex(r#"[\t !#$%&'()*+./<>?@\[\\\]\^`\{|\}~]+"#)]
    Symbol(&'a str),

    /// Line break, either CRLF or a bare LF
    #[token("\r\n")]
    #[token("\n")]
    Newline,

    /// ASCII word characters: 0-9, A-Z, a-z, underscore, hyphen
    #[regex("[0-9A-Za-z_-]+")]
    Word(&'a str),

    /// NON-US-ASCII  = UTF8-2 / UTF8-3 / UTF8-4
    ///    ; UTF8-2, UTF8-3, and UTF8-4 are defined in [RFC3629]
    #[regex(r#"[^\x00-\x7F]+"#)]
    UnicodeText(&'a str),

    /// Error token for lexing errors
    Error,
}

impl Token<'_> {
    /// The source text this token stands for, empty for structural tokens.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Word(s) | Self::Symbol(s) | Self::UnicodeText(s) => s,
            Self::DQuote => "\"",
            Self::Comma => ",",
            Self::Colon => ":",
            Self::Semicolon => ";",
            Self::Equal => "=",
            Self::Newline | Self::Error => "",
        }
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DQuote => write!(f, "DQuote"),
            Self::Comma => write!(f, "Comma"),
            Self::Colon => write!(f, "Colon"),
            Self::Semicolon => write!(f, "Semicolon"),
            Self::Equal => write!(f, "Equal"),
            Self::Symbol(s) => write!(f, "Symbol({s})"),
            Self::Newline => write!(f, "Newline"),
            Self::Word(s) => write!(f, "Word({s})"),
            Self::UnicodeText(s) => write!(f, "UnicodeText({s})"),
            Self::Error => write!(f, "Error"),
        }
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}
