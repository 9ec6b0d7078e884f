// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Tree builder for constructing block hierarchy from content lines.
//!
//! A single forward scan over the content lines maintains a stack of open
//! block frames:
//!
//! 1. `BEGIN:X` pushes a new frame named `X`
//! 2. any other property is added to the frame on top of the stack
//! 3. `END:X` pops the top frame, but only when the names match; the
//!    completed frame becomes a child of the new top, or a collected
//!    result when the stack empties and the name equals the target
//!
//! Degenerate input never fails the walk: a mismatched `END` is dropped,
//! frames still open at end of input are discarded entirely (never
//! partially emitted), and properties outside any frame are dropped.
//! Unknown block types are preserved verbatim as opaque children so that
//! nested extension blocks survive a round trip.

use crate::keyword::{KW_BEGIN, KW_END};
use crate::syntax::scanner::ContentLine;

/// A `BEGIN`/`END`-delimited region of content lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Block type name (e.g., "VCALENDAR", "VEVENT", "VTIMEZONE")
    pub name: String,

    /// Direct properties in source order
    pub properties: Vec<ContentLine>,

    /// Nested child blocks in source order
    pub children: Vec<Block>,
}

impl Block {
    /// Create an empty block of the given type.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    /// The first direct property with the given name, ASCII-case-insensitive.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&ContentLine> {
        self.properties
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// All direct properties with the given name, in source order.
    pub fn properties_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a ContentLine> {
        self.properties
            .iter()
            .filter(move |p| p.name.eq_ignore_ascii_case(name))
    }

    /// All direct children of the given block type, in source order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Block> {
        self.children
            .iter()
            .filter(move |c| c.name.eq_ignore_ascii_case(name))
    }
}

/// Diagnostics for structure the tree builder discarded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// An `END` line did not close the innermost open block.
    #[error("END:{found} does not close the open block {expected:?}")]
    MismatchedEnd {
        /// The innermost open block, `None` when no block was open
        expected: Option<String>,
        /// The block type the `END` line named
        found: String,
    },

    /// A block was still open when the input ended; it was discarded.
    #[error("unterminated block {name}")]
    UnterminatedBlock {
        /// The discarded block's type
        name: String,
    },

    /// A property appeared outside any open block.
    #[error("property {name} outside any block")]
    OrphanProperty {
        /// The orphan property's name
        name: String,
    },
}

/// Result of extracting blocks from a content-line sequence.
#[derive(Debug, Clone, Default)]
pub struct ExtractOutcome {
    /// Top-level blocks of the target type, in `BEGIN` order
    pub blocks: Vec<Block>,

    /// Diagnostics for discarded structure
    pub errors: Vec<ExtractError>,
}

/// Extract every top-level block of the given type, with full recursive
/// children.
///
/// Blocks of other types nested inside a match are retained as children;
/// top-level blocks of other types are not reported.
#[must_use]
pub fn extract_blocks(lines: &[ContentLine], target: &str) -> ExtractOutcome {
    let mut stack: Vec<Block> = Vec::new();
    let mut outcome = ExtractOutcome::default();

    for line in lines {
        if line.name.eq_ignore_ascii_case(KW_BEGIN) {
            stack.push(Block::new(line.value.clone()));
        } else if line.name.eq_ignore_ascii_case(KW_END) {
            let closes_top = stack
                .last()
                .is_some_and(|top| top.name.eq_ignore_ascii_case(&line.value));
            if closes_top {
                if let Some(block) = stack.pop() {
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(block),
                        None if block.name.eq_ignore_ascii_case(target) => {
                            outcome.blocks.push(block);
                        }
                        None => {}
                    }
                }
            } else {
                // A stray or mismatched END closes nothing; drop it and
                // leave the open frame in place.
                outcome.errors.push(ExtractError::MismatchedEnd {
                    expected: stack.last().map(|b| b.name.clone()),
                    found: line.value.clone(),
                });
            }
        } else if let Some(top) = stack.last_mut() {
            top.properties.push(line.clone());
        } else {
            outcome.errors.push(ExtractError::OrphanProperty {
                name: line.name.clone(),
            });
        }
    }

    // Anything still open was never terminated; discard it whole.
    for block in stack {
        outcome
            .errors
            .push(ExtractError::UnterminatedBlock { name: block.name });
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::lexer::tokenize;
    use crate::syntax::scanner::scan_content_lines;

    fn extract(src: &str, target: &str) -> ExtractOutcome {
        let outcome = scan_content_lines(tokenize(src));
        assert!(outcome.errors.is_empty(), "scan errors: {:?}", outcome.errors);
        extract_blocks(&outcome.lines, target)
    }

    #[test]
    fn extracts_simple_block() {
        let outcome = extract("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n", "VCALENDAR");
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.blocks.len(), 1);

        let block = outcome.blocks.first().unwrap();
        assert_eq!(block.name, "VCALENDAR");
        assert_eq!(block.properties.len(), 1);
        assert_eq!(block.properties.first().unwrap().name, "VERSION");
        assert!(block.children.is_empty());
    }

    #[test]
    fn nests_child_blocks() {
        let outcome = extract(
            "BEGIN:A\r\nBEGIN:B\r\nEND:B\r\nEND:A\r\n",
            "A",
        );
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.blocks.len(), 1);

        let a = outcome.blocks.first().unwrap();
        assert_eq!(a.children.len(), 1);
        assert_eq!(a.children.first().unwrap().name, "B");
    }

    #[test]
    fn discards_block_with_unterminated_child() {
        // The unterminated B swallows A's END (mismatched) and both frames
        // die at end of input.
        let outcome = extract("BEGIN:A\r\nBEGIN:B\r\nEND:A\r\n", "A");
        assert_eq!(outcome.blocks.len(), 0);
        assert!(outcome
            .errors
            .iter()
            .any(|e| matches!(e, ExtractError::MismatchedEnd { .. })));
        assert!(outcome
            .errors
            .iter()
            .any(|e| matches!(e, ExtractError::UnterminatedBlock { .. })));
    }

    #[test]
    fn discards_unterminated_block() {
        let outcome = extract("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n", "VCALENDAR");
        assert!(outcome.blocks.is_empty());
        assert_eq!(
            outcome.errors,
            [ExtractError::UnterminatedBlock {
                name: "VCALENDAR".into()
            }]
        );
    }

    #[test]
    fn drops_stray_end() {
        let outcome = extract("END:VCALENDAR\r\n", "VCALENDAR");
        assert!(outcome.blocks.is_empty());
        assert_eq!(
            outcome.errors,
            [ExtractError::MismatchedEnd {
                expected: None,
                found: "VCALENDAR".into()
            }]
        );
    }

    #[test]
    fn nests_blocks_of_the_same_type() {
        let src = "BEGIN:VEVENT\r\nUID:1\r\nEND:VEVENT\r\n\
BEGIN:VEVENT\r\nUID:2\r\n\
BEGIN:VEVENT\r\nUID:3\r\nEND:VEVENT\r\nEND:VEVENT\r\n";
        let outcome = extract(src, "VEVENT");
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.blocks.len(), 2);
        assert_eq!(outcome.blocks.get(1).unwrap().children.len(), 1);
    }

    #[test]
    fn preserves_unknown_blocks_as_children() {
        let src = "BEGIN:VCALENDAR\r\n\
BEGIN:X-EXPERIMENT\r\nX-PROP:1\r\n\
BEGIN:X-INNER\r\nX-DEEP:2\r\nEND:X-INNER\r\n\
END:X-EXPERIMENT\r\n\
END:VCALENDAR\r\n";
        let outcome = extract(src, "VCALENDAR");
        assert!(outcome.errors.is_empty());

        let cal = outcome.blocks.first().unwrap();
        let unknown = cal.children.first().unwrap();
        assert_eq!(unknown.name, "X-EXPERIMENT");
        assert_eq!(unknown.properties.len(), 1);
        assert_eq!(unknown.children.first().unwrap().name, "X-INNER");
    }

    #[test]
    fn matches_block_name_case_insensitively() {
        let outcome = extract("begin:vcalendar\r\nEND:VCALENDAR\r\n", "VCALENDAR");
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.blocks.len(), 1);
    }

    #[test]
    fn drops_orphan_properties() {
        let outcome = extract("SUMMARY:outside\r\nBEGIN:A\r\nEND:A\r\n", "A");
        assert_eq!(outcome.blocks.len(), 1);
        assert_eq!(
            outcome.errors,
            [ExtractError::OrphanProperty {
                name: "SUMMARY".into()
            }]
        );
    }

    #[test]
    fn returns_blocks_in_begin_order() {
        let src = "BEGIN:A\r\nUID:1\r\nEND:A\r\nBEGIN:A\r\nUID:2\r\nEND:A\r\n";
        let outcome = extract(src, "A");
        let uids: Vec<_> = outcome
            .blocks
            .iter()
            .map(|b| b.properties.first().unwrap().value.as_str())
            .collect();
        assert_eq!(uids, ["1", "2"]);
    }
}
