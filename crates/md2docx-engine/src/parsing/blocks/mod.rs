//! # Block Parsing
//!
//! A single cursor walks the input lines. At each position the rules in
//! [`rules::RULES`] are tried in priority order; the first whose predicate
//! matches consumes the lines that belong to its block.
//!
//! ## Modules
//!
//! - **`types`**: `Block` and its payload types, `ParsedBlock`
//! - **`kinds`**: predicate and consumer per block kind
//! - **`rules`**: the ordered rule table
//!
//! ## Key Invariants
//!
//! - Every line is consumed exactly once: the ranges of consecutive
//!   `ParsedBlock`s are contiguous and cover the whole input
//! - Lines inside a block (an aside, a fence) are never re-classified

pub mod kinds;
pub mod rules;
pub mod types;

pub use rules::{BlockRule, RULES, rule_for};
pub use types::{Block, ImageRef, NumberedItem, ParsedBlock, Table};

/// Iterator over the blocks of a line sequence.
pub struct BlockScanner<'l, 'a> {
    lines: &'l [&'a str],
    cursor: usize,
}

impl<'l, 'a> BlockScanner<'l, 'a> {
    pub fn new(lines: &'l [&'a str]) -> Self {
        Self { lines, cursor: 0 }
    }
}

impl<'a> Iterator for BlockScanner<'_, 'a> {
    type Item = ParsedBlock<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = *self.lines.get(self.cursor)?;
        let start = self.cursor;
        let rule = rule_for(line);

        let (block, end) = (rule.consume)(self.lines, start);
        // Every rule consumes at least its first line.
        let end = end.clamp(start + 1, self.lines.len());
        self.cursor = end;

        Some(ParsedBlock {
            rule: rule.name,
            block,
            lines: start..end,
        })
    }
}
