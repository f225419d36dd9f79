pub mod blocks;
pub mod inline;

use blocks::{BlockScanner, ParsedBlock};

/// Splits document text into lines, dropping the `\r` of CRLF endings.
///
/// A trailing newline yields a final empty line, which parses as blank.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Classifies every line of the document into blocks, in order.
pub fn parse_lines<'a>(lines: &[&'a str]) -> Vec<ParsedBlock<'a>> {
    BlockScanner::new(lines).collect()
}

#[cfg(test)]
mod tests;
