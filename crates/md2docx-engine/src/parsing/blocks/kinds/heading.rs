use crate::parsing::blocks::types::Block;

pub struct Heading;

impl Heading {
    /// Prefixes for the supported levels. Level 5 and deeper are paragraphs.
    pub const PREFIXES: [(&'static str, u8); 4] =
        [("# ", 1), ("## ", 2), ("### ", 3), ("#### ", 4)];

    /// Splits a heading line into its level and text. The prefix must start the
    /// raw line: indented `#` lines are not headings.
    pub fn split(line: &str) -> Option<(u8, &str)> {
        Self::PREFIXES
            .iter()
            .find_map(|&(prefix, level)| line.strip_prefix(prefix).map(|text| (level, text)))
    }
}

pub fn matches(line: &str) -> bool {
    Heading::split(line).is_some()
}

pub fn consume<'a>(lines: &[&'a str], start: usize) -> (Block<'a>, usize) {
    let line = lines[start];
    let block = match Heading::split(line) {
        Some((level, text)) => Block::Heading { level, text },
        None => Block::Paragraph { text: line },
    };
    (block, start + 1)
}
