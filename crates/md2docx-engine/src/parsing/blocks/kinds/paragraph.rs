use crate::parsing::blocks::types::Block;

pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

pub fn matches(line: &str) -> bool {
    !is_blank(line)
}

pub fn consume<'a>(lines: &[&'a str], start: usize) -> (Block<'a>, usize) {
    (Block::Paragraph { text: lines[start] }, start + 1)
}

pub fn consume_blank<'a>(_lines: &[&'a str], start: usize) -> (Block<'a>, usize) {
    (Block::Blank, start + 1)
}
