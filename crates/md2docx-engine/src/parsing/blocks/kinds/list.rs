//! `- item` bullet lists and `(n) item` numbered lists. Both are flat: a
//! contiguous run of item lines forms one list.

use regex::Regex;
use std::sync::OnceLock;

use crate::parsing::blocks::types::{Block, NumberedItem};

pub struct BulletList;

impl BulletList {
    pub const MARKER: &'static str = "- ";

    fn item(line: &str) -> Option<&str> {
        line.trim().strip_prefix(Self::MARKER)
    }
}

pub struct NumberedList;

impl NumberedList {
    fn start_regex() -> &'static Regex {
        static START_REGEX: OnceLock<Regex> = OnceLock::new();
        START_REGEX.get_or_init(|| Regex::new(r"^\(\d+\)").expect("Invalid numbered list regex"))
    }

    fn item_regex() -> &'static Regex {
        static ITEM_REGEX: OnceLock<Regex> = OnceLock::new();
        ITEM_REGEX
            .get_or_init(|| Regex::new(r"^\((\d+)\)\s*(.+)$").expect("Invalid numbered item regex"))
    }

    fn is_item_line(line: &str) -> bool {
        Self::start_regex().is_match(line.trim())
    }

    /// Splits `(12) text` into `12` and `text`. A bare `(12)` has no item.
    pub fn item(line: &str) -> Option<NumberedItem<'_>> {
        let caps = Self::item_regex().captures(line.trim())?;
        Some(NumberedItem {
            number: caps.get(1)?.as_str(),
            text: caps.get(2)?.as_str(),
        })
    }
}

pub fn matches_bullet(line: &str) -> bool {
    BulletList::item(line).is_some()
}

pub fn consume_bullet<'a>(lines: &[&'a str], start: usize) -> (Block<'a>, usize) {
    let items: Vec<&str> = lines[start..]
        .iter()
        .map_while(|&line| BulletList::item(line))
        .collect();
    let next = start + items.len().max(1);
    (Block::BulletList { items }, next)
}

pub fn matches_numbered(line: &str) -> bool {
    NumberedList::is_item_line(line)
}

/// Lines that start like an item but carry no text are consumed without
/// producing an item.
pub fn consume_numbered<'a>(lines: &[&'a str], start: usize) -> (Block<'a>, usize) {
    let run = lines[start..]
        .iter()
        .take_while(|line| NumberedList::is_item_line(line))
        .count()
        .max(1);
    let items = lines[start..start + run]
        .iter()
        .filter_map(|&line| NumberedList::item(line))
        .collect();
    (Block::NumberedList { items }, start + run)
}
