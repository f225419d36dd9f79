use regex::Regex;
use std::sync::OnceLock;

use crate::parsing::blocks::types::Block;

pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";

    /// A listing caption such as `代码清单3-2 配置示例`.
    pub fn is_listing_caption(line: &str) -> bool {
        static LISTING_REGEX: OnceLock<Regex> = OnceLock::new();
        LISTING_REGEX
            .get_or_init(|| Regex::new(r"^代码清单\d+-\d+").expect("Invalid listing regex"))
            .is_match(line)
    }
}

pub fn matches(line: &str) -> bool {
    line.starts_with(CodeFence::BACKTICKS)
}

/// Consumes the opening fence, the body, the closing fence and an optional
/// listing caption right after it. An unterminated fence runs to the end of
/// the input.
pub fn consume<'a>(lines: &[&'a str], start: usize) -> (Block<'a>, usize) {
    let info = lines[start]
        .get(CodeFence::BACKTICKS.len()..)
        .unwrap_or_default()
        .trim();
    let language = (!info.is_empty()).then_some(info);

    let mut i = start + 1;
    let mut body = Vec::new();
    while i < lines.len() && !lines[i].starts_with(CodeFence::BACKTICKS) {
        body.push(lines[i]);
        i += 1;
    }
    // closing fence
    i = (i + 1).min(lines.len());

    let caption = match lines.get(i).copied() {
        Some(line) if CodeFence::is_listing_caption(line) => {
            i += 1;
            Some(line)
        }
        _ => None,
    };

    (
        Block::CodeFence {
            language,
            body,
            caption,
        },
        i,
    )
}
