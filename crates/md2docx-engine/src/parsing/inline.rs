//! # Inline Parsing
//!
//! The dialect has exactly one inline construct: `**bold**`.
//!
//! Pairs are matched left to right, non-greedily and without nesting. There
//! is no escaping, and a marker without a partner stays in the text as-is.

use regex::Regex;
use std::sync::OnceLock;

/// A run of text that is either emphasized (bold) or plain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineSegment<'a> {
    pub text: &'a str,
    pub emphasized: bool,
}

impl<'a> InlineSegment<'a> {
    pub fn plain(text: &'a str) -> Self {
        Self {
            text,
            emphasized: false,
        }
    }

    pub fn bold(text: &'a str) -> Self {
        Self {
            text,
            emphasized: true,
        }
    }
}

fn bold_regex() -> &'static Regex {
    static BOLD_REGEX: OnceLock<Regex> = OnceLock::new();
    BOLD_REGEX.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").expect("Invalid bold regex"))
}

/// Splits `text` into plain and bold segments, stripping the `**` markers.
///
/// Without any pair the whole input comes back as one plain segment. Empty
/// gaps between pairs produce no segment; an empty pair (`****`) produces an
/// empty bold segment.
pub fn split_bold(text: &str) -> Vec<InlineSegment<'_>> {
    let re = bold_regex();
    let mut segments = Vec::new();
    let mut last_end = 0;

    for caps in re.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last_end {
            segments.push(InlineSegment::plain(&text[last_end..whole.start()]));
        }
        segments.push(InlineSegment::bold(inner.as_str()));
        last_end = whole.end();
    }

    if segments.is_empty() {
        return vec![InlineSegment::plain(text)];
    }

    if last_end < text.len() {
        segments.push(InlineSegment::plain(&text[last_end..]));
    }
    segments
}

/// Concatenation of all segment texts: the input minus the matched markers.
pub fn plain_text(segments: &[InlineSegment<'_>]) -> String {
    segments.iter().map(|s| s.text).collect()
}
