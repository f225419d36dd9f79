use regex::Regex;
use std::sync::OnceLock;

use crate::parsing::blocks::types::{Block, ImageRef};

pub struct Image;

impl Image {
    pub const OPENER: &'static str = "![";

    /// Extracts alt text and path from the first `![alt](path)` on the line.
    pub fn parse(line: &str) -> Option<ImageRef<'_>> {
        static IMAGE_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = IMAGE_REGEX
            .get_or_init(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").expect("Invalid image regex"));
        let caps = re.captures(line)?;
        Some(ImageRef {
            alt: caps.get(1)?.as_str(),
            path: caps.get(2)?.as_str(),
        })
    }
}

pub fn matches(line: &str) -> bool {
    line.starts_with(Image::OPENER)
}

pub fn consume<'a>(lines: &[&'a str], start: usize) -> (Block<'a>, usize) {
    (Block::Image(Image::parse(lines[start])), start + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_alt_and_path() {
        assert_eq!(
            Image::parse("![图 1-1 架构](images/arch.png)"),
            Some(ImageRef {
                alt: "图 1-1 架构",
                path: "images/arch.png"
            })
        );
    }

    #[test]
    fn empty_alt_is_allowed() {
        assert_eq!(
            Image::parse("![](a.png)"),
            Some(ImageRef {
                alt: "",
                path: "a.png"
            })
        );
    }

    #[test]
    fn malformed_markup_still_consumes_the_line() {
        let lines = ["![broken", "next"];
        let (block, next) = consume(&lines, 0);
        assert_eq!(block, Block::Image(None));
        assert_eq!(next, 1);
    }

    #[test]
    fn must_start_the_line() {
        assert!(matches("![a](b)"));
        assert!(!matches(" ![a](b)"));
    }
}
