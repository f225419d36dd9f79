use crate::parsing::blocks::types::Block;

pub struct Aside;

impl Aside {
    /// Marker that titles a pitfall callout.
    pub const MARKER: &'static str = "【避坑指南】";
    pub const OPEN_TAG: &'static str = "<aside>";
    pub const CLOSE_TAG: &'static str = "</aside>";

    fn ends_content(line: &str) -> bool {
        let trimmed = line.trim();
        trimmed == Self::CLOSE_TAG || trimmed.starts_with('#') || line.contains(Self::MARKER)
    }
}

pub fn matches(line: &str) -> bool {
    line.trim() == Aside::OPEN_TAG || line.contains(Aside::MARKER)
}

/// Consumes an optional `<aside>` tag, the marker line used as title, the
/// content up to the closing tag (or a heading, or the next marker) and the
/// closing tag itself. Blank lines inside are consumed and dropped.
///
/// An `<aside>` tag whose next line carries no marker consumes only the tag.
pub fn consume<'a>(lines: &[&'a str], start: usize) -> (Block<'a>, usize) {
    let mut i = start;

    if lines[i].trim() == Aside::OPEN_TAG {
        i += 1;
        if !lines.get(i).is_some_and(|line| line.contains(Aside::MARKER)) {
            return (
                Block::Aside {
                    title: None,
                    content: vec![],
                },
                i,
            );
        }
    }

    let title = lines[i];
    i += 1;

    let mut content = Vec::new();
    while i < lines.len() && !Aside::ends_content(lines[i]) {
        if !lines[i].trim().is_empty() {
            content.push(lines[i]);
        }
        i += 1;
    }

    if lines.get(i).is_some_and(|line| line.trim() == Aside::CLOSE_TAG) {
        i += 1;
    }

    (
        Block::Aside {
            title: Some(title),
            content,
        },
        i,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn detects_tag_and_marker() {
        assert!(matches("<aside>"));
        assert!(matches("  <aside>  "));
        assert!(matches("【避坑指南】不要这样做"));
        assert!(!matches("<aside class=x>"));
    }

    #[test]
    fn tagged_aside() {
        let lines = [
            "<aside>",
            "【避坑指南】",
            "first **tip**",
            "",
            "| not a table |",
            "</aside>",
            "after",
        ];
        let (block, next) = consume(&lines, 0);
        assert_eq!(
            block,
            Block::Aside {
                title: Some("【避坑指南】"),
                content: vec!["first **tip**", "| not a table |"],
            }
        );
        assert_eq!(next, 6);
    }

    #[test]
    fn bare_marker_ends_at_heading() {
        let lines = ["【避坑指南】", "tip", "## Next"];
        let (block, next) = consume(&lines, 0);
        assert_eq!(
            block,
            Block::Aside {
                title: Some("【避坑指南】"),
                content: vec!["tip"],
            }
        );
        assert_eq!(next, 2);
    }

    #[test]
    fn repeated_marker_starts_a_new_aside() {
        let lines = ["【避坑指南】one", "a", "【避坑指南】two", "b"];
        let (_, next) = consume(&lines, 0);
        assert_eq!(next, 2);
    }

    #[test]
    fn tag_without_marker_consumes_only_the_tag() {
        let lines = ["<aside>", "plain", "</aside>"];
        let (block, next) = consume(&lines, 0);
        assert_eq!(
            block,
            Block::Aside {
                title: None,
                content: vec![],
            }
        );
        assert_eq!(next, 1);
    }

    #[test]
    fn tag_at_end_of_input() {
        let lines = ["<aside>"];
        let (_, next) = consume(&lines, 0);
        assert_eq!(next, 1);
    }
}
