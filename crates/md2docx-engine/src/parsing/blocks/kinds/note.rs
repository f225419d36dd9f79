use crate::parsing::blocks::types::Block;

pub struct Note;

impl Note {
    /// Stand-alone label lines that open a note ("caution", "tip").
    pub const LABELS: [&'static str; 2] = ["注意", "提示"];

    fn continues(line: &str) -> bool {
        !line.trim().is_empty() && !line.starts_with('#') && !line.starts_with('<')
    }
}

pub fn matches(line: &str) -> bool {
    Note::LABELS.contains(&line.trim())
}

/// Consumes the label and every following line up to a blank line, a
/// heading or a tag.
pub fn consume<'a>(lines: &[&'a str], start: usize) -> (Block<'a>, usize) {
    let label = lines[start].trim();
    let content: Vec<&str> = lines[start + 1..]
        .iter()
        .copied()
        .take_while(|line| Note::continues(line))
        .collect();
    let next = start + 1 + content.len();
    (Block::Note { label, content }, next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn label_must_stand_alone() {
        assert!(matches("注意"));
        assert!(matches("  提示 "));
        assert!(!matches("注意：这里"));
    }

    #[test]
    fn content_runs_to_blank_line() {
        let lines = ["注意", "one", "**two**", "", "after"];
        let (block, next) = consume(&lines, 0);
        assert_eq!(
            block,
            Block::Note {
                label: "注意",
                content: vec!["one", "**two**"],
            }
        );
        assert_eq!(next, 3);
    }

    #[test]
    fn content_stops_at_heading_and_tag() {
        let lines = ["提示", "one", "# Heading"];
        assert_eq!(consume(&lines, 0).1, 2);

        let lines = ["提示", "<aside>"];
        let (block, next) = consume(&lines, 0);
        assert_eq!(
            block,
            Block::Note {
                label: "提示",
                content: vec![],
            }
        );
        assert_eq!(next, 1);
    }
}
