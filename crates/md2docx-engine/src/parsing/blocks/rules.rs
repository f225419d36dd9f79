use super::kinds::{aside, code_fence, heading, image, list, note, paragraph, table};
use super::types::Block;

/// A classification rule: a predicate over the line at the cursor and the
/// consumer that takes the block's lines once the predicate matched.
pub struct BlockRule {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    /// Returns the block and the index of the first line after it.
    pub consume: for<'a> fn(&[&'a str], usize) -> (Block<'a>, usize),
}

impl std::fmt::Debug for BlockRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockRule").field("name", &self.name).finish()
    }
}

/// Rules in priority order. The first match wins; `paragraph` and `blank`
/// together accept every line, so classification never stalls.
pub static RULES: [BlockRule; 10] = [
    BlockRule {
        name: "heading",
        matches: heading::matches,
        consume: heading::consume,
    },
    BlockRule {
        name: "code_fence",
        matches: code_fence::matches,
        consume: code_fence::consume,
    },
    BlockRule {
        name: "aside",
        matches: aside::matches,
        consume: aside::consume,
    },
    BlockRule {
        name: "bullet_list",
        matches: list::matches_bullet,
        consume: list::consume_bullet,
    },
    BlockRule {
        name: "numbered_list",
        matches: list::matches_numbered,
        consume: list::consume_numbered,
    },
    BlockRule {
        name: "table",
        matches: table::matches,
        consume: table::consume,
    },
    BlockRule {
        name: "image",
        matches: image::matches,
        consume: image::consume,
    },
    BlockRule {
        name: "note",
        matches: note::matches,
        consume: note::consume,
    },
    BlockRule {
        name: "paragraph",
        matches: paragraph::matches,
        consume: paragraph::consume,
    },
    BlockRule {
        name: "blank",
        matches: paragraph::is_blank,
        consume: paragraph::consume_blank,
    },
];

/// The rule that claims `line`.
pub fn rule_for(line: &str) -> &'static BlockRule {
    RULES
        .iter()
        .find(|rule| (rule.matches)(line))
        .unwrap_or(&RULES[RULES.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("# Title", "heading")]
    #[case("```", "code_fence")]
    #[case("<aside>", "aside")]
    #[case("【避坑指南】", "aside")]
    #[case("- item", "bullet_list")]
    #[case("(1) item", "numbered_list")]
    #[case("| a | b |", "table")]
    #[case("![a](b.png)", "image")]
    #[case("注意", "note")]
    #[case("plain text", "paragraph")]
    #[case("", "blank")]
    #[case("   ", "blank")]
    fn classifies_lines(#[case] line: &str, #[case] expected: &str) {
        assert_eq!(rule_for(line).name, expected);
    }

    #[rstest]
    // Headings outrank the aside marker.
    #[case("# 【避坑指南】", "heading")]
    // A fence line is never a list item.
    #[case("```- x", "code_fence")]
    // A list item that looks like a table stays a list.
    #[case("- | a | b |", "bullet_list")]
    // Numbered beats table and paragraph.
    #[case("(2) | a |", "numbered_list")]
    // An indented image is a plain paragraph.
    #[case(" ![a](b)", "paragraph")]
    fn priority_order(#[case] line: &str, #[case] expected: &str) {
        assert_eq!(rule_for(line).name, expected);
    }

    #[test]
    fn rule_names_are_unique() {
        let mut names: Vec<_> = RULES.iter().map(|r| r.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), RULES.len());
    }
}
