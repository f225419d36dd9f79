//! Whole-document tests for the parsing module.
//!
//! Fixtures (.md) live in `fixtures/`; each test lists the rule sequence the
//! scanner must produce and checks the range invariants.


use pretty_assertions::assert_eq;

use crate::parsing::blocks::{Block, ImageRef, NumberedItem};
use crate::parsing::{parse_lines, split_lines};

fn load_fixture(name: &str) -> String {
    let fixtures_dir = format!("{}/src/parsing/tests/fixtures", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(format!("{fixtures_dir}/{name}.md")).unwrap()
}

fn rules_of(text: &str) -> Vec<&'static str> {
    let lines = split_lines(text);
    let blocks = parse_lines(&lines);
    invariants::check(lines.len(), &blocks);
    blocks
        .iter()
        .map(|b| b.rule)
        .filter(|&rule| rule != "blank")
        .collect()
}

#[test]
fn fixture_chapter() {
    let md = load_fixture("chapter");
    assert_eq!(
        rules_of(&md),
        vec![
            "heading",
            "paragraph",
            "heading",
            "bullet_list",
            "numbered_list",
            "code_fence",
            "table",
            "aside",
            "note",
            "image",
            "image",
        ]
    );
}

#[test]
fn fixture_unterminated_fence_runs_to_end() {
    let md = load_fixture("unterminated");
    assert_eq!(rules_of(&md), vec!["paragraph", "code_fence"]);
}

#[test]
fn chapter_blocks_carry_their_content() {
    let md = load_fixture("chapter");
    let lines = split_lines(&md);
    let blocks: Vec<Block> = parse_lines(&lines)
        .into_iter()
        .map(|b| b.block)
        .filter(|b| *b != Block::Blank)
        .collect();

    assert_eq!(
        blocks[0],
        Block::Heading {
            level: 1,
            text: "第一章 **入门**",
        }
    );
    assert_eq!(
        blocks[4],
        Block::NumberedList {
            items: vec![
                NumberedItem {
                    number: "1",
                    text: "one",
                },
                NumberedItem {
                    number: "12",
                    text: "twelve",
                },
            ],
        }
    );
    assert_eq!(
        blocks[5],
        Block::CodeFence {
            language: Some("rust"),
            body: vec!["fn main() {}"],
            caption: Some("代码清单1-1 hello"),
        }
    );
    let Block::Table(table) = &blocks[6] else {
        panic!("expected a table, got {:?}", blocks[6]);
    };
    assert_eq!(table.header, vec!["Name", "Value"]);
    assert_eq!(table.rows, vec![vec!["a", "**1**"]]);
    assert_eq!(table.caption, Some("表1-1 values"));
    assert_eq!(
        blocks[9],
        Block::Image(Some(ImageRef {
            alt: "A figure",
            path: "images/missing.png",
        }))
    );
    assert_eq!(blocks[10], Block::Image(None));
}

#[test]
fn crlf_line_endings_are_stripped() {
    assert_eq!(split_lines("a\r\nb\r\n"), vec!["a", "b", ""]);
}

#[test]
fn end_to_end_example_blocks() {
    let lines = split_lines("# Title\n\nSome **bold** text.\n");
    let blocks = parse_lines(&lines);
    invariants::check(lines.len(), &blocks);
    assert_eq!(
        blocks.iter().map(|b| &b.block).collect::<Vec<_>>(),
        vec![
            &Block::Heading {
                level: 1,
                text: "Title",
            },
            &Block::Blank,
            &Block::Paragraph {
                text: "Some **bold** text.",
            },
            &Block::Blank,
        ]
    );
}

#[test]
fn every_line_is_covered_for_odd_inputs() {
    for text in [
        "",
        "\n\n\n",
        "<aside>",
        "<aside>\n【避坑指南】",
        "| a |",
        "|a|b|\n|-|-|",
        "注意",
        "```\n```\n```",
        "(x) not numbered\n(1)",
    ] {
        let lines = split_lines(text);
        invariants::check(lines.len(), &parse_lines(&lines));
    }
}
