use std::ops::Range;

/// One item of a `(n) text` list. The number is kept exactly as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberedItem<'a> {
    pub number: &'a str,
    pub text: &'a str,
}

/// A pipe table. Every data row has exactly `header.len()` cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table<'a> {
    /// `> 表…` line found after the table.
    pub caption: Option<&'a str>,
    pub header: Vec<&'a str>,
    pub rows: Vec<Vec<&'a str>>,
}

impl Table<'_> {
    pub fn columns(&self) -> usize {
        self.header.len()
    }
}

/// `![alt](path)` with the path as written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageRef<'a> {
    pub alt: &'a str,
    pub path: &'a str,
}

/// A classified run of input lines. Text fields borrow from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block<'a> {
    Heading {
        /// 1 to 4.
        level: u8,
        text: &'a str,
    },
    CodeFence {
        /// Info string after the opening fence, if any.
        language: Option<&'a str>,
        body: Vec<&'a str>,
        /// `代码清单N-M` line directly after the closing fence.
        caption: Option<&'a str>,
    },
    Aside {
        /// `None` when an `<aside>` tag is not followed by a marker line.
        title: Option<&'a str>,
        content: Vec<&'a str>,
    },
    BulletList {
        items: Vec<&'a str>,
    },
    NumberedList {
        items: Vec<NumberedItem<'a>>,
    },
    Table(Table<'a>),
    /// `None` when the line starts like an image but is not well formed.
    Image(Option<ImageRef<'a>>),
    Note {
        label: &'a str,
        content: Vec<&'a str>,
    },
    Paragraph {
        text: &'a str,
    },
    Blank,
}

/// A block together with the half-open range of line indices it consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedBlock<'a> {
    /// Name of the rule that produced the block.
    pub rule: &'static str,
    pub block: Block<'a>,
    pub lines: Range<usize>,
}
