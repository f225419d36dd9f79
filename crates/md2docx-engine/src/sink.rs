//! The capability the emitter builds output through.
//!
//! Handles are plain indices into the sink's own storage, so the emitter
//! never holds borrows into the document while it keeps appending.

use std::path::Path;

use crate::error::FormatError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParagraphId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// `w:jc` value.
    pub fn as_xml(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justify => "both",
        }
    }
}

/// Paragraph indentation in inches. A negative first line is a hanging indent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indent {
    pub left: f32,
    pub first_line: f32,
}

impl Indent {
    /// Left 0.5", first line -0.25": the manual list layout.
    pub const HANGING_LIST: Indent = Indent {
        left: 0.5,
        first_line: -0.25,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xFF, 0xFF, 0xFF);

    pub fn hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Incremental builder for a structured document.
///
/// Only the style, shading and image setters can fail. Everything else
/// operates on handles the sink itself returned.
pub trait DocumentSink {
    /// Drops all body content (paragraphs, tables, pictures) while keeping
    /// styles and section settings.
    fn reset_content(&mut self);

    fn add_paragraph(&mut self) -> ParagraphId;
    fn add_run(&mut self, paragraph: ParagraphId, text: &str) -> RunId;
    fn set_bold(&mut self, run: RunId, bold: bool);
    fn set_italic(&mut self, run: RunId, italic: bool);
    fn set_color(&mut self, run: RunId, color: Rgb);
    fn set_font(&mut self, run: RunId, name: &str, size_pt: f32);
    fn set_font_size(&mut self, run: RunId, size_pt: f32);

    /// Applies a paragraph style by display name or style id.
    fn set_paragraph_style(&mut self, paragraph: ParagraphId, style: &str)
    -> Result<(), FormatError>;
    /// Fills the paragraph background; `fill` is an `RRGGBB` hex string.
    fn set_paragraph_shading(&mut self, paragraph: ParagraphId, fill: &str)
    -> Result<(), FormatError>;
    fn set_alignment(&mut self, paragraph: ParagraphId, alignment: Alignment);
    fn set_indent(&mut self, paragraph: ParagraphId, indent: Indent);

    fn add_table(&mut self, columns: usize) -> TableId;
    fn set_table_style(&mut self, table: TableId, style: &str) -> Result<(), FormatError>;
    /// Appends an empty row and returns its index.
    fn add_table_row(&mut self, table: TableId) -> usize;
    fn add_cell_paragraph(&mut self, table: TableId, row: usize, column: usize) -> ParagraphId;

    /// Appends a paragraph holding the picture at `path`, scaled to
    /// `width_inches` with its aspect ratio kept.
    fn add_image(&mut self, path: &Path, width_inches: f32) -> Result<ParagraphId, FormatError>;
}
