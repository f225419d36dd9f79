use std::path::Path;

use crate::error::FormatError;
use crate::models::Picture;
use crate::sink::{Alignment, DocumentSink, Indent, ParagraphId, Rgb, RunId, TableId};
use crate::styles::{Lookup, StyleCatalog, StyleKind};

#[derive(Debug, Clone, PartialEq)]
pub enum RunContent {
    Text(String),
    /// Index into [`Document::pictures`].
    Picture(usize),
}

/// Character formatting is tri-state: `None` inherits from the style,
/// `Some(false)` switches it off explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub content: RunContent,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub color: Option<Rgb>,
    pub font: Option<String>,
    pub size_pt: Option<f32>,
}

impl Run {
    fn new(content: RunContent) -> Self {
        Self {
            content,
            bold: None,
            italic: None,
            color: None,
            font: None,
            size_pt: None,
        }
    }

    pub fn text(&self) -> &str {
        match &self.content {
            RunContent::Text(text) => text,
            RunContent::Picture(_) => "",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    /// Style id as referenced by `w:pStyle`.
    pub style_id: Option<String>,
    pub shading: Option<String>,
    pub alignment: Option<Alignment>,
    pub indent: Option<Indent>,
    pub runs: Vec<RunId>,
}

/// A grid of cells, each holding zero or more paragraphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub style_id: Option<String>,
    pub columns: usize,
    pub rows: Vec<Vec<Vec<ParagraphId>>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyItem {
    Paragraph(ParagraphId),
    Table(TableId),
}

/// In-memory document built on a template's style catalog.
///
/// Paragraphs, runs and tables live in flat arenas addressed by the handles
/// [`DocumentSink`] hands out; `body` records their order at the top level.
/// Paragraphs that belong to table cells are referenced from the table only.
#[derive(Debug, Clone, Default)]
pub struct Document {
    catalog: StyleCatalog,
    body: Vec<BodyItem>,
    paragraphs: Vec<Paragraph>,
    runs: Vec<Run>,
    tables: Vec<Table>,
    pictures: Vec<Picture>,
}

impl Document {
    pub fn new(catalog: StyleCatalog) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    pub fn catalog(&self) -> &StyleCatalog {
        &self.catalog
    }

    pub fn body(&self) -> &[BodyItem] {
        &self.body
    }

    pub fn paragraph(&self, id: ParagraphId) -> &Paragraph {
        &self.paragraphs[id.0]
    }

    pub fn run(&self, id: RunId) -> &Run {
        &self.runs[id.0]
    }

    pub fn table(&self, id: TableId) -> &Table {
        &self.tables[id.0]
    }

    pub fn pictures(&self) -> &[Picture] {
        &self.pictures
    }

    /// Concatenated run text of a paragraph.
    pub fn paragraph_text(&self, id: ParagraphId) -> String {
        self.paragraph(id)
            .runs
            .iter()
            .map(|&run| self.run(run).text())
            .collect()
    }

    /// Top-level paragraphs in body order, skipping tables.
    pub fn body_paragraphs(&self) -> impl Iterator<Item = ParagraphId> + '_ {
        self.body.iter().filter_map(|item| match item {
            BodyItem::Paragraph(id) => Some(*id),
            BodyItem::Table(_) => None,
        })
    }

    /// Resolves a style name to its id, checking the kind.
    fn style_id(&self, name: &str, kind: StyleKind) -> Result<String, FormatError> {
        match self.catalog.lookup(name, kind) {
            Lookup::Found(entry) => Ok(entry.id.clone()),
            Lookup::WrongKind => Err(FormatError::WrongStyleKind {
                name: name.to_string(),
                expected: match kind {
                    StyleKind::Paragraph => "paragraph",
                    StyleKind::Character => "character",
                    StyleKind::Table => "table",
                    StyleKind::Numbering => "numbering",
                },
            }),
            Lookup::Missing => Err(FormatError::UnknownStyle {
                name: name.to_string(),
            }),
        }
    }

    fn new_paragraph(&mut self) -> ParagraphId {
        self.paragraphs.push(Paragraph::default());
        ParagraphId(self.paragraphs.len() - 1)
    }

    fn push_run(&mut self, paragraph: ParagraphId, content: RunContent) -> RunId {
        self.runs.push(Run::new(content));
        let id = RunId(self.runs.len() - 1);
        self.paragraphs[paragraph.0].runs.push(id);
        id
    }
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 6 && value.chars().all(|c| c.is_ascii_hexdigit())
}

impl DocumentSink for Document {
    fn reset_content(&mut self) {
        self.body.clear();
        self.paragraphs.clear();
        self.runs.clear();
        self.tables.clear();
        self.pictures.clear();
    }

    fn add_paragraph(&mut self) -> ParagraphId {
        let id = self.new_paragraph();
        self.body.push(BodyItem::Paragraph(id));
        id
    }

    fn add_run(&mut self, paragraph: ParagraphId, text: &str) -> RunId {
        self.push_run(paragraph, RunContent::Text(text.to_string()))
    }

    fn set_bold(&mut self, run: RunId, bold: bool) {
        self.runs[run.0].bold = Some(bold);
    }

    fn set_italic(&mut self, run: RunId, italic: bool) {
        self.runs[run.0].italic = Some(italic);
    }

    fn set_color(&mut self, run: RunId, color: Rgb) {
        self.runs[run.0].color = Some(color);
    }

    fn set_font(&mut self, run: RunId, name: &str, size_pt: f32) {
        let run = &mut self.runs[run.0];
        run.font = Some(name.to_string());
        run.size_pt = Some(size_pt);
    }

    fn set_font_size(&mut self, run: RunId, size_pt: f32) {
        self.runs[run.0].size_pt = Some(size_pt);
    }

    fn set_paragraph_style(
        &mut self,
        paragraph: ParagraphId,
        style: &str,
    ) -> Result<(), FormatError> {
        let id = self.style_id(style, StyleKind::Paragraph)?;
        self.paragraphs[paragraph.0].style_id = Some(id);
        Ok(())
    }

    fn set_paragraph_shading(
        &mut self,
        paragraph: ParagraphId,
        fill: &str,
    ) -> Result<(), FormatError> {
        if !is_hex_color(fill) {
            return Err(FormatError::InvalidColor(fill.to_string()));
        }
        self.paragraphs[paragraph.0].shading = Some(fill.to_ascii_uppercase());
        Ok(())
    }

    fn set_alignment(&mut self, paragraph: ParagraphId, alignment: Alignment) {
        self.paragraphs[paragraph.0].alignment = Some(alignment);
    }

    fn set_indent(&mut self, paragraph: ParagraphId, indent: Indent) {
        self.paragraphs[paragraph.0].indent = Some(indent);
    }

    fn add_table(&mut self, columns: usize) -> TableId {
        self.tables.push(Table {
            style_id: None,
            columns,
            rows: Vec::new(),
        });
        let id = TableId(self.tables.len() - 1);
        self.body.push(BodyItem::Table(id));
        id
    }

    fn set_table_style(&mut self, table: TableId, style: &str) -> Result<(), FormatError> {
        let id = self.style_id(style, StyleKind::Table)?;
        self.tables[table.0].style_id = Some(id);
        Ok(())
    }

    fn add_table_row(&mut self, table: TableId) -> usize {
        let table = &mut self.tables[table.0];
        table.rows.push(vec![Vec::new(); table.columns]);
        table.rows.len() - 1
    }

    fn add_cell_paragraph(&mut self, table: TableId, row: usize, column: usize) -> ParagraphId {
        let id = self.new_paragraph();
        self.tables[table.0].rows[row][column].push(id);
        id
    }

    fn add_image(&mut self, path: &Path, width_inches: f32) -> Result<ParagraphId, FormatError> {
        let picture = Picture::load(path, width_inches)?;
        self.pictures.push(picture);
        let index = self.pictures.len() - 1;

        let paragraph = self.add_paragraph();
        self.push_run(paragraph, RunContent::Picture(index));
        Ok(paragraph)
    }
}
