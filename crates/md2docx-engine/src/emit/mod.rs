//! # Emission
//!
//! Turns parsed [`Block`]s into [`DocumentSink`] calls.
//!
//! Styles come from a prebuilt [`StyleTable`]. A style that is absent from
//! the template, or that the sink rejects, never stops emission: each call
//! site falls back to direct formatting (or to nothing) and moves on.
//!
//! ## Modules
//!
//! - **`figures`**: tables, images and notes, the blocks that produce
//!   tables or pictures rather than plain paragraphs

mod figures;

use std::path::Path;

use crate::convert::ConvertOptions;
use crate::parsing::blocks::{Block, NumberedItem};
use crate::parsing::inline::split_bold;
use crate::sink::{DocumentSink, Indent, ParagraphId, Rgb};
use crate::styles::{StyleKey, StyleTable};

/// Counters collected while emitting a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitSummary {
    /// Blocks that produced output.
    pub blocks: usize,
    pub images: usize,
    /// Missing or unreadable images replaced by a text placeholder.
    pub placeholders: usize,
    /// Styles or shadings that fell back to direct formatting.
    pub fallbacks: usize,
}

/// How the bold resolver's plain segments are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Plain {
    /// Plain runs carry no bold setting and inherit from the style.
    Inherit,
    /// Plain runs are explicitly not bold.
    Explicit,
}

pub struct Emitter<'a, S: DocumentSink> {
    sink: &'a mut S,
    styles: &'a StyleTable,
    options: &'a ConvertOptions,
    /// Directory relative image paths are resolved against.
    base_dir: &'a Path,
    summary: EmitSummary,
}

impl<'a, S: DocumentSink> Emitter<'a, S> {
    pub fn new(
        sink: &'a mut S,
        styles: &'a StyleTable,
        options: &'a ConvertOptions,
        base_dir: &'a Path,
    ) -> Self {
        Self {
            sink,
            styles,
            options,
            base_dir,
            summary: EmitSummary::default(),
        }
    }

    pub fn summary(&self) -> EmitSummary {
        self.summary
    }

    pub fn emit(&mut self, block: &Block<'_>) {
        match block {
            Block::Heading { level, text } => self.heading(*level, text),
            Block::CodeFence { body, caption, .. } => self.code_fence(body, *caption),
            Block::Aside { title, content } => match title {
                Some(title) => self.aside(title, content),
                None => return,
            },
            Block::BulletList { items } => self.bullet_list(items),
            Block::NumberedList { items } => self.numbered_list(items),
            Block::Table(table) => self.table(table),
            Block::Image(image) => match image {
                Some(image) => self.image(image.alt, image.path),
                None => return,
            },
            Block::Note { label, content } => self.note(label, content),
            Block::Paragraph { text } => {
                self.formatted_paragraph(text, StyleKey::Normal);
            }
            Block::Blank => return,
        }
        self.summary.blocks += 1;
    }

    /// Applies the resolved style for `key`. Returns whether it took effect.
    fn apply_style(&mut self, paragraph: ParagraphId, key: StyleKey) -> bool {
        let styles = self.styles;
        let Some(name) = styles.get(key) else {
            log::debug!("No {key:?} style in template");
            self.summary.fallbacks += 1;
            return false;
        };
        match self.sink.set_paragraph_style(paragraph, name) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Could not apply {key:?} style: {e}");
                self.summary.fallbacks += 1;
                false
            }
        }
    }

    fn apply_shading(&mut self, paragraph: ParagraphId, fill: &str) {
        if let Err(e) = self.sink.set_paragraph_shading(paragraph, fill) {
            log::warn!("Could not shade paragraph: {e}");
            self.summary.fallbacks += 1;
        }
    }

    /// Adds one run per bold-resolved segment of `text`.
    fn add_segments(&mut self, paragraph: ParagraphId, text: &str, plain: Plain) {
        for segment in split_bold(text) {
            let run = self.sink.add_run(paragraph, segment.text);
            if segment.emphasized || plain == Plain::Explicit {
                self.sink.set_bold(run, segment.emphasized);
            }
        }
    }

    /// A paragraph in style `key` with bold-resolved `text`.
    fn formatted_paragraph(&mut self, text: &str, key: StyleKey) -> ParagraphId {
        let paragraph = self.sink.add_paragraph();
        self.apply_style(paragraph, key);
        self.add_segments(paragraph, text, Plain::Explicit);
        paragraph
    }

    fn heading(&mut self, level: u8, text: &str) {
        let paragraph = self.sink.add_paragraph();
        if let Some(key) = StyleKey::heading(level) {
            self.apply_style(paragraph, key);
        }
        self.add_segments(paragraph, text, Plain::Inherit);
    }

    fn code_fence(&mut self, body: &[&str], caption: Option<&str>) {
        if let Some(caption) = caption {
            self.formatted_paragraph(caption, StyleKey::Caption);
        }

        let options = self.options;
        let code = &options.code;
        for line in body {
            let paragraph = self.sink.add_paragraph();
            self.apply_style(paragraph, StyleKey::NoSpacing);
            self.apply_shading(paragraph, &code.shading);
            if !line.is_empty() {
                let run = self.sink.add_run(paragraph, line);
                self.sink.set_font(run, &code.font, code.size_pt);
            }
        }
    }

    fn aside(&mut self, title: &str, content: &[&str]) {
        let options = self.options;
        let aside = &options.aside;

        let heading = self.sink.add_paragraph();
        self.apply_shading(heading, &aside.title_shading);
        let run = self.sink.add_run(heading, title);
        self.sink.set_bold(run, true);
        self.sink.set_color(run, Rgb::WHITE);

        for line in content.iter().filter(|line| !line.trim().is_empty()) {
            let paragraph = self.sink.add_paragraph();
            self.apply_shading(paragraph, &aside.body_shading);
            self.add_segments(paragraph, line, Plain::Explicit);
        }
    }

    fn bullet_list(&mut self, items: &[&str]) {
        for item in items {
            let paragraph = self.sink.add_paragraph();
            if !self.apply_style(paragraph, StyleKey::BulletList) {
                self.sink.set_indent(paragraph, Indent::HANGING_LIST);
            }
            self.add_segments(paragraph, item, Plain::Explicit);
        }
    }

    /// Numbers are written as text so `(3)` stays `(3)` whatever the
    /// template's numbering definitions say.
    fn numbered_list(&mut self, items: &[NumberedItem<'_>]) {
        for item in items {
            let paragraph = self.sink.add_paragraph();
            self.sink.set_indent(paragraph, Indent::HANGING_LIST);
            self.sink.add_run(paragraph, &format!("({}) ", item.number));
            self.add_segments(paragraph, item.text, Plain::Explicit);
        }
    }
}
