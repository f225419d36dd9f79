use super::{Emitter, Plain};
use crate::io::resolve_relative;
use crate::parsing::blocks::Table;
use crate::sink::{Alignment, DocumentSink, TableId};
use crate::styles::StyleKey;

/// Point size of the direct-formatted caption used when no caption style works.
const FALLBACK_CAPTION_PT: f32 = 10.0;

impl<S: DocumentSink> Emitter<'_, S> {
    fn apply_table_style(&mut self, table: TableId) {
        let styles = self.styles;
        let Some(name) = styles.get(StyleKey::TableStyle) else {
            log::debug!("No table style in template");
            self.summary.fallbacks += 1;
            return;
        };
        if let Err(e) = self.sink.set_table_style(table, name) {
            log::warn!("Could not apply table style: {e}");
            self.summary.fallbacks += 1;
        }
    }

    fn cell_text(&mut self, table: TableId, row: usize, column: usize, text: &str) {
        let paragraph = self.sink.add_cell_paragraph(table, row, column);
        if !text.is_empty() {
            self.add_segments(paragraph, text, Plain::Explicit);
        }
    }

    /// The caption goes first even though it follows the table in the source.
    pub(super) fn table(&mut self, table: &Table<'_>) {
        if let Some(caption) = table.caption {
            self.formatted_paragraph(caption, StyleKey::Caption);
        }
        if table.header.is_empty() {
            log::debug!("Skipping table without header cells");
            return;
        }

        let id = self.sink.add_table(table.columns());
        self.apply_table_style(id);

        let header = self.sink.add_table_row(id);
        for (column, cell) in table.header.iter().enumerate() {
            self.cell_text(id, header, column, cell);
        }
        for cells in &table.rows {
            let row = self.sink.add_table_row(id);
            for (column, cell) in cells.iter().take(table.columns()).enumerate() {
                self.cell_text(id, row, column, cell);
            }
        }
    }

    fn placeholder(&mut self, text: &str) {
        let paragraph = self.sink.add_paragraph();
        self.sink.add_run(paragraph, text);
        self.summary.placeholders += 1;
    }

    pub(super) fn image(&mut self, alt: &str, path: &str) {
        let resolved = resolve_relative(self.base_dir, path);
        if !resolved.exists() {
            log::warn!("Image not found: {}", resolved.display());
            self.placeholder(&format!("[Image not found: {}]", resolved.display()));
            return;
        }

        if let Err(e) = self
            .sink
            .add_image(&resolved, self.options.image_width_inches)
        {
            log::warn!("Could not add image {}: {e}", resolved.display());
            self.placeholder(&format!("[Error adding image: {e}]"));
            return;
        }
        self.summary.images += 1;

        if alt.is_empty() {
            return;
        }
        let caption = self.sink.add_paragraph();
        let run = self.sink.add_run(caption, alt);
        if !self.apply_style(caption, StyleKey::Caption) {
            self.sink.set_alignment(caption, Alignment::Center);
            self.sink.set_italic(run, true);
            self.sink.set_font_size(run, FALLBACK_CAPTION_PT);
        }
    }

    /// The label becomes a quote-styled paragraph; the content is boxed in a
    /// one-cell table.
    pub(super) fn note(&mut self, label: &str, content: &[&str]) {
        let paragraph = self.sink.add_paragraph();
        let run = self.sink.add_run(paragraph, label);
        if !self.apply_style(paragraph, StyleKey::IntenseQuote) {
            self.sink.set_bold(run, true);
        }

        if content.is_empty() {
            return;
        }
        let table = self.sink.add_table(1);
        self.apply_table_style(table);
        let row = self.sink.add_table_row(table);
        for line in content {
            let paragraph = self.sink.add_cell_paragraph(table, row, 0);
            self.add_segments(paragraph, line, Plain::Explicit);
            self.apply_style(paragraph, StyleKey::Quote);
        }
    }
}
