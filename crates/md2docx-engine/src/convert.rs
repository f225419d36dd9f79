use std::path::{Path, PathBuf};

use crate::docx::{Template, save_docx};
use crate::emit::{EmitSummary, Emitter};
use crate::error::ConvertError;
use crate::io::{document_dir, read_document};
use crate::models::Document;
use crate::parsing::{parse_lines, split_lines};
use crate::sink::DocumentSink;
use crate::styles::StyleTable;

/// Direct formatting for fenced code lines.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeStyle {
    pub font: String,
    pub size_pt: f32,
    /// Paragraph fill as `RRGGBB`.
    pub shading: String,
}

impl Default for CodeStyle {
    fn default() -> Self {
        Self {
            font: "Courier New".to_string(),
            size_pt: 9.0,
            shading: "F5F5F5".to_string(),
        }
    }
}

/// Fills for the pitfall callout: a dark title bar over a light body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsideStyle {
    pub title_shading: String,
    pub body_shading: String,
}

impl Default for AsideStyle {
    fn default() -> Self {
        Self {
            title_shading: "E36C09".to_string(),
            body_shading: "FDE9D9".to_string(),
        }
    }
}

/// Formatting knobs that are not part of the template.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    pub code: CodeStyle,
    pub aside: AsideStyle,
    pub image_width_inches: f32,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            code: CodeStyle::default(),
            aside: AsideStyle::default(),
            image_width_inches: 6.0,
        }
    }
}

/// Outcome of a file conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub output: PathBuf,
    pub summary: EmitSummary,
}

/// Classifies `lines` and emits every block into `sink`, in order.
pub fn convert_lines<S: DocumentSink>(
    lines: &[&str],
    sink: &mut S,
    styles: &StyleTable,
    options: &ConvertOptions,
    base_dir: &Path,
) -> EmitSummary {
    let mut emitter = Emitter::new(sink, styles, options, base_dir);
    for parsed in parse_lines(lines) {
        log::debug!(
            "{} block at lines {}..{}",
            parsed.rule,
            parsed.lines.start + 1,
            parsed.lines.end
        );
        emitter.emit(&parsed.block);
    }
    emitter.summary()
}

/// Converts document text into a fresh document on `template`.
pub fn convert_text(
    text: &str,
    template: &Template,
    options: &ConvertOptions,
    base_dir: &Path,
) -> (Document, EmitSummary) {
    let styles = StyleTable::build(template.catalog());
    let mut document = template.new_document();
    document.reset_content();

    let lines = split_lines(text);
    let summary = convert_lines(&lines, &mut document, &styles, options, base_dir);
    (document, summary)
}

/// Reads `input`, converts it on the template at `template_path` and writes
/// the package to `output`.
pub fn convert_file(
    input: &Path,
    template_path: &Path,
    output: &Path,
    options: &ConvertOptions,
) -> Result<ConversionReport, ConvertError> {
    let text = read_document(input)?;
    let template = Template::open(template_path)?;

    let (document, summary) = convert_text(&text, &template, options, &document_dir(input));
    save_docx(&template, &document, output)?;

    log::info!(
        "Converted {} blocks ({} images, {} placeholders, {} style fallbacks) into {}",
        summary.blocks,
        summary.images,
        summary.placeholders,
        summary.fallbacks,
        output.display()
    );
    Ok(ConversionReport {
        output: output.to_path_buf(),
        summary,
    })
}
