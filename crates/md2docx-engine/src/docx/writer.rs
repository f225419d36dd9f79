use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use html_escape::{encode_double_quoted_attribute, encode_text};
use zip::ZipWriter;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;

use super::{
    CONTENT_TYPES_PART, DOCUMENT_PART, DOCUMENT_RELS_PART, DocumentShell, NS_CT, NS_R, NS_RELS,
    PACKAGE_RELS_PART, Template,
};
use crate::error::ConvertError;
use crate::models::{BodyItem, Document, Picture, Run, RunContent};
use crate::sink::{ParagraphId, RunId, TableId};

const NS_WP: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_PIC: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";
const REL_IMAGE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";

const MAIN_DOCUMENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
const MAIN_TEMPLATE_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.template.main+xml";

/// Text width of a Letter page with 1" margins, in twentieths of a point.
const TEXT_WIDTH_TWIPS: u32 = 9360;
const TWIPS_PER_INCH: f32 = 1440.0;

/// Where a picture lands in the package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPart {
    /// Zip entry name, e.g. `word/media/image1.png`.
    pub part_name: String,
    /// Relationship id referenced by the drawing's `r:embed`.
    pub rel_id: String,
}

impl MediaPart {
    fn target(&self) -> &str {
        self.part_name.strip_prefix("word/").unwrap_or(&self.part_name)
    }
}

/// Picks a part name and relationship id for every picture, avoiding names
/// and ids the template already uses.
pub fn plan_media(template: &Template, pictures: &[Picture]) -> Vec<MediaPart> {
    let rels = template
        .part(DOCUMENT_RELS_PART)
        .map(String::from_utf8_lossy)
        .unwrap_or_default();
    let taken_part = |name: &str| template.part(name).is_some();
    let taken_id = |id: &str| rels.contains(&format!("Id=\"{id}\""));

    let mut media = Vec::with_capacity(pictures.len());
    let mut n = 1;
    for picture in pictures {
        let (part_name, rel_id) = loop {
            let part_name = format!("word/media/image{n}.{}", picture.extension);
            let rel_id = format!("rIdImage{n}");
            n += 1;
            if !taken_part(&part_name) && !taken_id(&rel_id) {
                break (part_name, rel_id);
            }
        };
        media.push(MediaPart { part_name, rel_id });
    }
    media
}

/// Whether `c` may appear in XML 1.0 character data.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..)
}

/// Drops control characters XML 1.0 forbids (form feeds, escapes and the
/// like); a single one would make the whole part unreadable.
fn xml_chars(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().filter(|&c| is_xml_char(c)).collect())
    }
}

fn twips(inches: f32) -> i64 {
    (inches * TWIPS_PER_INCH).round() as i64
}

struct BodyWriter<'d> {
    doc: &'d Document,
    media: &'d [MediaPart],
    out: String,
}

impl BodyWriter<'_> {
    fn paragraph(&mut self, id: ParagraphId) {
        let paragraph = self.doc.paragraph(id);
        self.out.push_str("<w:p>");

        let mut props = String::new();
        if let Some(style) = &paragraph.style_id {
            props.push_str(&format!(
                r#"<w:pStyle w:val="{}"/>"#,
                encode_double_quoted_attribute(style)
            ));
        }
        if let Some(fill) = &paragraph.shading {
            props.push_str(&format!(
                r#"<w:shd w:val="clear" w:color="auto" w:fill="{fill}"/>"#
            ));
        }
        if let Some(indent) = paragraph.indent {
            let first_line = twips(indent.first_line);
            let first_line = if first_line < 0 {
                format!(r#" w:hanging="{}""#, -first_line)
            } else {
                format!(r#" w:firstLine="{first_line}""#)
            };
            props.push_str(&format!(
                r#"<w:ind w:left="{}"{first_line}/>"#,
                twips(indent.left)
            ));
        }
        if let Some(alignment) = paragraph.alignment {
            props.push_str(&format!(r#"<w:jc w:val="{}"/>"#, alignment.as_xml()));
        }
        if !props.is_empty() {
            self.out.push_str("<w:pPr>");
            self.out.push_str(&props);
            self.out.push_str("</w:pPr>");
        }

        for &run in &paragraph.runs {
            self.run(run);
        }
        self.out.push_str("</w:p>");
    }

    fn run(&mut self, id: RunId) {
        let run = self.doc.run(id);
        self.out.push_str("<w:r>");
        self.run_properties(run);
        match &run.content {
            RunContent::Text(text) => {
                for (i, piece) in text.split('\t').enumerate() {
                    if i > 0 {
                        self.out.push_str("<w:tab/>");
                    }
                    if !piece.is_empty() {
                        self.out.push_str(r#"<w:t xml:space="preserve">"#);
                        self.out.push_str(&encode_text(&xml_chars(piece)));
                        self.out.push_str("</w:t>");
                    }
                }
            }
            RunContent::Picture(index) => self.drawing(*index),
        }
        self.out.push_str("</w:r>");
    }

    fn run_properties(&mut self, run: &Run) {
        let mut props = String::new();
        if let Some(font) = &run.font {
            let font = encode_double_quoted_attribute(font);
            props.push_str(&format!(
                r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:cs="{font}"/>"#
            ));
        }
        match run.bold {
            Some(true) => props.push_str("<w:b/>"),
            Some(false) => props.push_str(r#"<w:b w:val="0"/>"#),
            None => {}
        }
        match run.italic {
            Some(true) => props.push_str("<w:i/>"),
            Some(false) => props.push_str(r#"<w:i w:val="0"/>"#),
            None => {}
        }
        if let Some(color) = run.color {
            props.push_str(&format!(r#"<w:color w:val="{}"/>"#, color.hex()));
        }
        if let Some(size) = run.size_pt {
            let half_points = (size * 2.0).round() as u32;
            props.push_str(&format!(
                r#"<w:sz w:val="{half_points}"/><w:szCs w:val="{half_points}"/>"#
            ));
        }
        if !props.is_empty() {
            self.out.push_str("<w:rPr>");
            self.out.push_str(&props);
            self.out.push_str("</w:rPr>");
        }
    }

    fn drawing(&mut self, index: usize) {
        let picture = &self.doc.pictures()[index];
        let Some(media) = self.media.get(index) else {
            return;
        };
        let id = index + 1;
        let name = encode_double_quoted_attribute(&picture.name);
        let (cx, cy) = (picture.width_emu, picture.height_emu);
        self.out.push_str(&format!(
            concat!(
                r#"<w:drawing><wp:inline distT="0" distB="0" distL="0" distR="0" xmlns:wp="{wp}">"#,
                r#"<wp:extent cx="{cx}" cy="{cy}"/>"#,
                r#"<wp:docPr id="{id}" name="Picture {id}" descr="{name}"/>"#,
                r#"<wp:cNvGraphicFramePr><a:graphicFrameLocks xmlns:a="{a}" noChangeAspect="1"/></wp:cNvGraphicFramePr>"#,
                r#"<a:graphic xmlns:a="{a}"><a:graphicData uri="{pic}">"#,
                r#"<pic:pic xmlns:pic="{pic}">"#,
                r#"<pic:nvPicPr><pic:cNvPr id="0" name="{name}"/><pic:cNvPicPr/></pic:nvPicPr>"#,
                r#"<pic:blipFill><a:blip xmlns:r="{r}" r:embed="{rel}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#,
                r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
                r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr>"#,
                r#"</pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing>"#
            ),
            wp = NS_WP,
            a = NS_A,
            pic = NS_PIC,
            r = NS_R,
            rel = media.rel_id,
            cx = cx,
            cy = cy,
            id = id,
            name = name,
        ));
    }

    fn table(&mut self, id: TableId) {
        let table = self.doc.table(id);
        let columns = table.columns.max(1);
        let column_width = TEXT_WIDTH_TWIPS / columns as u32;

        self.out.push_str("<w:tbl><w:tblPr>");
        if let Some(style) = &table.style_id {
            self.out.push_str(&format!(
                r#"<w:tblStyle w:val="{}"/>"#,
                encode_double_quoted_attribute(style)
            ));
        }
        self.out.push_str(r#"<w:tblW w:w="0" w:type="auto"/>"#);
        self.out.push_str(r#"<w:tblLook w:val="04A0" w:firstRow="1" w:lastRow="0" w:firstColumn="1" w:lastColumn="0" w:noHBand="0" w:noVBand="1"/>"#);
        self.out.push_str("</w:tblPr><w:tblGrid>");
        for _ in 0..columns {
            self.out
                .push_str(&format!(r#"<w:gridCol w:w="{column_width}"/>"#));
        }
        self.out.push_str("</w:tblGrid>");

        for row in &table.rows {
            self.out.push_str("<w:tr>");
            for cell in row {
                self.out.push_str(&format!(
                    r#"<w:tc><w:tcPr><w:tcW w:w="{column_width}" w:type="dxa"/></w:tcPr>"#
                ));
                // A cell must hold at least one paragraph.
                if cell.is_empty() {
                    self.out.push_str("<w:p/>");
                }
                for &paragraph in cell {
                    self.paragraph(paragraph);
                }
                self.out.push_str("</w:tc>");
            }
            self.out.push_str("</w:tr>");
        }
        self.out.push_str("</w:tbl>");
    }
}

/// Serializes `doc` into the template's document shell.
pub fn render_document(shell: &DocumentShell, doc: &Document, media: &[MediaPart]) -> String {
    let mut writer = BodyWriter {
        doc,
        media,
        out: String::with_capacity(shell.head.len() + shell.tail.len() + 4096),
    };
    writer.out.push_str(&shell.head);
    for item in doc.body() {
        match *item {
            BodyItem::Paragraph(id) => writer.paragraph(id),
            BodyItem::Table(id) => writer.table(id),
        }
    }
    writer.out.push_str(&shell.section);
    writer.out.push_str(&shell.tail);
    writer.out
}

fn insert_before_closing(xml: &str, closing: &str, addition: &str) -> Option<String> {
    let at = xml.rfind(closing)?;
    let mut out = String::with_capacity(xml.len() + addition.len());
    out.push_str(&xml[..at]);
    out.push_str(addition);
    out.push_str(&xml[at..]);
    Some(out)
}

/// The template's document relationships plus one image relationship per
/// picture.
pub fn render_document_rels(existing: Option<&[u8]>, media: &[MediaPart]) -> String {
    let additions: String = media
        .iter()
        .map(|m| {
            format!(
                r#"<Relationship Id="{}" Type="{REL_IMAGE}" Target="{}"/>"#,
                m.rel_id,
                encode_double_quoted_attribute(m.target())
            )
        })
        .collect();

    existing
        .map(String::from_utf8_lossy)
        .and_then(|xml| insert_before_closing(&xml, "</Relationships>", &additions))
        .unwrap_or_else(|| {
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{NS_RELS}">{additions}</Relationships>"#
            )
        })
}

/// The template's content-type map, with a `Default` entry for every
/// picture extension it does not cover yet.
pub fn render_content_types(existing: Option<&[u8]>, pictures: &[Picture]) -> String {
    let base = existing
        .map(|xml| String::from_utf8_lossy(xml).into_owned())
        .filter(|xml| xml.contains("</Types>"))
        .unwrap_or_else(|| {
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="{NS_CT}"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="{MAIN_DOCUMENT_TYPE}"/></Types>"#
            )
        });

    // A .dotx template declares its main part as a template.
    let base = base.replace(MAIN_TEMPLATE_TYPE, MAIN_DOCUMENT_TYPE);

    let lowered = base.to_ascii_lowercase();
    let mut additions = String::new();
    let mut seen: Vec<&str> = Vec::new();
    for picture in pictures {
        let ext = picture.extension.as_str();
        if seen.contains(&ext) || lowered.contains(&format!("extension=\"{ext}\"")) {
            continue;
        }
        seen.push(ext);
        additions.push_str(&format!(
            r#"<Default Extension="{ext}" ContentType="{}"/>"#,
            picture.content_type
        ));
    }

    insert_before_closing(&base, "</Types>", &additions).unwrap_or(base)
}

fn package_rels() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{NS_RELS}"><Relationship Id="rId1" Type="{REL_OFFICE_DOCUMENT}" Target="word/document.xml"/></Relationships>"#
    )
}

fn is_regenerated(name: &str) -> bool {
    [DOCUMENT_PART, DOCUMENT_RELS_PART, CONTENT_TYPES_PART]
        .iter()
        .any(|part| part.eq_ignore_ascii_case(name))
}

/// Writes the output package: every template part except the regenerated
/// ones, then the new document, its relationships, the content types and
/// the pictures.
pub fn write_docx<W: Write + Seek>(
    template: &Template,
    doc: &Document,
    writer: W,
) -> Result<(), ConvertError> {
    let media = plan_media(template, doc.pictures());
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let put = |zip: &mut ZipWriter<W>, name: &str, data: &[u8]| -> Result<(), ConvertError> {
        zip.start_file(name, options)?;
        zip.write_all(data).map_err(ZipError::from)?;
        Ok(())
    };

    put(
        &mut zip,
        CONTENT_TYPES_PART,
        render_content_types(template.part(CONTENT_TYPES_PART), doc.pictures()).as_bytes(),
    )?;
    if template.part(PACKAGE_RELS_PART).is_none() {
        put(&mut zip, PACKAGE_RELS_PART, package_rels().as_bytes())?;
    }
    for (name, data) in template.parts() {
        if !is_regenerated(name) {
            put(&mut zip, name, data)?;
        }
    }

    put(
        &mut zip,
        DOCUMENT_PART,
        render_document(template.shell(), doc, &media).as_bytes(),
    )?;
    put(
        &mut zip,
        DOCUMENT_RELS_PART,
        render_document_rels(template.part(DOCUMENT_RELS_PART), &media).as_bytes(),
    )?;
    for (picture, part) in doc.pictures().iter().zip(&media) {
        put(&mut zip, &part.part_name, &picture.data)?;
    }

    zip.finish()?.flush().map_err(ZipError::from)?;
    Ok(())
}

/// Writes the output package to `path`, replacing any existing file.
pub fn save_docx(template: &Template, doc: &Document, path: &Path) -> Result<(), ConvertError> {
    let file = File::create(path).map_err(|source| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    write_docx(template, doc, BufWriter::new(file))
}
