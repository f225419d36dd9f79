use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;
use zip::ZipArchive;
use zip::result::ZipError;

use super::styles::parse_styles;
use super::{DOCUMENT_PART, STYLES_PART};
use crate::error::ConvertError;
use crate::models::Document;
use crate::styles::StyleCatalog;

/// `word/document.xml` with the body content cut out.
///
/// `head` runs up to and including the `<w:body>` start tag, `section` is the
/// body-level `<w:sectPr>` (page size, margins, header references) and `tail`
/// closes the body and the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentShell {
    pub head: String,
    pub section: String,
    pub tail: String,
}

impl Default for DocumentShell {
    fn default() -> Self {
        Self {
            head: r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:wpc="http://schemas.microsoft.com/office/word/2010/wordprocessingCanvas" xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006" xmlns:o="urn:schemas-microsoft-com:office:office" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:m="http://schemas.openxmlformats.org/officeDocument/2006/math" xmlns:v="urn:schemas-microsoft-com:vml" xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" xmlns:w10="urn:schemas-microsoft-com:office:word" xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:wne="http://schemas.microsoft.com/office/word/2006/wordml"><w:body>"#
                .to_string(),
            section: r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/><w:cols w:space="708"/><w:docGrid w:linePitch="360"/></w:sectPr>"#
                .to_string(),
            tail: "</w:body></w:document>".to_string(),
        }
    }
}

impl DocumentShell {
    /// Splits a main document part around its body content.
    ///
    /// Returns `Ok(None)` when the part has no `w:body`.
    pub fn extract(xml: &str) -> Result<Option<Self>, quick_xml::Error> {
        let mut reader = Reader::from_str(xml);
        let mut depth = 0usize;
        let mut body_start = None;
        let mut body_end = None;
        let mut section = None;
        let mut section_start = 0;

        loop {
            let before = reader.buffer_position() as usize;
            let event = reader.read_event()?;
            let after = reader.buffer_position() as usize;
            match event {
                Event::Start(e) => {
                    match (depth, e.local_name().as_ref()) {
                        (1, b"body") => body_start = Some(after),
                        (2, b"sectPr") => section_start = before,
                        _ => {}
                    }
                    depth += 1;
                }
                Event::End(e) => {
                    depth = depth.saturating_sub(1);
                    match (depth, e.local_name().as_ref()) {
                        (2, b"sectPr") => section = Some(section_start..after),
                        (1, b"body") => body_end = Some(before),
                        _ => {}
                    }
                }
                Event::Empty(e) => match (depth, e.local_name().as_ref()) {
                    (2, b"sectPr") => section = Some(before..after),
                    (1, b"body") => {
                        return Ok(Some(Self {
                            head: format!("{}<w:body>", &xml[..before]),
                            section: String::new(),
                            tail: format!("</w:body>{}", &xml[after..]),
                        }));
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        let (Some(start), Some(end)) = (body_start, body_end) else {
            return Ok(None);
        };
        Ok(Some(Self {
            head: xml[..start].to_string(),
            section: section.map(|range| xml[range].to_string()).unwrap_or_default(),
            tail: xml[end..].to_string(),
        }))
    }
}

/// Upper bound on the buffer reserved up front for one template part.
const MAX_PREALLOC: usize = 16 << 20;

/// A `.docx` template held in memory.
#[derive(Debug, Clone)]
pub struct Template {
    parts: Vec<(String, Vec<u8>)>,
    catalog: StyleCatalog,
    shell: DocumentShell,
}

impl Template {
    pub fn open(path: &Path) -> Result<Self, ConvertError> {
        let file = File::open(path).map_err(|source| ConvertError::TemplateOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let template = Self::from_reader(BufReader::new(file))?;
        log::debug!(
            "Template {} has {} parts and {} styles",
            path.display(),
            template.parts.len(),
            template.catalog.entries().len()
        );
        Ok(template)
    }

    /// Reads every file entry of the container. Directory entries are dropped.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self, ConvertError> {
        let mut archive = ZipArchive::new(reader)?;
        let mut parts = Vec::with_capacity(archive.len());

        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;
            if entry.is_dir() {
                continue;
            }
            let mut data = Vec::with_capacity(capacity_hint(entry.size()));
            entry.read_to_end(&mut data).map_err(ZipError::from)?;
            parts.push((entry.name().to_string(), data));
        }

        let catalog = match find_part(&parts, STYLES_PART) {
            Some(xml) => parse_styles(xml).map_err(|source| ConvertError::Xml {
                part: STYLES_PART.to_string(),
                source,
            })?,
            None => {
                log::warn!("Template has no {STYLES_PART}; every style falls back to direct formatting");
                StyleCatalog::default()
            }
        };

        let shell = match find_part(&parts, DOCUMENT_PART) {
            Some(bytes) => {
                let xml = std::str::from_utf8(bytes)
                    .map_err(|_| ConvertError::Encoding(DOCUMENT_PART.to_string()))?;
                DocumentShell::extract(xml)
                    .map_err(|source| ConvertError::Xml {
                        part: DOCUMENT_PART.to_string(),
                        source,
                    })?
                    .unwrap_or_default()
            }
            None => DocumentShell::default(),
        };

        Ok(Self {
            parts,
            catalog,
            shell,
        })
    }

    pub fn catalog(&self) -> &StyleCatalog {
        &self.catalog
    }

    pub fn shell(&self) -> &DocumentShell {
        &self.shell
    }

    /// All parts in container order.
    pub fn parts(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.parts
            .iter()
            .map(|(name, data)| (name.as_str(), data.as_slice()))
    }

    pub fn part(&self, name: &str) -> Option<&[u8]> {
        find_part(&self.parts, name)
    }

    /// An empty document that uses this template's styles.
    pub fn new_document(&self) -> Document {
        Document::new(self.catalog.clone())
    }
}

/// Buffer size to reserve for a part whose header declares `declared`
/// bytes. The header is untrusted, so the reservation is capped.
fn capacity_hint(declared: u64) -> usize {
    usize::try_from(declared).unwrap_or(MAX_PREALLOC).min(MAX_PREALLOC)
}

fn find_part<'a>(parts: &'a [(String, Vec<u8>)], name: &str) -> Option<&'a [u8]> {
    parts
        .iter()
        .find(|(part, _)| part.eq_ignore_ascii_case(name))
        .map(|(_, data)| data.as_slice())
}
