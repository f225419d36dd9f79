#![allow(dead_code)]

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use quick_xml::Reader;
use quick_xml::events::Event;
use zip::ZipArchive;
use zip::write::{SimpleFileOptions, ZipWriter};

pub const DOCUMENT_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
    r#"<w:body><w:p><w:r><w:t>Template placeholder</w:t></w:r></w:p>"#,
    r#"<w:tbl><w:tr><w:tc><w:p/></w:tc></w:tr></w:tbl>"#,
    r#"<w:sectPr><w:pgSz w:w="11906" w:h="16838"/></w:sectPr></w:body></w:document>"#
);

const CONTENT_TYPES: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
    r#"<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>"#,
    r#"</Types>"#
);

const PACKAGE_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
    r#"</Relationships>"#
);

const DOCUMENT_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
    r#"</Relationships>"#
);

/// `(w:type, w:styleId, w:name)` triples.
pub type StyleDef<'a> = (&'a str, &'a str, &'a str);

pub const ENGLISH_STYLES: &[StyleDef] = &[
    ("paragraph", "Normal", "Normal"),
    ("paragraph", "Heading1", "heading 1"),
    ("paragraph", "Heading2", "heading 2"),
    ("paragraph", "Caption", "caption"),
    ("paragraph", "NoSpacing", "No Spacing"),
    ("paragraph", "IntenseQuote", "Intense Quote"),
    ("paragraph", "Quote", "Quote"),
    ("paragraph", "ListBullet", "List Bullet"),
    ("table", "TableGrid", "Table Grid"),
];

pub fn styles_xml(styles: &[StyleDef]) -> String {
    let body: String = styles
        .iter()
        .map(|(kind, id, name)| {
            format!(r#"<w:style w:type="{kind}" w:styleId="{id}"><w:name w:val="{name}"/></w:style>"#)
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">{body}</w:styles>"#
    )
}

/// Writes a minimal template package with the given styles.
pub fn build_template(dir: &Path, styles: &[StyleDef]) -> PathBuf {
    let path = dir.join("template.docx");
    let mut zip = ZipWriter::new(File::create(&path).unwrap());
    let options = SimpleFileOptions::default();
    for (name, content) in [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", PACKAGE_RELS.to_string()),
        ("word/document.xml", DOCUMENT_XML.to_string()),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS.to_string()),
        ("word/styles.xml", styles_xml(styles)),
        ("word/settings.xml", "<w:settings/>".to_string()),
    ] {
        zip.start_file(name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
    path
}

pub fn write_input(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}

pub fn part_names(docx: &Path) -> Vec<String> {
    let archive = ZipArchive::new(File::open(docx).unwrap()).unwrap();
    archive.file_names().map(str::to_string).collect()
}

pub fn read_part(docx: &Path, name: &str) -> String {
    let mut archive = ZipArchive::new(File::open(docx).unwrap()).unwrap();
    let mut part = archive.by_name(name).unwrap();
    let mut text = String::new();
    part.read_to_string(&mut text).unwrap();
    text
}

/// One entry per `w:p` in document order (cell paragraphs included): the
/// style id and the concatenated text.
pub fn paragraphs(document_xml: &str) -> Vec<(Option<String>, String)> {
    let mut reader = Reader::from_str(document_xml);
    let mut out = Vec::new();
    let mut current: Option<(Option<String>, String)> = None;
    let mut in_text = false;

    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) if e.local_name().as_ref() == b"p" => {
                current = Some((None, String::new()));
            }
            Event::Empty(e) if e.local_name().as_ref() == b"p" => {
                out.push((None, String::new()));
            }
            Event::Empty(e) if e.local_name().as_ref() == b"pStyle" => {
                let value = e
                    .attributes()
                    .flatten()
                    .find(|a| a.key.local_name().as_ref() == b"val")
                    .map(|a| String::from_utf8(a.value.to_vec()).unwrap());
                if let Some(p) = current.as_mut() {
                    p.0 = value;
                }
            }
            Event::Start(e) if e.local_name().as_ref() == b"t" => in_text = true,
            Event::End(e) if e.local_name().as_ref() == b"t" => in_text = false,
            Event::Text(t) if in_text => {
                if let Some(p) = current.as_mut() {
                    p.1.push_str(&t.unescape().unwrap());
                }
            }
            Event::End(e) if e.local_name().as_ref() == b"p" => {
                out.extend(current.take());
            }
            Event::Eof => break,
            _ => {}
        }
    }
    out
}
