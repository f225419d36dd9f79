use std::path::PathBuf;

use crate::io::IoError;

/// Fatal errors: anything that stops a conversion before or after the scan.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Io(#[from] IoError),
    #[error("Cannot open template {path}: {source}")]
    TemplateOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Template is not a valid docx container: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Malformed XML in template part {part}: {source}")]
    Xml {
        part: String,
        #[source]
        source: quick_xml::Error,
    },
    #[error("Template part {0} is not valid UTF-8")]
    Encoding(String),
    #[error("Cannot write output {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Non-fatal errors returned by the fallible [`DocumentSink`](crate::sink::DocumentSink)
/// setters. Callers recover with a documented fallback.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("style '{name}' is not defined in the template")]
    UnknownStyle { name: String },
    #[error("style '{name}' exists but is not a {expected} style")]
    WrongStyleKind { name: String, expected: &'static str },
    #[error("invalid colour '{0}', expected six hex digits")]
    InvalidColor(String),
    #[error("{source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
