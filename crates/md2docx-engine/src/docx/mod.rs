//! # Docx Package
//!
//! Reading the template container and writing the converted document.
//!
//! ## Modules
//!
//! - **`template`**: opens the template, keeps every part, extracts the
//!   style catalog and the `word/document.xml` shell
//! - **`styles`**: `word/styles.xml` → `StyleCatalog`
//! - **`writer`**: serializes a `Document` and writes the output package
//!
//! Only three parts are regenerated on output: the main document, its
//! relationships and the content-type map. Headers, footers, numbering,
//! themes and settings are copied from the template untouched.

pub mod styles;
pub mod template;
pub mod writer;

pub use template::{DocumentShell, Template};
pub use writer::{render_document, save_docx, write_docx};

pub const DOCUMENT_PART: &str = "word/document.xml";
pub const DOCUMENT_RELS_PART: &str = "word/_rels/document.xml.rels";
pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
pub const STYLES_PART: &str = "word/styles.xml";
pub const PACKAGE_RELS_PART: &str = "_rels/.rels";

pub(crate) const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub(crate) const NS_CT: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
pub(crate) const NS_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
