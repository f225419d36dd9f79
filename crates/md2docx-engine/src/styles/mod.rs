//! # Styles
//!
//! The template's style catalog and the resolver that maps abstract style
//! keys onto whatever the template actually calls them.
//!
//! ## Modules
//!
//! - **`resolve`**: `StyleKey`, locale variant table, `resolve()` and the
//!   per-conversion `StyleTable`
//!
//! Templates are authored in different locales, so a "Heading 1" may be
//! registered as `标题 1` or only exist under its style id. Lookups are
//! case-insensitive on the display name and also accept the style id.

pub mod resolve;

pub use resolve::{ResolvedStyle, StyleKey, StyleTable, resolve};

/// The kind a style is registered under (`w:type` in `styles.xml`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKind {
    Paragraph,
    Character,
    Table,
    Numbering,
}

impl StyleKind {
    /// Parses the `w:type` attribute value. Word treats a missing type as paragraph.
    pub fn from_xml(value: Option<&str>) -> Option<Self> {
        match value {
            None | Some("paragraph") => Some(Self::Paragraph),
            Some("character") => Some(Self::Character),
            Some("table") => Some(Self::Table),
            Some("numbering") => Some(Self::Numbering),
            Some(_) => None,
        }
    }
}

/// One named style from the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleEntry {
    /// The `w:styleId`, which is what paragraphs reference.
    pub id: String,
    /// The display name (`w:name`), which is what users and locale variants use.
    pub name: String,
    pub kind: StyleKind,
}

impl StyleEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: StyleKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
        }
    }

    fn answers_to(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name) || self.id == name
    }
}

/// Outcome of probing the catalog for a name under a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    Found(&'a StyleEntry),
    /// The name exists, but only under a different kind.
    WrongKind,
    Missing,
}

/// The set of styles a template defines. Read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleCatalog {
    entries: Vec<StyleEntry>,
}

impl StyleCatalog {
    pub fn new(entries: Vec<StyleEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[StyleEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lookup(&self, name: &str, kind: StyleKind) -> Lookup<'_> {
        let mut wrong_kind = false;
        for entry in self.entries.iter().filter(|e| e.answers_to(name)) {
            if entry.kind == kind {
                return Lookup::Found(entry);
            }
            wrong_kind = true;
        }
        if wrong_kind {
            Lookup::WrongKind
        } else {
            Lookup::Missing
        }
    }

    /// Finds the style a paragraph or table may reference by `name`.
    pub fn find(&self, name: &str, kind: StyleKind) -> Option<&StyleEntry> {
        match self.lookup(name, kind) {
            Lookup::Found(entry) => Some(entry),
            Lookup::WrongKind | Lookup::Missing => None,
        }
    }
}

impl FromIterator<StyleEntry> for StyleCatalog {
    fn from_iter<T: IntoIterator<Item = StyleEntry>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
