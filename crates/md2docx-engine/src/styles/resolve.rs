use std::collections::HashMap;

use super::{Lookup, StyleCatalog, StyleKind};

/// The abstract styles the emitter asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKey {
    Heading1,
    Heading2,
    Heading3,
    Heading4,
    Caption,
    Normal,
    NoSpacing,
    IntenseQuote,
    Quote,
    BulletList,
    NumberedList,
    TableStyle,
}

impl StyleKey {
    pub const ALL: [StyleKey; 12] = [
        StyleKey::Heading1,
        StyleKey::Heading2,
        StyleKey::Heading3,
        StyleKey::Heading4,
        StyleKey::Caption,
        StyleKey::Normal,
        StyleKey::NoSpacing,
        StyleKey::IntenseQuote,
        StyleKey::Quote,
        StyleKey::BulletList,
        StyleKey::NumberedList,
        StyleKey::TableStyle,
    ];

    /// Heading key for a markdown heading level, if the level is supported.
    pub fn heading(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::Heading1),
            2 => Some(Self::Heading2),
            3 => Some(Self::Heading3),
            4 => Some(Self::Heading4),
            _ => None,
        }
    }

    /// The name probed first.
    pub fn primary_name(self) -> &'static str {
        match self {
            Self::Heading1 => "Heading1",
            Self::Heading2 => "Heading2",
            Self::Heading3 => "Heading3",
            Self::Heading4 => "Heading4",
            Self::Caption => "Caption",
            Self::Normal => "Normal",
            Self::NoSpacing => "No Spacing",
            Self::IntenseQuote => "Intense Quote",
            Self::Quote => "Quote",
            Self::BulletList => "List Bullet",
            Self::NumberedList => "List Number",
            Self::TableStyle => "Table Grid",
        }
    }

    /// Locale and naming variants, tried in order.
    pub fn variants(self) -> &'static [&'static str] {
        match self {
            Self::Heading1 => &["Heading 1", "标题 1", "标题1", "Heading1", "1", "Title"],
            Self::Heading2 => &["Heading 2", "标题 2", "标题2", "Heading2", "2"],
            Self::Heading3 => &["Heading 3", "标题 3", "标题3", "Heading3", "3"],
            Self::Heading4 => &["Heading 4", "标题 4", "标题4", "Heading4", "4"],
            Self::Caption => &[
                "Caption",
                "标题",
                "图表标题",
                "Table Caption",
                "Figure Caption",
            ],
            Self::BulletList => &["List Bullet", "项目符号", "Bulleted List", "无序列表"],
            Self::NumberedList => &["List Number", "编号", "Numbered List", "有序列表"],
            Self::Normal => &["Normal", "正文", "Body Text", "Regular"],
            Self::NoSpacing => &["No Spacing", "无间距", "Compact"],
            Self::IntenseQuote => &["Intense Quote", "强调引用", "Strong Quote"],
            Self::Quote => &["Quote", "引用", "Block Quote"],
            Self::TableStyle => &[
                "Table Grid",
                "Grid Table 1 Light",
                "Plain Table 1",
                "Table Normal",
            ],
        }
    }

    /// The kind the style is looked up under.
    ///
    /// List styles are requested as paragraph styles: templates in the wild
    /// register "List Bullet" and friends as paragraph styles, not numbering
    /// styles.
    pub fn kind(self) -> StyleKind {
        match self {
            Self::TableStyle => StyleKind::Table,
            _ => StyleKind::Paragraph,
        }
    }

    fn is_list(self) -> bool {
        matches!(self, Self::BulletList | Self::NumberedList)
    }

    /// Whether an unresolved key may fall back to the template's `Normal`.
    /// List keys never do: their fallback is manual indentation.
    fn falls_back_to_normal(self) -> bool {
        self.kind() == StyleKind::Paragraph && !self.is_list()
    }
}

/// Result of resolving a [`StyleKey`] against a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedStyle {
    /// The concrete style name as the template spells it.
    Resolved(String),
    Absent,
}

impl ResolvedStyle {
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Resolved(name) => Some(name),
            Self::Absent => None,
        }
    }
}

/// Resolves `key` against `catalog`.
///
/// Lookup order:
/// 1. the primary name under the requested kind
/// 2. the primary name under another kind → `Absent`
/// 3. locale variants in order, first hit wins
/// 4. `Normal`, for paragraph keys that allow it
pub fn resolve(catalog: &StyleCatalog, key: StyleKey) -> ResolvedStyle {
    let kind = key.kind();

    match catalog.lookup(key.primary_name(), kind) {
        Lookup::Found(entry) => return ResolvedStyle::Resolved(entry.name.clone()),
        Lookup::WrongKind => return ResolvedStyle::Absent,
        Lookup::Missing => {}
    }

    if let Some(entry) = key
        .variants()
        .iter()
        .find_map(|variant| catalog.find(variant, kind))
    {
        return ResolvedStyle::Resolved(entry.name.clone());
    }

    if key.falls_back_to_normal()
        && let Some(entry) = catalog.find("Normal", StyleKind::Paragraph)
    {
        return ResolvedStyle::Resolved(entry.name.clone());
    }

    ResolvedStyle::Absent
}

/// Every [`StyleKey`] resolved once for a conversion.
#[derive(Debug, Clone, Default)]
pub struct StyleTable {
    styles: HashMap<StyleKey, ResolvedStyle>,
}

impl StyleTable {
    pub fn build(catalog: &StyleCatalog) -> Self {
        let styles = StyleKey::ALL
            .iter()
            .map(|&key| (key, resolve(catalog, key)))
            .collect();
        Self { styles }
    }

    pub fn get(&self, key: StyleKey) -> Option<&str> {
        self.styles.get(&key).and_then(ResolvedStyle::name)
    }
}
