use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::styles::{StyleCatalog, StyleEntry, StyleKind};

pub(crate) fn attr_value(
    reader: &Reader<&[u8]>,
    element: &BytesStart,
    key: &[u8],
) -> Result<Option<String>, quick_xml::Error> {
    for attr in element.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == key {
            let value = attr.decode_and_unescape_value(reader.decoder())?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// A `w:style` whose `w:name` may still be ahead.
struct PendingStyle {
    id: String,
    kind: Option<StyleKind>,
    name: Option<String>,
}

impl PendingStyle {
    fn read(reader: &Reader<&[u8]>, element: &BytesStart) -> Result<Self, quick_xml::Error> {
        let kind = attr_value(reader, element, b"type")?;
        Ok(Self {
            id: attr_value(reader, element, b"styleId")?.unwrap_or_default(),
            kind: StyleKind::from_xml(kind.as_deref()),
            name: None,
        })
    }

    fn finish(self) -> Option<StyleEntry> {
        let kind = self.kind?;
        if self.id.is_empty() {
            return None;
        }
        let name = self.name.unwrap_or_else(|| self.id.clone());
        Some(StyleEntry::new(self.id, name, kind))
    }
}

/// Reads every `w:style` of a `styles.xml` part.
///
/// Styles of an unknown `w:type` or without a `w:styleId` are skipped. A
/// style without `w:name` is listed under its id.
pub fn parse_styles(xml: &[u8]) -> Result<StyleCatalog, quick_xml::Error> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut entries = Vec::new();
    let mut current: Option<PendingStyle> = None;

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.local_name().as_ref() == b"style" => {
                current = Some(PendingStyle::read(&reader, &e)?);
            }
            Event::Empty(e) if e.local_name().as_ref() == b"style" => {
                entries.extend(PendingStyle::read(&reader, &e)?.finish());
            }
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"name" => {
                if let Some(pending) = current.as_mut()
                    && pending.name.is_none()
                {
                    pending.name = attr_value(&reader, &e, b"val")?;
                }
            }
            Event::End(e) if e.local_name().as_ref() == b"style" => {
                entries.extend(current.take().and_then(PendingStyle::finish));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(StyleCatalog::new(entries))
}
