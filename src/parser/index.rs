//! `index.xml` — the list of every compound Doxygen extracted.

use super::{child, children, parse_xml, text_content, LoadError, INDEX_REF_ID};
use crate::model::{CompoundKind, IndexEntry};

/// Parse `index.xml` into its `<compound>` entries, in document order.
pub fn parse(text: &str) -> Result<Vec<IndexEntry>, LoadError> {
    let doc = parse_xml(INDEX_REF_ID, text)?;
    let mut entries = Vec::new();
    for compound in children(doc.root_element(), "compound") {
        let ref_id = compound
            .attribute("refid")
            .ok_or_else(|| LoadError::missing(INDEX_REF_ID, "compound@refid"))?;
        let kind = compound
            .attribute("kind")
            .ok_or_else(|| LoadError::missing(INDEX_REF_ID, "compound@kind"))?;
        let name = child(compound, "name")
            .map(text_content)
            .ok_or_else(|| LoadError::missing(INDEX_REF_ID, "compound/name"))?;
        entries.push(IndexEntry {
            ref_id: ref_id.to_string(),
            kind: CompoundKind::from_attr(kind),
            name: name.trim().to_string(),
        });
    }
    Ok(entries)
}

/// First namespace entry named exactly `name`.
pub fn find_namespace<'a>(entries: &'a [IndexEntry], name: &str) -> Option<&'a IndexEntry> {
    entries
        .iter()
        .find(|e| e.kind == CompoundKind::Namespace && e.name == name)
}
