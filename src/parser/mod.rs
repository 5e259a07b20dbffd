//! Tree loader — one Doxygen XML file per compound, parsed on demand.

pub mod compound;
pub mod description;
pub mod index;

use crate::model::{CompoundNode, IndexEntry};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Errors raised while loading a compound or the index.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {path} (refid {ref_id}): {source}")]
    Read {
        ref_id: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed XML in refid {ref_id}: {source}")]
    Xml {
        ref_id: String,
        #[source]
        source: roxmltree::Error,
    },

    #[error("refid {ref_id}: missing required field `{field}`")]
    MissingField { ref_id: String, field: &'static str },
}

impl LoadError {
    /// True when the file itself could not be read. Such failures only
    /// abort the branch being rendered; everything else aborts the run.
    pub fn is_unreadable(&self) -> bool {
        matches!(self, LoadError::Read { .. })
    }

    pub(crate) fn missing(ref_id: &str, field: &'static str) -> Self {
        LoadError::MissingField {
            ref_id: ref_id.to_string(),
            field,
        }
    }
}

/// Resolves a reference id into its compound.
pub trait CompoundSource {
    fn load(&self, ref_id: &str) -> Result<CompoundNode, LoadError>;
}

/// Reads `<refid>.xml` files from a Doxygen XML output directory.
///
/// Nothing is cached: loading the same ref id twice parses the file twice.
pub struct XmlDirectory {
    dir: PathBuf,
}

/// Ref id of Doxygen's top-level index file.
const INDEX_REF_ID: &str = "index";

impl XmlDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Parse `index.xml` into its list of compounds.
    pub fn load_index(&self) -> Result<Vec<IndexEntry>, LoadError> {
        let text = self.read(INDEX_REF_ID)?;
        index::parse(&text)
    }

    fn read(&self, ref_id: &str) -> Result<String, LoadError> {
        let path = self.dir.join(format!("{}.xml", ref_id));
        debug!("  Opening {}", path.display());
        fs::read_to_string(&path).map_err(|source| LoadError::Read {
            ref_id: ref_id.to_string(),
            path,
            source,
        })
    }
}

impl CompoundSource for XmlDirectory {
    fn load(&self, ref_id: &str) -> Result<CompoundNode, LoadError> {
        let text = self.read(ref_id)?;
        compound::parse(ref_id, &text)
    }
}

/// Parse XML text, tagging failures with the ref id being loaded.
pub(crate) fn parse_xml<'a>(
    ref_id: &str,
    text: &'a str,
) -> Result<roxmltree::Document<'a>, LoadError> {
    roxmltree::Document::parse(text).map_err(|source| LoadError::Xml {
        ref_id: ref_id.to_string(),
        source,
    })
}

/// First child element with the given tag name.
pub(crate) fn child<'a, 'input>(
    node: roxmltree::Node<'a, 'input>,
    name: &str,
) -> Option<roxmltree::Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(name))
}

/// All child elements with the given tag name, in document order.
pub(crate) fn children<'a, 'input: 'a>(
    node: roxmltree::Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = roxmltree::Node<'a, 'input>> + 'a {
    node.children().filter(move |n| n.has_tag_name(name))
}

/// Concatenated text of a node and all its descendants.
pub(crate) fn text_content(node: roxmltree::Node) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let source = XmlDirectory::new(dir.path());
        let err = source.load("classnope").unwrap_err();
        assert!(err.is_unreadable());
        assert!(err.to_string().contains("classnope"));
    }

    #[test]
    fn bad_xml_is_not_unreadable() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("classbroken.xml"), "<doxygen><compounddef").unwrap();
        let source = XmlDirectory::new(dir.path());
        let err = source.load("classbroken").unwrap_err();
        assert!(matches!(err, LoadError::Xml { .. }));
        assert!(!err.is_unreadable());
    }

    #[test]
    fn loads_from_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("classa.xml"),
            r#"<doxygen><compounddef id="classa" kind="class"><compoundname>A</compoundname></compounddef></doxygen>"#,
        )
        .unwrap();
        let node = XmlDirectory::new(dir.path()).load("classa").unwrap();
        assert_eq!(node.name, "A");
        assert_eq!(node.ref_id, "classa");
    }

    #[test]
    fn text_content_flattens_children() {
        let doc = roxmltree::Document::parse("<t>a<ref>B</ref>c</t>").unwrap();
        assert_eq!(text_content(doc.root_element()), "aBc");
    }
}
