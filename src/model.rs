//! Typed view of the Doxygen XML compound tree.
//!
//! Every node is built once from its XML file and never mutated afterwards.
//! Cross-node links are kept as [`Reference`]s (ref id + display name) and
//! resolved lazily through a [`crate::parser::CompoundSource`].

/// Kind of a compound as reported by the `kind` attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CompoundKind {
    Namespace,
    #[default]
    Class,
    Interface,
    /// Any other Doxygen kind (file, dir, struct, ...), kept verbatim.
    #[allow(dead_code)]
    Other(String),
}

impl CompoundKind {
    pub fn from_attr(kind: &str) -> Self {
        match kind {
            "namespace" => CompoundKind::Namespace,
            "class" => CompoundKind::Class,
            "interface" => CompoundKind::Interface,
            other => CompoundKind::Other(other.to_string()),
        }
    }
}

/// Link to another compound: `<innerclass refid="...">Name</innerclass>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub ref_id: String,
    pub name: String,
}

/// One `<compound>` entry of `index.xml`.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub ref_id: String,
    pub kind: CompoundKind,
    pub name: String,
}

/// A namespace, class or interface loaded from `<refid>.xml`.
#[derive(Debug, Default)]
#[allow(dead_code)]
pub struct CompoundNode {
    pub ref_id: String,
    pub kind: CompoundKind,
    pub name: String,
    /// Leading text of `<detaileddescription>`, before any child element.
    pub raw_description: String,
    pub description: Description,
    pub inner_classes: Vec<Reference>,
    pub inner_namespaces: Vec<Reference>,
    pub sections: Vec<Section>,
}

impl CompoundNode {
    pub fn is_interface(&self) -> bool {
        self.kind == CompoundKind::Interface
    }
}

/// `<sectiondef kind="...">`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionKind {
    PublicFunc,
    PublicStaticFunc,
    Other(String),
}

impl SectionKind {
    pub fn from_attr(kind: &str) -> Self {
        match kind {
            "public-func" => SectionKind::PublicFunc,
            "public-static-func" => SectionKind::PublicStaticFunc,
            other => SectionKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SectionKind::PublicFunc => "public-func",
            SectionKind::PublicStaticFunc => "public-static-func",
            SectionKind::Other(kind) => kind,
        }
    }
}

#[derive(Debug)]
pub struct Section {
    pub kind: SectionKind,
    pub members: Vec<MemberNode>,
}

/// A `<memberdef>`.
#[derive(Debug, Default)]
#[allow(dead_code)]
pub struct MemberNode {
    pub name: String,
    /// Full definition, e.g. `Mike42::ImagePhp::Image::setWidth`.
    pub definition: String,
    /// Raw `<argsstring>` as captured by Doxygen.
    pub args_string: Option<String>,
    pub params: Vec<FormalParameter>,
    pub description: Description,
}

impl MemberNode {
    /// Bare method name: the part of the definition after the last `::`.
    pub fn method_name(&self) -> &str {
        self.definition
            .rsplit("::")
            .next()
            .unwrap_or(&self.definition)
    }
}

/// A `<param>` of a member, in source order.
#[derive(Debug, Default, Clone)]
pub struct FormalParameter {
    pub name: String,
    pub declared_type: Option<Vec<Inline>>,
    pub default_value: Option<String>,
}

/// A `<parameteritem>` from the free-text `<parameterlist>`.
#[derive(Debug, Default, Clone)]
pub struct DocumentedParameter {
    pub name: String,
    pub doc_type: Option<String>,
    pub description: Vec<Paragraph>,
}

/// Contents of a `<simplesect kind="return">`, plus the member's declared
/// `<type>` when Doxygen recorded one.
#[derive(Debug, Default, Clone)]
pub struct ReturnInfo {
    pub return_type: Option<String>,
    pub description: Vec<Paragraph>,
}

/// A `<detaileddescription>` with its embedded blocks lifted out.
#[derive(Debug, Default, Clone)]
pub struct Description {
    pub paragraphs: Vec<Paragraph>,
    pub params: Vec<DocumentedParameter>,
    pub returns: Option<ReturnInfo>,
}

pub type Paragraph = Vec<Inline>;

/// Inline content of a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    /// `<ref>` to another compound, rendered as a cross-reference.
    Ref(String),
}
