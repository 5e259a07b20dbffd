//! Root-namespace scoping and the output layout derived from it.
//!
//! Only the configured root and its `::`-descendants are rendered. Output
//! paths mirror the qualified name with the root prefix stripped:
//!
//! - root namespace → `api.rst`, children under `api/`
//! - `Root::Util` → `api/_util.rst`, children under `api/util/`
//! - `Root::Util::Lzw` (class) → `api/util/lzw.rst`

use std::path::PathBuf;

/// Scope separator in Doxygen qualified names.
pub const SEPARATOR: &str = "::";

/// Top-level output directory for every generated page but the root index.
const API_DIR: &str = "api";

const RST_EXT: &str = "rst";

/// Where a qualified name sits relative to the root namespace.
#[derive(Debug, PartialEq, Eq)]
pub enum Placement<'n> {
    Root,
    /// Suffix path segments below the root, original case.
    Descendant(Vec<&'n str>),
}

#[derive(Debug, Clone)]
pub struct RootScope {
    root: String,
    prefix: String,
}

impl RootScope {
    pub fn new(root: impl Into<String>) -> Self {
        let root = root.into();
        let prefix = format!("{}{}", root, SEPARATOR);
        Self { root, prefix }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// `None` when `name` is neither the root nor below it.
    pub fn place<'n>(&self, name: &'n str) -> Option<Placement<'n>> {
        if name == self.root {
            return Some(Placement::Root);
        }
        let suffix = name.strip_prefix(&self.prefix)?;
        Some(Placement::Descendant(suffix.split(SEPARATOR).collect()))
    }
}

/// Everything needed to write one namespace index page.
#[derive(Debug, PartialEq, Eq)]
pub struct NamespacePage {
    pub title: String,
    /// Relative path of the index file.
    pub index_path: PathBuf,
    /// Relative directory holding the namespace's children.
    pub child_dir: PathBuf,
    /// `toctree` glob picking up every child page.
    pub glob: String,
}

impl Placement<'_> {
    pub fn namespace_page(&self) -> NamespacePage {
        match self {
            Placement::Root => NamespacePage {
                title: "API documentation".to_string(),
                index_path: PathBuf::from(format!("{}.{}", API_DIR, RST_EXT)),
                child_dir: PathBuf::from(API_DIR),
                glob: format!("{}/*", API_DIR),
            },
            Placement::Descendant(segments) => {
                let (parents, last) = lowercase_split(segments);
                let mut parent_dir = PathBuf::from(API_DIR);
                parent_dir.extend(&parents);
                let index_path = parent_dir.join(format!("_{}.{}", last, RST_EXT));
                let child_dir = parent_dir.join(&last);
                NamespacePage {
                    title: format!("{} namespace", self.short_name().unwrap_or_default()),
                    index_path,
                    child_dir,
                    glob: format!("{}/*", last),
                }
            }
        }
    }

    /// Relative path of a class page, `None` for the root itself.
    pub fn class_path(&self) -> Option<PathBuf> {
        match self {
            Placement::Root => None,
            Placement::Descendant(segments) => {
                let (parents, last) = lowercase_split(segments);
                let mut path = PathBuf::from(API_DIR);
                path.extend(parents);
                path.push(format!("{}.{}", last, RST_EXT));
                Some(path)
            }
        }
    }

    /// Last segment, original case.
    pub fn short_name(&self) -> Option<&str> {
        match self {
            Placement::Root => None,
            Placement::Descendant(segments) => segments.last().copied(),
        }
    }
}

/// Lower-cased parent segments and lower-cased last segment.
fn lowercase_split(segments: &[&str]) -> (Vec<String>, String) {
    let mut lower: Vec<String> = segments.iter().map(|s| s.to_lowercase()).collect();
    let last = lower.pop().unwrap_or_default();
    (lower, last)
}
