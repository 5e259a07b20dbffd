//! Tree walk from the root namespace down to every class, writing one page
//! per node.

pub mod class;
pub mod namespace;
pub mod rst;

use crate::model::CompoundNode;
use crate::parser::{CompoundSource, LoadError};
use crate::scope::RootScope;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Walks namespaces and classes, loading each node on demand.
///
/// A node whose file cannot be read is reported and skipped together with
/// its subtree; malformed documents and write failures abort the walk.
pub struct Generator<'a, S: CompoundSource> {
    source: &'a S,
    scope: RootScope,
    output_dir: PathBuf,
    /// Namespace ref ids on the current path, to stop cyclic input.
    ancestors: Vec<String>,
    failures: usize,
}

impl<'a, S: CompoundSource> Generator<'a, S> {
    pub fn new(source: &'a S, scope: RootScope, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source,
            scope,
            output_dir: output_dir.into(),
            ancestors: Vec::new(),
            failures: 0,
        }
    }

    /// Number of nodes skipped because their file could not be read.
    pub fn failures(&self) -> usize {
        self.failures
    }

    pub fn render_namespace(&mut self, ref_id: &str, name: &str) -> Result<()> {
        info!("Processing namespace {}", name);
        debug!("  refid is {}", ref_id);
        let Some(placement) = self.scope.place(name) else {
            debug!("  Skipping, not under {}", self.scope.root());
            return Ok(());
        };
        if self.ancestors.iter().any(|a| a == ref_id) {
            warn!("  Skipping {}, namespace refers back to itself", name);
            return Ok(());
        }
        let Some(compound) = self.load(ref_id, name)? else {
            return Ok(());
        };

        let page = placement.namespace_page();
        let index_path = self.output_dir.join(&page.index_path);
        debug!("  Page title will be '{}'", page.title);
        debug!("  Page path will be  '{}'", index_path.display());

        ensure_dir(&self.output_dir.join(&page.child_dir))?;
        if let Some(parent) = index_path.parent() {
            ensure_dir(parent)?;
        }
        write_page(
            &index_path,
            &namespace::render_namespace(&page, &compound.raw_description),
        )?;

        for class in &compound.inner_classes {
            self.render_class(&class.ref_id, &class.name)?;
        }

        self.ancestors.push(ref_id.to_string());
        let result = compound
            .inner_namespaces
            .iter()
            .try_for_each(|ns| self.render_namespace(&ns.ref_id, &ns.name));
        self.ancestors.pop();
        result
    }

    pub fn render_class(&mut self, ref_id: &str, name: &str) -> Result<()> {
        info!("Processing class {}", name);
        debug!("  refid is {}", ref_id);
        let placement = self.scope.place(name);
        let (Some(path), Some(title)) = (
            placement.as_ref().and_then(|p| p.class_path()),
            placement.as_ref().and_then(|p| p.short_name()),
        ) else {
            warn!("  Skipping class {}, not under {}", name, self.scope.root());
            return Ok(());
        };
        let Some(compound) = self.load(ref_id, name)? else {
            return Ok(());
        };

        let out_path = self.output_dir.join(path);
        debug!("  Class title will be '{}'", title);
        debug!("  Class path will be  '{}'", out_path.display());

        let page = class::render_class(&compound, title);
        if let Some(parent) = out_path.parent() {
            ensure_dir(parent)?;
        }
        write_page(&out_path, &page)
    }

    /// Load a node. `Ok(None)` when its file is unreadable: the failure is
    /// logged and counted, and the caller skips the branch.
    fn load(&mut self, ref_id: &str, name: &str) -> Result<Option<CompoundNode>> {
        match self.source.load(ref_id) {
            Ok(compound) => Ok(Some(compound)),
            Err(err) if err.is_unreadable() => {
                error!("  Skipping {}: {}", name, err);
                self.failures += 1;
                Ok(None)
            }
            Err(err) => Err(malformed(err, name)),
        }
    }
}

fn malformed(err: LoadError, name: &str) -> anyhow::Error {
    anyhow::Error::new(err).context(format!("failed to load {}", name))
}

/// Create a directory and its parents; an existing directory is fine.
fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))
}

fn write_page(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}
