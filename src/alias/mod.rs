//! Import-specifier rewriting against the configured alias table.
//!
//! Resolution happens in two deterministic steps: the leading path segment is
//! rewritten through the alias table, then a missing extension is inferred by
//! probing a fixed candidate order against the filesystem. Both steps are
//! pure functions of the immutable table and the single specifier argument,
//! so a fully resolved path is a fixed point of [`AliasTable::resolve`].

mod extensions;

pub use extensions::EXTENSION_PROBE_ORDER;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::BuildConfig;
use crate::error::ResolveError;

/// Shorthand-to-path rewrite table applied to import specifiers.
#[derive(Debug, Clone)]
pub struct AliasTable {
    project_root: PathBuf,
    entries: BTreeMap<String, PathBuf>,
}

impl AliasTable {
    /// Build the table from the configured aliases, anchored at the project root.
    pub fn new(project_root: impl Into<PathBuf>, config: &BuildConfig) -> Self {
        let project_root = project_root.into();
        let entries = config
            .aliases
            .iter()
            .map(|(name, base)| (name.clone(), project_root.join(base)))
            .collect();

        Self {
            project_root,
            entries,
        }
    }

    /// Rewrite and resolve an import specifier.
    ///
    /// When the specifier's leading segment is an alias key, that segment is
    /// substituted with the mapped base path. A specifier that already carries
    /// an extension is returned as-is after rewriting; one without an
    /// extension goes through inference in [`EXTENSION_PROBE_ORDER`].
    pub fn resolve(&self, specifier: &str) -> Result<PathBuf, ResolveError> {
        let normalised = specifier.replace('\\', "/");
        let candidate = self.rewrite(&normalised);

        if candidate.extension().is_some() {
            return Ok(candidate);
        }

        match extensions::infer(&candidate) {
            Some(resolved) => {
                debug!("resolved {specifier} to {}", resolved.display());
                Ok(resolved)
            }
            None => Err(ResolveError::UnresolvedImport {
                specifier: specifier.to_string(),
                tried: extensions::candidates(&candidate),
            }),
        }
    }

    /// Apply the alias substitution without touching the filesystem.
    fn rewrite(&self, specifier: &str) -> PathBuf {
        let (head, rest) = match specifier.split_once('/') {
            Some((head, rest)) => (head, Some(rest)),
            None => (specifier, None),
        };

        if let Some(base) = self.entries.get(head) {
            return match rest {
                Some(rest) => base.join(rest),
                None => base.clone(),
            };
        }

        let path = Path::new(specifier);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }
}
