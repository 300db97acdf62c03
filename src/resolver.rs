//! Facade combining classification, chunk assignment and alias resolution.

use std::path::{Path, PathBuf};

use crate::alias::AliasTable;
use crate::chunks::ChunkGroups;
use crate::config::BuildConfig;
use crate::error::ResolveError;
use crate::models::{ModuleRecord, ResolvedAsset};
use crate::rules::{Rule, RuleSet};

/// Resolver over one immutable build configuration.
///
/// Construction compiles the rule patterns and orders the chunk groups once;
/// afterwards every operation is a pure read, so a single resolver can be
/// shared across threads and applied to the full module graph in any order.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    rules: RuleSet,
    groups: ChunkGroups,
    aliases: AliasTable,
}

impl AssetResolver {
    /// Build a resolver anchored at the given project root.
    pub fn new(project_root: impl Into<PathBuf>, config: &BuildConfig) -> Self {
        Self {
            rules: RuleSet::builtin(config),
            groups: ChunkGroups::builtin(config),
            aliases: AliasTable::new(project_root, config),
        }
    }

    /// Build a resolver anchored at the current directory.
    pub fn from_config(config: &BuildConfig) -> Self {
        Self::new(Path::new("."), config)
    }

    /// Classify a file path into its transformation pipeline rule.
    pub fn classify(&self, file_path: &str) -> Result<&Rule, ResolveError> {
        self.rules.classify(file_path)
    }

    /// Resolve an import specifier through the alias table.
    pub fn resolve_import(&self, specifier: &str) -> Result<PathBuf, ResolveError> {
        self.aliases.resolve(specifier)
    }

    /// Produce the full resolution record for one module.
    pub fn resolve(&self, module: &ModuleRecord) -> Result<ResolvedAsset, ResolveError> {
        let rule = self.rules.classify(&module.path)?;
        let target_chunk = self.groups.assign(module)?;

        Ok(ResolvedAsset {
            source_path: module.path.clone(),
            pipeline: rule.pipeline.clone(),
            target_chunk,
        })
    }

    /// Resolve every module in a graph, stopping at the first failure.
    pub fn resolve_graph(
        &self,
        modules: &[ModuleRecord],
    ) -> Result<Vec<ResolvedAsset>, ResolveError> {
        modules.iter().map(|module| self.resolve(module)).collect()
    }
}
