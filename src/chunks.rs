//! Code-splitting policy: priority-ordered chunk groups over the module graph.

use std::collections::BTreeMap;

use log::debug;

use crate::config::BuildConfig;
use crate::error::ResolveError;
use crate::models::{ChunkTarget, ModuleRecord};

/// Priority assigned to the built-in vendor group. High enough that vendored
/// modules are never claimed by the shared-code group instead.
pub const VENDOR_GROUP_PRIORITY: i32 = 10;

/// Predicate deciding whether a module originates from a chunk group's scope.
#[derive(Debug, Clone)]
pub enum OriginPredicate {
    /// The module's resolved path lies inside the named directory.
    WithinDirectory {
        /// Directory component identifying the scope, e.g. `node_modules`.
        dir: String,
    },
    /// The module is part of the initial chunk graph and not an entry point.
    InitialSharedModule,
}

impl OriginPredicate {
    fn matches(&self, module: &ModuleRecord, normalised_path: &str) -> bool {
        match self {
            Self::WithinDirectory { dir } => normalised_path
                .split('/')
                .any(|component| component == dir),
            Self::InitialSharedModule => module.in_initial_graph && !module.is_entry,
        }
    }
}

/// Named bucket that compiled modules are merged into for output bundling.
#[derive(Debug, Clone)]
pub struct ChunkGroup {
    /// Name of the emitted chunk, e.g. `vendor`.
    pub name: String,
    /// Predicate selecting modules for this group.
    pub origin: OriginPredicate,
    /// Modules must be strictly larger than this to qualify.
    pub min_size_bytes: u64,
    /// Groups are evaluated in descending priority.
    pub priority: i32,
}

impl ChunkGroup {
    fn matches(&self, module: &ModuleRecord, normalised_path: &str) -> bool {
        module.size_bytes > self.min_size_bytes && self.origin.matches(module, normalised_path)
    }
}

/// The configured chunk groups plus the entry table used for fallback naming.
#[derive(Debug, Clone)]
pub struct ChunkGroups {
    groups: Vec<ChunkGroup>,
    entry_names: BTreeMap<String, String>,
}

impl ChunkGroups {
    /// The built-in split policy: vendored dependencies into `vendor`,
    /// remaining shared initial-graph code into `utils`.
    pub fn builtin(config: &BuildConfig) -> Self {
        let groups = vec![
            ChunkGroup {
                name: "vendor".into(),
                origin: OriginPredicate::WithinDirectory {
                    dir: config.vendored_dir.clone(),
                },
                min_size_bytes: 0,
                priority: VENDOR_GROUP_PRIORITY,
            },
            ChunkGroup {
                name: "utils".into(),
                origin: OriginPredicate::InitialSharedModule,
                min_size_bytes: 0,
                priority: 0,
            },
        ];

        Self::new(groups, config)
    }

    /// Build a group set from explicit groups, keeping the entry table for
    /// natural-chunk naming.
    pub fn new(mut groups: Vec<ChunkGroup>, config: &BuildConfig) -> Self {
        // Stable sort keeps declaration order within a priority level, so
        // ambiguity detection reports groups in a reproducible order.
        groups.sort_by_key(|group| std::cmp::Reverse(group.priority));

        let entry_names = config
            .entries
            .iter()
            .map(|(name, path)| {
                let key = path.trim_start_matches("./").replace('\\', "/");
                (key, name.clone())
            })
            .collect();

        Self {
            groups,
            entry_names,
        }
    }

    /// Assign the module to the highest-priority group whose predicate holds.
    ///
    /// A module no group claims stays in its natural entry chunk. Two groups
    /// matching at the same winning priority is a configuration defect and is
    /// reported rather than resolved by declaration order.
    pub fn assign(&self, module: &ModuleRecord) -> Result<ChunkTarget, ResolveError> {
        let normalised = module.path.replace('\\', "/");

        let mut index = 0;
        while index < self.groups.len() {
            let priority = self.groups[index].priority;
            let tier_end = self.groups[index..]
                .iter()
                .position(|group| group.priority != priority)
                .map_or(self.groups.len(), |offset| index + offset);

            let matched: Vec<&ChunkGroup> = self.groups[index..tier_end]
                .iter()
                .filter(|group| group.matches(module, &normalised))
                .collect();

            match matched.as_slice() {
                [] => index = tier_end,
                [group] => {
                    debug!("assigned {} to chunk {}", module.path, group.name);
                    return Ok(ChunkTarget::Group(group.name.clone()));
                }
                conflict => {
                    return Err(ResolveError::AmbiguousChunkAssignment {
                        path: module.path.clone(),
                        priority,
                        groups: conflict.iter().map(|group| group.name.clone()).collect(),
                    });
                }
            }
        }

        Ok(ChunkTarget::Entry(self.natural_chunk_name(&normalised)))
    }

    /// Name of the module's natural entry chunk: the configured entry name
    /// when the path is a registered entry point, its file stem otherwise.
    fn natural_chunk_name(&self, normalised_path: &str) -> String {
        let trimmed = normalised_path.trim_start_matches("./");
        if let Some(name) = self.entry_names.get(trimmed) {
            return name.clone();
        }

        std::path::Path::new(trimmed)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| trimmed.to_string())
    }
}
