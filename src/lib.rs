#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod alias;
pub mod assets;
pub mod chunks;
pub mod config;
pub mod error;
pub mod models;
pub mod resolver;
pub mod rules;

pub use alias::AliasTable;
pub use chunks::{ChunkGroup, ChunkGroups, OriginPredicate};
pub use config::{BuildConfig, DevServerConfig, HtmlConfig, OutputConfig};
pub use error::ResolveError;
pub use models::{ChunkTarget, ModuleRecord, PipelineStep, ResolvedAsset, StyleFallback};
pub use resolver::AssetResolver;
pub use rules::{Rule, RuleSet};
