//! Data structures shared by the rule, chunk and alias resolvers.

use serde::{Deserialize, Serialize};

/// Fallback applied when stylesheet extraction is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleFallback {
    /// Inject the stylesheet into the document as an inline `<style>` tag.
    InlineStyle,
}

/// A named transformation step within a rule's pipeline.
///
/// Steps are identifiers handed to external loader implementations; the
/// resolver only decides which steps apply and in what order. The two
/// parametrized steps carry the options the loader needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "step", rename_all = "kebab-case")]
pub enum PipelineStep {
    /// Extract compiled CSS into a standalone file.
    ExtractToFile {
        /// Behaviour when extraction is not possible.
        fallback: StyleFallback,
    },
    /// Resolve `@import` and `url()` references inside CSS.
    CssTransform,
    /// Run PostCSS plugins over the stylesheet.
    PostcssTransform,
    /// Compile Less down to CSS.
    LessTransform,
    /// Compile Sass/SCSS down to CSS.
    SassTransform,
    /// Transpile modern ECMAScript for the configured targets.
    EcmascriptTranspile,
    /// Inline small assets as data URIs, copy larger ones verbatim.
    InlineOrCopy {
        /// Assets strictly smaller than this byte count are inlined.
        threshold_bytes: u64,
        /// Directory copied assets are emitted into.
        output_dir: String,
    },
    /// Rewrite image references embedded in HTML documents.
    RewriteEmbeddedImageReferences,
    /// Copy the file unchanged under a content-hashed name.
    CopyVerbatimWithContentHashName,
    /// Emit the file untouched. Only produced by a configured fallback rule.
    PassThrough,
}

/// A module's position in the build graph, as reported by the external
/// module resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRecord {
    /// Path of the module's source file, relative to the project root.
    pub path: String,
    /// Size of the module's compiled output in bytes.
    pub size_bytes: u64,
    /// Whether the module is itself a configured entry point.
    pub is_entry: bool,
    /// Whether the module is reachable from the initial chunk graph.
    pub in_initial_graph: bool,
}

impl ModuleRecord {
    /// A configured entry-point module.
    pub fn entry(path: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            path: path.into(),
            size_bytes,
            is_entry: true,
            in_initial_graph: true,
        }
    }

    /// A non-entry module reachable from the initial chunk graph.
    pub fn initial(path: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            path: path.into(),
            size_bytes,
            is_entry: false,
            in_initial_graph: true,
        }
    }

    /// A module only reachable through dynamic imports.
    pub fn dynamic(path: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            path: path.into(),
            size_bytes,
            is_entry: false,
            in_initial_graph: false,
        }
    }
}

/// The output chunk a compiled module is merged into.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChunkTarget {
    /// A shared split chunk selected by a [`crate::chunks::ChunkGroup`].
    Group(String),
    /// The module's natural entry chunk; no group claimed it.
    Entry(String),
}

impl std::fmt::Display for ChunkTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Group(name) | Self::Entry(name) => write!(f, "{name}"),
        }
    }
}

/// Resolution output for one module, consumed by the external emitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAsset {
    /// Path of the module's source file.
    pub source_path: String,
    /// Ordered transformation steps to apply to the file's contents.
    pub pipeline: Vec<PipelineStep>,
    /// Output chunk the compiled module belongs to.
    pub target_chunk: ChunkTarget,
}
