//! Build configuration loader describing rules, aliases and output layout.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const DEFAULT_CONFIG_FILE: &str = "bundle.config.json";

/// Declarative build configuration constructed once at startup.
///
/// Everything below `entries` through `dev_server` is pass-through data for
/// external collaborators (the emitter, the HTML generator, the dev server);
/// the resolver itself only reads `source_dir`, `vendored_dir`, `aliases` and
/// `allow_passthrough`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildConfig {
    /// Entry points by chunk name.
    pub entries: BTreeMap<String, String>,
    /// Output locations and filename patterns.
    pub output: OutputConfig,
    /// HTML generation settings forwarded to the external generator.
    pub html: HtmlConfig,
    /// Development server settings forwarded verbatim.
    pub dev_server: DevServerConfig,
    /// Directory containing project source files.
    pub source_dir: String,
    /// Directory containing externally vendored dependencies.
    pub vendored_dir: String,
    /// Alias table rewriting leading import-specifier segments.
    pub aliases: BTreeMap<String, String>,
    /// When set, files no rule matches pass through untransformed instead of
    /// failing classification.
    pub allow_passthrough: bool,
}

/// Output directory and filename patterns for emitted bundles.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OutputConfig {
    /// Directory all build output is written into.
    pub dir: String,
    /// Filename pattern for emitted scripts; `[name]` expands to the chunk name.
    pub script_pattern: String,
    /// Filename pattern for extracted stylesheets.
    pub stylesheet_pattern: String,
    /// Remove the output directory before each build.
    pub clean_before_build: bool,
}

/// Settings for the external HTML document generator.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HtmlConfig {
    /// Template document the generated page is derived from.
    pub template: String,
    /// Chunks referenced from the generated document, in include order.
    pub chunks: Vec<String>,
}

/// Pass-through development server settings. No field is interpreted here.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DevServerConfig {
    /// TCP port the server listens on.
    pub port: u16,
    /// Open the system browser once the server is up.
    pub open_browser: bool,
    /// Enable hot module reloading.
    pub hot_reload: bool,
    /// Overlay build errors on the served page.
    pub show_overlay_errors: bool,
    /// Serve the index document for unknown paths (history API routing).
    pub history_fallback: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert("index".to_string(), "./src/index.js".to_string());

        let mut aliases = BTreeMap::new();
        aliases.insert("pages".to_string(), "src/pages".to_string());
        aliases.insert("component".to_string(), "src/component".to_string());
        aliases.insert("actions".to_string(), "src/redux/actions".to_string());
        aliases.insert("reducers".to_string(), "src/redux/reducers".to_string());

        Self {
            entries,
            output: OutputConfig::default(),
            html: HtmlConfig::default(),
            dev_server: DevServerConfig::default(),
            source_dir: "src".into(),
            vendored_dir: "node_modules".into(),
            aliases,
            allow_passthrough: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "dist".into(),
            script_pattern: "[name].js".into(),
            stylesheet_pattern: "[name].css".into(),
            clean_before_build: true,
        }
    }
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            template: "./src/index.html".into(),
            chunks: vec!["vendor".into(), "index".into(), "utils".into()],
        }
    }
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            open_browser: true,
            hot_reload: true,
            show_overlay_errors: true,
            history_fallback: true,
        }
    }
}

impl BuildConfig {
    /// Attempt to load configuration from the provided directory.
    ///
    /// When the configuration file does not exist or fails to parse we fall
    /// back to default values so downstream callers can continue operating
    /// with sensible assumptions.
    pub fn discover(project_dir: &Path) -> Self {
        let candidate = project_dir.join(DEFAULT_CONFIG_FILE);
        Self::from_path(&candidate).unwrap_or_default()
    }

    /// Read configuration from a specific JSON file.
    pub fn from_path(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Absolute output directory for a given project root.
    pub fn output_dir_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.output.dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_mirror_the_reference_configuration() {
        let config = BuildConfig::default();

        assert_eq!(config.entries["index"], "./src/index.js");
        assert_eq!(config.output.dir, "dist");
        assert_eq!(config.output.script_pattern, "[name].js");
        assert_eq!(config.output.stylesheet_pattern, "[name].css");
        assert_eq!(config.html.chunks, vec!["vendor", "index", "utils"]);
        assert_eq!(config.dev_server.port, 3000);
        assert!(config.dev_server.open_browser);
        assert!(config.dev_server.hot_reload);
        assert!(config.dev_server.show_overlay_errors);
        assert!(config.dev_server.history_fallback);
        assert_eq!(config.aliases["component"], "src/component");
        assert!(!config.allow_passthrough);
    }

    #[test]
    fn discover_falls_back_to_defaults_for_missing_file() {
        let temp = tempdir().expect("failed to create temp dir");
        let config = BuildConfig::discover(temp.path());

        assert_eq!(config.source_dir, "src");
        assert_eq!(config.vendored_dir, "node_modules");
    }

    #[test]
    fn discover_reads_configuration_overrides() {
        let temp = tempdir().expect("failed to create temp dir");
        std::fs::write(
            temp.path().join("bundle.config.json"),
            r#"{
                "sourceDir": "app",
                "devServer": { "port": 8080, "openBrowser": false },
                "allowPassthrough": true
            }"#,
        )
        .expect("failed to write config file");

        let config = BuildConfig::discover(temp.path());

        assert_eq!(config.source_dir, "app");
        assert_eq!(config.dev_server.port, 8080);
        assert!(!config.dev_server.open_browser);
        assert!(config.dev_server.hot_reload, "unset fields keep defaults");
        assert!(config.allow_passthrough);
    }

    #[test]
    fn output_paths_are_anchored_at_the_project_root() {
        let config = BuildConfig::default();
        assert_eq!(
            config.output_dir_path(Path::new("/proj")),
            PathBuf::from("/proj/dist")
        );
    }
}
