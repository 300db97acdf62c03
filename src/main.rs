//! Command-line inspector for a build configuration's resolution decisions.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use bundle_rules::{AssetResolver, BuildConfig, ModuleRecord};

#[derive(Parser)]
#[command(name = "bundle-rules", version, about)]
struct Cli {
    /// Explicit configuration file; defaults to bundle.config.json in the
    /// project root, falling back to built-in defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Project root the alias table and entry points are anchored at.
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show which rule and pipeline each file path is classified under.
    Classify {
        /// File paths to classify.
        paths: Vec<String>,
    },
    /// Show which output chunk each module is assigned to.
    Chunks {
        /// Module paths; sizes are read from the filesystem when present.
        paths: Vec<String>,
    },
    /// Resolve import specifiers through the alias table.
    Resolve {
        /// Import specifiers as written in source modules.
        specifiers: Vec<String>,
    },
    /// Print the effective configuration as JSON.
    Show,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => BuildConfig::from_path(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => BuildConfig::discover(&cli.project_root),
    };
    let resolver = AssetResolver::new(&cli.project_root, &config);

    match cli.command {
        Command::Classify { paths } => {
            for path in paths {
                let rule = resolver
                    .classify(&path)
                    .with_context(|| format!("failed to classify {path}"))?;
                println!(
                    "{path}: {} {}",
                    rule.name,
                    serde_json::to_string(&rule.pipeline)?
                );
            }
        }
        Command::Chunks { paths } => {
            for path in paths {
                let module = module_from_path(&config, &cli.project_root, &path);
                let target = resolver
                    .resolve(&module)
                    .map(|asset| asset.target_chunk)
                    .with_context(|| format!("failed to assign a chunk for {path}"))?;
                println!("{path}: {target}");
            }
        }
        Command::Resolve { specifiers } => {
            for specifier in specifiers {
                let resolved = resolver
                    .resolve_import(&specifier)
                    .with_context(|| format!("failed to resolve {specifier}"))?;
                println!("{specifier}: {}", resolved.display());
            }
        }
        Command::Show => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

/// Build a module record for CLI inspection: sizes come from the filesystem
/// when the file exists, and entry status from the configured entry table.
fn module_from_path(config: &BuildConfig, project_root: &Path, path: &str) -> ModuleRecord {
    let size_bytes = fs::metadata(project_root.join(path))
        .map(|meta| meta.len())
        .unwrap_or(1);
    let normalised = path.trim_start_matches("./");
    let is_entry = config
        .entries
        .values()
        .any(|entry| entry.trim_start_matches("./") == normalised);

    if is_entry {
        ModuleRecord::entry(path, size_bytes)
    } else {
        ModuleRecord::initial(path, size_bytes)
    }
}
