//! Command-line interface for svelte-accmod-patch.
//!
//! # Commands
//!
//! - `apply` (default) - install `svelte-accmod` matching the installed
//!   `svelte`, copy its files over `node_modules/svelte`, then uninstall it
//! - `revert` - delete the patched `node_modules/svelte` and run `npm install`
//!
//! The historical single-dash spellings `-apply` and `-revert` are accepted
//! too; [`normalize_args`] rewrites them to subcommands before parsing.
//!
//! ```bash
//! # Patch the project in the current directory
//! svelte-accmod-patch
//! svelte-accmod-patch -apply
//!
//! # Undo the patch in another project, with debug logging
//! svelte-accmod-patch --verbose -C ../my-app revert
//! ```
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug logging
//! - `--quiet` - Suppress everything except errors
//! - `--no-progress` - Plain status lines instead of spinners
//! - `--project-dir` - Project root (defaults to the current directory)
//! - `--config` - Path to a config file

mod apply;
pub mod common;
mod revert;


use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub use common::PatchContext;

use crate::config::PatcherConfig;
use crate::core::{PatchError, ProjectLayout};
use crate::utils::progress::{OutputMode, Reporter};

/// Settings derived from the global flags, passed explicitly into execution.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Default tracing filter (`RUST_LOG` takes precedence)
    pub log_level: String,

    /// How progress and status lines are rendered
    pub output_mode: OutputMode,

    /// Explicit config file (`--config`)
    pub config_path: Option<PathBuf>,

    /// Project root (`--project-dir`), current directory when `None`
    pub project_dir: Option<PathBuf>,
}

impl CliConfig {
    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// `RUST_LOG` overrides the level chosen from the flags. Calling this
    /// more than once is harmless.
    pub fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(&self.log_level)
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .try_init();
    }
}

/// Patch an installed `svelte` with the accessibility-modified `svelte-accmod` files.
#[derive(Debug, Parser)]
#[command(
    name = "svelte-accmod-patch",
    about = "Replace installed 'svelte' files with 'svelte-accmod' files, or revert that",
    version,
    long_about = "Installs the svelte-accmod release matching your installed svelte, copies its \
                  files over node_modules/svelte and uninstalls it again. 'revert' deletes the \
                  patched svelte and reinstalls the original with 'npm install'."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Print plain status lines instead of animated spinners
    #[arg(long, global = true)]
    no_progress: bool,

    /// Project root containing node_modules (defaults to the current directory)
    #[arg(short = 'C', long, global = true, value_name = "PATH", allow_hyphen_values = true)]
    project_dir: Option<PathBuf>,

    /// Path to a config file (defaults to ./svelte-accmod-patch.toml when present)
    #[arg(long, global = true, value_name = "PATH", allow_hyphen_values = true)]
    config: Option<PathBuf>,
}

/// The two workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Replace 'svelte' files with 'svelte-accmod' files (default)
    Apply,

    /// Delete the patched 'svelte' and reinstall the original
    Revert,
}

/// Options whose value is the next argument and must not be rewritten.
const VALUE_OPTIONS: &[&str] = &["-C", "--project-dir", "--config"];

/// Rewrite the legacy `-apply` / `-revert` spellings to subcommands.
///
/// The first element is the program name and is never rewritten, nor is the
/// value following `-C`, `--project-dir` or `--config`.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut takes_value = false;
    args.into_iter()
        .enumerate()
        .map(|(i, arg)| {
            let arg = arg.into();
            if i == 0 || std::mem::take(&mut takes_value) {
                return arg;
            }
            match arg.to_str() {
                Some("-apply") => OsString::from("apply"),
                Some("-revert") => OsString::from("revert"),
                Some(option) => {
                    takes_value = VALUE_OPTIONS.contains(&option);
                    arg
                }
                None => arg,
            }
        })
        .collect()
}

impl Cli {
    /// The workflow to run; no subcommand means apply.
    #[must_use]
    pub fn command(&self) -> Commands {
        self.command.unwrap_or(Commands::Apply)
    }

    /// Derive the [`CliConfig`] from the global flags.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        CliConfig {
            log_level: log_level.to_string(),
            output_mode: OutputMode::detect(self.quiet, self.no_progress),
            config_path: self.config.clone(),
            project_dir: self.project_dir.clone(),
        }
    }

    /// Run the selected workflow with an explicit configuration.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        let project_dir = match config.project_dir {
            Some(dir) => dir,
            None => std::env::current_dir().context("Failed to determine the current directory")?,
        };
        if !project_dir.is_dir() {
            return Err(PatchError::Other {
                message: format!("Project directory does not exist: {}", project_dir.display()),
            }
            .into());
        }

        let layout = ProjectLayout::new(project_dir);
        let patcher_config = PatcherConfig::load(layout.root(), config.config_path.as_deref()).await?;
        tracing::debug!(target: "patch", "Running {:?} in {}", self.command(), layout.root().display());

        let ctx = PatchContext::new(layout, patcher_config, Reporter::new(config.output_mode));
        match self.command() {
            Commands::Apply => apply::execute(&ctx).await,
            Commands::Revert => revert::execute(&ctx).await,
        }
    }
}
