//! npm operations used by the apply and revert workflows.
//!
//! [`Npm`] binds the configured executable and timeouts to a project root and
//! exposes the three package operations the patcher performs. Each one runs
//! under its own spinner; the raw process handling lives in
//! [`command_builder`].

pub mod command_builder;

use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;

pub use command_builder::{NpmCommand, NpmCommandOutput};

use crate::config::PatcherConfig;
use crate::constants::{APPLY_PREFIX, COMPANION_PACKAGE, REVERT_PREFIX, TARGET_PACKAGE};
use crate::core::ProjectLayout;
use crate::utils::progress::Reporter;
use crate::version::CompanionSpec;

/// The npm executable of one project, with the configured timeouts.
#[derive(Debug, Clone)]
pub struct Npm {
    program: String,
    project_root: PathBuf,
    install_timeout: Option<Duration>,
    uninstall_timeout: Option<Duration>,
}

impl Npm {
    pub fn new(config: &PatcherConfig, layout: &ProjectLayout) -> Self {
        Self {
            program: config.npm.clone(),
            project_root: layout.root().to_path_buf(),
            install_timeout: config.install_timeout(),
            uninstall_timeout: config.uninstall_timeout(),
        }
    }

    fn prepare(&self, cmd: NpmCommand, timeout: Option<Duration>) -> NpmCommand {
        cmd.program(&self.program).current_dir(&self.project_root).with_timeout(timeout)
    }

    /// `npm i svelte-accmod@<version> --save-dev`
    pub async fn install_companion(&self, spec: &CompanionSpec, reporter: &Reporter) -> Result<()> {
        let spinner = reporter.step(format!("installing {spec} ..."));

        let cmd = self.prepare(NpmCommand::install_dev(spec), self.install_timeout);
        match cmd.with_context("install").execute_success().await {
            Ok(()) => {
                spinner.succeed(format!("installed {spec} ..."));
                Ok(())
            }
            Err(e) => {
                spinner.fail(format!("oops! ABORT: {spec} not available!").red().to_string());
                Err(e)
            }
        }
    }

    /// `npm uninstall svelte-accmod --save-dev`
    pub async fn uninstall_companion(&self, reporter: &Reporter) -> Result<()> {
        let spinner = reporter.step(format!("uninstalling '{COMPANION_PACKAGE}' ..."));

        let cmd = self.prepare(NpmCommand::uninstall_dev(COMPANION_PACKAGE), self.uninstall_timeout);
        match cmd.with_context("uninstall").execute_success().await {
            Ok(()) => {
                spinner.succeed(format!("'{COMPANION_PACKAGE}' uninstalled!"));
                Ok(())
            }
            Err(e) => {
                spinner.fail(
                    format!(
                        "{APPLY_PREFIX} oops! 😬 something went wrong while trying to uninstall '{COMPANION_PACKAGE}'!"
                    )
                    .red()
                    .to_string(),
                );
                Err(e)
            }
        }
    }

    /// `npm install`, restoring every dependency from the project manifest.
    pub async fn reinstall_all(&self, reporter: &Reporter) -> Result<()> {
        let spinner =
            reporter.step(format!("{REVERT_PREFIX} re-installing original '{TARGET_PACKAGE}' ..."));

        let cmd = self.prepare(NpmCommand::install_all(), self.install_timeout);
        match cmd.with_context("reinstall").execute_success().await {
            Ok(()) => {
                spinner.succeed(format!("re-installed original '{TARGET_PACKAGE}'!"));
                Ok(())
            }
            Err(e) => {
                spinner.fail(
                    format!(
                        "{REVERT_PREFIX} oops! 😬 something went wrong while trying to re-install original '{TARGET_PACKAGE}'!"
                    )
                    .red()
                    .to_string(),
                );
                Err(e)
            }
        }
    }
}
