//! Runtime configuration
//!
//! The patcher needs almost no configuration. The optional
//! `svelte-accmod-patch.toml` at the project root (or a file passed with
//! `--config`) can point it at a different npm executable and adjust the
//! timeouts of the external operations:
//!
//! ```toml
//! npm = "/opt/node/bin/npm"
//! install_timeout_secs = 900
//! uninstall_timeout_secs = 300
//! copy_timeout_secs = 0   # 0 disables the timeout
//! ```
//!
//! Every key is optional. Unknown keys are rejected so that typos do not go
//! unnoticed. The `SVELTE_ACCMOD_PATCH_NPM` environment variable, when set,
//! replaces `npm`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::fs;

use crate::constants::{
    CONFIG_FILE_NAME, COPY_TIMEOUT, NPM_ENV_VAR, NPM_INSTALL_TIMEOUT, NPM_UNINSTALL_TIMEOUT,
};
use crate::core::PatchError;
use crate::utils::platform::get_npm_command;

/// Settings for one patcher run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatcherConfig {
    /// npm executable, looked up on `PATH` unless it is a path
    pub npm: String,

    /// Timeout for `npm i svelte-accmod@<version>` and `npm install`, in seconds
    pub install_timeout_secs: u64,

    /// Timeout for `npm uninstall svelte-accmod`, in seconds
    pub uninstall_timeout_secs: u64,

    /// Timeout for the whole file replacement step, in seconds
    pub copy_timeout_secs: u64,
}

impl Default for PatcherConfig {
    fn default() -> Self {
        Self {
            npm: get_npm_command().to_string(),
            install_timeout_secs: NPM_INSTALL_TIMEOUT.as_secs(),
            uninstall_timeout_secs: NPM_UNINSTALL_TIMEOUT.as_secs(),
            copy_timeout_secs: COPY_TIMEOUT.as_secs(),
        }
    }
}

impl PatcherConfig {
    /// Load the configuration for a project.
    ///
    /// An explicit `path` must exist. Without one, `<project_root>/svelte-accmod-patch.toml`
    /// is used if present, and defaults otherwise. The npm environment
    /// override is applied last.
    pub async fn load(project_root: &Path, path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(PatchError::ConfigError {
                        message: format!("Config file not found: {}", path.display()),
                    }
                    .into());
                }
                Self::load_from(path).await?
            }
            None => {
                let default_path = project_root.join(CONFIG_FILE_NAME);
                if default_path.exists() {
                    Self::load_from(&default_path).await?
                } else {
                    tracing::debug!(target: "patch", "No {} found, using defaults", CONFIG_FILE_NAME);
                    Self::default()
                }
            }
        };

        Ok(config.with_npm_override(std::env::var(NPM_ENV_VAR).ok()))
    }

    /// Read and parse a config file.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config = Self::parse(&content).map_err(|e| PatchError::ConfigError {
            message: format!("{}: {e}", path.display()),
        })?;
        tracing::debug!(target: "patch", "Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse TOML text.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Replace `npm` with `value` when it is set and not blank.
    #[must_use]
    pub fn with_npm_override(mut self, value: Option<String>) -> Self {
        if let Some(npm) = value.filter(|v| !v.trim().is_empty()) {
            tracing::debug!(target: "patch", "Using npm from {}: {}", NPM_ENV_VAR, npm);
            self.npm = npm;
        }
        self
    }

    pub fn install_timeout(&self) -> Option<Duration> {
        secs_to_timeout(self.install_timeout_secs)
    }

    pub fn uninstall_timeout(&self) -> Option<Duration> {
        secs_to_timeout(self.uninstall_timeout_secs)
    }

    pub fn copy_timeout(&self) -> Option<Duration> {
        secs_to_timeout(self.copy_timeout_secs)
    }
}

const fn secs_to_timeout(secs: u64) -> Option<Duration> {
    if secs == 0 {
        None
    } else {
        Some(Duration::from_secs(secs))
    }
}
