//! Builder for npm child processes
//!
//! Every npm invocation the patcher makes goes through [`NpmCommand`], so
//! they all share the same working-directory handling, timeout behaviour,
//! logging and error mapping.
//!
//! # Examples
//!
//! ```rust,no_run
//! use svelte_accmod_patch::npm::NpmCommand;
//! use std::time::Duration;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let output = NpmCommand::install_all()
//!     .current_dir("/path/to/project")
//!     .with_timeout(Some(Duration::from_secs(600)))
//!     .execute()
//!     .await?;
//! println!("{}", output.stdout);
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tokio::time::timeout;

use crate::constants::NPM_DEFAULT_TIMEOUT;
use crate::core::PatchError;
use crate::utils::platform::{get_npm_command, resolve_command};
use crate::version::CompanionSpec;

/// Fluent builder for one npm invocation.
///
/// Defaults: the platform npm executable, the process working directory,
/// captured stdout/stderr and a five minute timeout.
#[derive(Debug, Clone)]
pub struct NpmCommand {
    /// Executable to spawn (`npm`, `npm.cmd` or a configured path)
    program: String,

    /// Arguments after the executable, e.g. `["uninstall", "svelte-accmod"]`
    args: Vec<String>,

    /// Working directory; npm resolves `package.json` from here
    current_dir: Option<PathBuf>,

    /// Maximum time to wait for the child (None = wait forever)
    timeout_duration: Option<Duration>,

    /// Label included in log lines
    context: Option<String>,
}

impl Default for NpmCommand {
    fn default() -> Self {
        Self {
            program: get_npm_command().to_string(),
            args: Vec::new(),
            current_dir: None,
            timeout_duration: Some(NPM_DEFAULT_TIMEOUT),
            context: None,
        }
    }
}

impl NpmCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different npm executable (name resolved on `PATH`, or a path).
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Run npm in `dir`.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the timeout (None for no timeout).
    pub const fn with_timeout(mut self, duration: Option<Duration>) -> Self {
        self.timeout_duration = duration;
        self
    }

    /// Set a label for log messages, e.g. the workflow step.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// The arguments that will be passed to npm.
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn get_program(&self) -> &str {
        &self.program
    }

    /// The argument line, as used in error messages (`i svelte-accmod@4.0.0 --save-dev`).
    pub fn operation(&self) -> String {
        self.args.join(" ")
    }

    /// Spawn npm, wait for it and return its captured output.
    ///
    /// # Errors
    ///
    /// - [`PatchError::NpmNotFound`] if the executable cannot be found
    /// - [`PatchError::NpmSpawnFailed`] for any other spawn failure
    /// - [`PatchError::NpmCommandError`] if npm exits non-zero
    /// - [`PatchError::NpmTimeout`] if the timeout elapses first; the child is killed
    pub async fn execute(self) -> Result<NpmCommandOutput> {
        let start = Instant::now();
        let operation = self.operation();
        let prefix = self.context.as_ref().map(|ctx| format!("({ctx}) ")).unwrap_or_default();

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.kill_on_drop(true);

        tracing::debug!(
            target: "npm",
            "{}Executing command: {} {}{}",
            prefix,
            self.program,
            operation,
            self.current_dir
                .as_ref()
                .map(|dir| format!(" (in {})", dir.display()))
                .unwrap_or_default()
        );

        tracing::trace!(
            target: "npm",
            "{}Resolved {} to {:?}",
            prefix,
            self.program,
            resolve_command(&self.program)
        );

        let output_future = cmd.output();
        let result = if let Some(duration) = self.timeout_duration {
            if let Ok(result) = timeout(duration, output_future).await {
                result
            } else {
                tracing::warn!(
                    target: "npm",
                    "{}Command timed out after {} seconds: {} {}",
                    prefix,
                    duration.as_secs(),
                    self.program,
                    operation
                );
                return Err(PatchError::NpmTimeout {
                    operation,
                    seconds: duration.as_secs(),
                }
                .into());
            }
        } else {
            output_future.await
        };

        let output = result.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PatchError::NpmNotFound {
                    command: self.program.clone(),
                }
            } else {
                PatchError::NpmSpawnFailed {
                    command: self.program.clone(),
                    reason: e.to_string(),
                }
            }
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            tracing::debug!(
                target: "npm",
                "{}Command failed with exit code: {:?}",
                prefix,
                output.status.code()
            );
            if !stderr.is_empty() {
                tracing::debug!(target: "npm", "{}Error: {}", prefix, stderr.trim());
            }

            // npm sometimes reports resolution failures on stdout only
            let stderr = if stderr.trim().is_empty() {
                stdout
            } else {
                stderr
            };
            return Err(PatchError::NpmCommandError {
                operation,
                stderr,
            }
            .into());
        }

        if !stdout.is_empty() {
            tracing::debug!(target: "npm", "{}{}", prefix, stdout.trim());
        }
        if !stderr.is_empty() {
            tracing::debug!(target: "npm", "{}{}", prefix, stderr.trim());
        }

        let elapsed = start.elapsed();
        if elapsed.as_secs() > 1 {
            tracing::info!(target: "npm::perf", "{}npm {} took {:.2}s", prefix, operation, elapsed.as_secs_f64());
        } else if elapsed.as_millis() > 100 {
            tracing::debug!(target: "npm::perf", "{}npm {} took {}ms", prefix, operation, elapsed.as_millis());
        }

        Ok(NpmCommandOutput {
            stdout,
            stderr,
        })
    }

    /// Run the command, discarding its output.
    pub async fn execute_success(self) -> Result<()> {
        self.execute().await?;
        Ok(())
    }
}

/// Captured output of a finished npm command.
#[derive(Debug, Clone)]
pub struct NpmCommandOutput {
    pub stdout: String,
    pub stderr: String,
}

impl NpmCommand {
    /// `npm i <companion>@<version> --save-dev`
    pub fn install_dev(spec: &CompanionSpec) -> Self {
        Self::new().args(["i".to_string(), spec.to_string(), "--save-dev".to_string()])
    }

    /// `npm uninstall <package> --save-dev`
    pub fn uninstall_dev(package: &str) -> Self {
        Self::new().args(["uninstall", package, "--save-dev"])
    }

    /// `npm install`
    pub fn install_all() -> Self {
        Self::new().arg("install")
    }
}
