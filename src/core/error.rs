//! Error handling for svelte-accmod-patch
//!
//! The error system follows two rules:
//! 1. **Strongly-typed errors** ([`PatchError`]) so each workflow step can say
//!    precisely what went wrong
//! 2. **User-friendly output** ([`ErrorContext`]) with details and an actionable
//!    suggestion, rendered once by the binary's top-level handler
//!
//! # Error Categories
//!
//! - **Manifest**: [`PatchError::ManifestNotFound`], [`PatchError::ManifestReadError`],
//!   [`PatchError::ManifestParseError`]
//! - **External process**: [`PatchError::NpmNotFound`], [`PatchError::NpmSpawnFailed`],
//!   [`PatchError::NpmCommandError`], [`PatchError::NpmTimeout`]
//! - **Filesystem**: [`PatchError::CopyFailed`], [`PatchError::ReplaceFailed`],
//!   [`PatchError::CopyTimeout`], [`PatchError::DeleteFailed`]
//! - **Configuration**: [`PatchError::ConfigError`]
//!
//! Workflow steps return [`anyhow::Result`] and attach [`PatchError`] values as the
//! root cause. Nothing below `main` terminates the process; [`user_friendly_error`]
//! recovers the typed error from the chain for display.
//!
//! # Examples
//!
//! ```rust,no_run
//! use svelte_accmod_patch::core::{PatchError, user_friendly_error};
//!
//! let err = anyhow::Error::from(PatchError::NpmNotFound {
//!     command: "npm".to_string(),
//! });
//! let ctx = user_friendly_error(err);
//! ctx.display(); // colored error, details and suggestion on stderr
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for patcher operations.
#[derive(Error, Debug, Clone)]
pub enum PatchError {
    /// The installed target library has no `package.json`.
    ///
    /// Usually means the project's dependencies were never installed, or the
    /// tool was started outside the project root.
    #[error("Installed package manifest not found: {path}")]
    ManifestNotFound {
        /// Expected location of the manifest
        path: String,
    },

    /// The manifest exists but could not be read.
    #[error("Failed to read package manifest {path}: {reason}")]
    ManifestReadError {
        /// Location of the manifest
        path: String,
        /// Underlying I/O failure
        reason: String,
    },

    /// The manifest is not valid JSON (with comments) or lacks a `version`.
    #[error("Invalid package manifest {file}: {reason}")]
    ManifestParseError {
        /// Location of the manifest
        file: String,
        /// Parser message
        reason: String,
    },

    /// The npm executable could not be located.
    #[error("npm executable '{command}' not found")]
    NpmNotFound {
        /// Executable name or path that was tried
        command: String,
    },

    /// npm was found but could not be started.
    #[error("Failed to start '{command}': {reason}")]
    NpmSpawnFailed {
        /// Executable name or path
        command: String,
        /// OS-level failure
        reason: String,
    },

    /// An npm invocation exited with a non-zero status.
    ///
    /// # Fields
    /// - `operation`: the full npm argument line, e.g. `i svelte-accmod@4.0.0 --save-dev`
    /// - `stderr`: captured error output of the child
    #[error("npm {operation} failed")]
    NpmCommandError {
        /// The npm arguments that failed
        operation: String,
        /// Captured error output
        stderr: String,
    },

    /// An npm invocation did not finish within its timeout.
    #[error("npm {operation} timed out after {seconds}s")]
    NpmTimeout {
        /// The npm arguments that timed out
        operation: String,
        /// Elapsed limit in seconds
        seconds: u64,
    },

    /// A single manifest entry could not be copied.
    #[error("Failed to copy '{entry}': {reason}")]
    CopyFailed {
        /// Manifest entry name
        entry: String,
        /// Underlying failure
        reason: String,
    },

    /// One or more manifest entries were not copied, so the swap is incomplete.
    #[error("Replaced {succeeded} of {total} entries; failed: {}", entries.join(", "))]
    ReplaceFailed {
        /// Number of entries copied successfully
        succeeded: usize,
        /// Number of manifest entries
        total: usize,
        /// Names of the failed entries, in manifest order
        entries: Vec<String>,
    },

    /// The copy fan-in did not complete within its timeout.
    #[error("Replacing files timed out after {seconds}s")]
    CopyTimeout {
        /// Elapsed limit in seconds
        seconds: u64,
    },

    /// The patched install directory could not be removed.
    #[error("Failed to delete {path}: {reason}")]
    DeleteFailed {
        /// Directory that was being removed
        path: String,
        /// Underlying failure
        reason: String,
    },

    /// Runtime configuration is invalid.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the problem
        message: String,
    },

    /// Anything that has no dedicated variant.
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

/// A [`PatchError`] together with optional details and a suggestion.
///
/// Details are shown in yellow, the suggestion in green, the error itself in
/// bold red.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: PatchError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a context with no details or suggestion.
    #[must_use]
    pub const fn new(error: PatchError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error, details and suggestion to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] suitable for CLI display.
///
/// The first [`PatchError`] found anywhere in the chain wins, so callers are
/// free to wrap typed errors with `anyhow::Context`. Bare I/O errors get
/// generic filesystem guidance; everything else is shown with its full
/// cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(patch_error) = error.chain().find_map(|e| e.downcast_ref::<PatchError>()) {
        return create_error_context(patch_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(PatchError::Other {
                    message: format!("Permission denied: {io_error}"),
                })
                .with_suggestion("Check ownership of the project's node_modules directory")
                .with_details("The patcher needs write access to node_modules");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(PatchError::Other {
                    message: format!("Not found: {io_error}"),
                })
                .with_suggestion("Run the patcher from your project root (the directory containing package.json)");
            }
            _ => {}
        }
    }

    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(PatchError::Other {
        message,
    })
}

fn create_error_context(error: PatchError) -> ErrorContext {
    match &error {
        PatchError::ManifestNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Run 'npm install' first so that svelte is present in node_modules, and start the patcher from the project root")
            .with_details("The installed svelte version is read from node_modules/svelte/package.json"),

        PatchError::ManifestReadError { .. } => ErrorContext::new(error)
            .with_suggestion("Check file permissions on node_modules/svelte/package.json"),

        PatchError::ManifestParseError { .. } => ErrorContext::new(error)
            .with_suggestion("Reinstall svelte ('npm install') to restore a valid package.json")
            .with_details("The manifest must be JSON (comments allowed) with a string 'version' field"),

        PatchError::NpmNotFound { command } => {
            let suggestion = format!(
                "Install Node.js and npm, or point the patcher at your npm with the SVELTE_ACCMOD_PATCH_NPM environment variable (tried '{command}')"
            );
            ErrorContext::new(error)
                .with_suggestion(suggestion)
                .with_details("All package operations are delegated to npm")
        }

        PatchError::NpmSpawnFailed { .. } => ErrorContext::new(error)
            .with_suggestion("Check that the npm executable is runnable from this shell"),

        PatchError::NpmCommandError { operation, stderr } => {
            let suggestion = if operation.contains(crate::constants::COMPANION_PACKAGE)
                && operation.starts_with("i ")
            {
                "Check that a svelte-accmod release exists for your svelte version ('npm view svelte-accmod versions')"
            } else {
                "Run the npm command manually in the project root to see the full output"
            };
            let details = stderr.trim();
            let ctx = ErrorContext::new(error.clone()).with_suggestion(suggestion);
            if details.is_empty() {
                ctx
            } else {
                ctx.with_details(details.to_string())
            }
        }

        PatchError::NpmTimeout { .. } => ErrorContext::new(error)
            .with_suggestion("Check your network connection, or raise the timeout in svelte-accmod-patch.toml")
            .with_details("npm did not finish in time; it may be waiting on the network or on an interactive prompt"),

        PatchError::CopyFailed { .. } | PatchError::ReplaceFailed { .. } => ErrorContext::new(error)
            .with_suggestion("Run 'svelte-accmod-patch -revert' to restore the original svelte, then try again")
            .with_details("svelte-accmod was left installed so the failed entries can be inspected"),

        PatchError::CopyTimeout { .. } => ErrorContext::new(error)
            .with_suggestion("Run 'svelte-accmod-patch -revert' to restore the original svelte")
            .with_details("Some files may already have been replaced"),

        PatchError::DeleteFailed { .. } => ErrorContext::new(error)
            .with_suggestion("Close editors or dev servers that may hold files in node_modules/svelte open, then retry")
            .with_details("No reinstall was attempted"),

        PatchError::ConfigError { .. } => ErrorContext::new(error)
            .with_suggestion("Fix svelte-accmod-patch.toml; valid keys are npm, install_timeout_secs, uninstall_timeout_secs, copy_timeout_secs"),

        PatchError::Other { .. } => ErrorContext::new(error),
    }
}
