//! Platform-specific helpers
//!
//! Hides the few places where Windows and Unix differ for this tool: the name
//! of the npm executable, long `node_modules` paths, and terminal handling.

use console::Term;
use std::path::{Path, PathBuf};

/// Whether the current build targets Windows.
#[must_use]
pub const fn is_windows() -> bool {
    cfg!(windows)
}

/// Default npm executable name for this platform.
///
/// On Windows npm ships as a batch shim, so the `.cmd` name must be used when
/// spawning it without a shell.
#[must_use]
pub const fn get_npm_command() -> &'static str {
    if is_windows() {
        "npm.cmd"
    } else {
        "npm"
    }
}

/// Resolve `cmd` to an absolute executable path (PATH lookup or explicit path).
#[must_use]
pub fn resolve_command(cmd: &str) -> Option<PathBuf> {
    which::which(cmd).ok()
}

/// Clear the terminal before a workflow starts.
///
/// Best effort: does nothing when stdout is not a terminal, and any error
/// from the terminal is ignored.
pub fn clear_terminal() {
    let term = Term::stdout();
    if term.is_term() {
        if let Err(e) = term.clear_screen() {
            tracing::debug!("Could not clear terminal: {e}");
        }
    }
}

/// Convert a path to Windows extended-length form when it exceeds `MAX_PATH`.
///
/// Deeply nested `node_modules` trees regularly exceed 260 characters on
/// Windows.
#[cfg(windows)]
#[must_use]
pub fn windows_long_path(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    if path_str.len() > 260 && !path_str.starts_with(r"\\?\") {
        let absolute_path = if path.is_relative() {
            std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join(path)
        } else {
            path.to_path_buf()
        };

        let absolute_str = absolute_path.to_string_lossy();
        if absolute_str.len() > 260 {
            if let Some(stripped) = absolute_str.strip_prefix(r"\\") {
                PathBuf::from(format!(r"\\?\UNC\{stripped}"))
            } else {
                PathBuf::from(format!(r"\\?\{absolute_str}"))
            }
        } else {
            absolute_path
        }
    } else {
        path.to_path_buf()
    }
}

/// No-op on non-Windows platforms.
#[cfg(not(windows))]
#[must_use]
pub fn windows_long_path(path: &Path) -> PathBuf {
    path.to_path_buf()
}
