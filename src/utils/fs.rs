//! File system operations used by the replace and revert steps.
//!
//! All copies overwrite existing destination files and merge into existing
//! destination directories, so repeating a copy leaves the same result as
//! running it once.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::utils::platform::{is_windows, windows_long_path};

/// Create `path` and its parents if missing.
///
/// Fails if `path` exists but is not a directory.
pub fn ensure_dir(path: &Path) -> Result<()> {
    let safe_path = windows_long_path(path);

    if !safe_path.exists() {
        fs::create_dir_all(&safe_path).with_context(|| {
            let platform_help = if is_windows() {
                "On Windows: Check that the path length is < 260 chars or that long path support is enabled"
            } else {
                "Check directory permissions and path validity"
            };

            format!("Failed to create directory: {}\n\n{}", path.display(), platform_help)
        })?;
    } else if !safe_path.is_dir() {
        bail!("Path exists but is not a directory: {}", path.display());
    }
    Ok(())
}

/// Copy a single file, creating the destination's parent directories.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    if !src.is_file() {
        bail!("Source file does not exist: {}", src.display());
    }
    if let Some(parent) = dst.parent() {
        ensure_dir(parent)?;
    }

    fs::copy(windows_long_path(src), windows_long_path(dst)).with_context(|| {
        format!("Failed to copy file from {} to {}", src.display(), dst.display())
    })?;
    Ok(())
}

/// Recursively copy `src` into `dst`, returning the number of files copied.
///
/// Existing files under `dst` are overwritten; files that exist only in `dst`
/// are left alone. Symlinks and special files are skipped.
pub fn copy_dir(src: &Path, dst: &Path) -> Result<usize> {
    if !src.is_dir() {
        bail!("Source directory does not exist: {}", src.display());
    }
    ensure_dir(dst)?;

    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1).follow_links(false) {
        let entry =
            entry.with_context(|| format!("Failed to read directory: {}", src.display()))?;
        let relative = entry.path().strip_prefix(src).with_context(|| {
            format!("{} is not inside {}", entry.path().display(), src.display())
        })?;
        let target = dst.join(relative);

        let file_type = entry.file_type();
        if file_type.is_dir() {
            ensure_dir(&target)?;
        } else if file_type.is_file() {
            fs::copy(windows_long_path(entry.path()), windows_long_path(&target)).with_context(
                || {
                    format!(
                        "Failed to copy file from {} to {}",
                        entry.path().display(),
                        target.display()
                    )
                },
            )?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Remove a directory tree. Returns `false` if there was nothing to remove.
pub fn remove_dir_all(path: &Path) -> Result<bool> {
    let safe_path = windows_long_path(path);
    if !safe_path.exists() {
        return Ok(false);
    }

    fs::remove_dir_all(&safe_path)
        .with_context(|| format!("Failed to remove directory: {}", path.display()))?;
    Ok(true)
}
