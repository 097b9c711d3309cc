//! Removal of the patched target during revert.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::constants::{REVERT_PREFIX, TARGET_PACKAGE};
use crate::core::PatchError;
use crate::utils::fs::remove_dir_all;
use crate::utils::progress::Reporter;

/// Delete `target_dir` recursively under a spinner.
///
/// A missing directory is not an error: a note is printed and `Ok(false)`
/// returned, so the reinstall can still run. Any other failure becomes
/// [`PatchError::DeleteFailed`].
pub async fn delete_target(target_dir: &Path, reporter: &Reporter) -> Result<bool> {
    let spinner = reporter.step(format!("{REVERT_PREFIX} deleting patched '{TARGET_PACKAGE}' ..."));

    let path = target_dir.to_path_buf();
    let result = tokio::task::spawn_blocking(move || remove_dir_all(&path)).await;
    let result = match result {
        Ok(result) => result,
        Err(e) => Err(anyhow::anyhow!("delete task panicked: {e}")),
    };

    match result {
        Ok(true) => {
            spinner.succeed(format!("patched '{TARGET_PACKAGE}' deleted!"));
            Ok(true)
        }
        Ok(false) => {
            tracing::debug!(target: "patch", "{} does not exist", target_dir.display());
            spinner.info(format!("nothing to delete: {} does not exist", target_dir.display()));
            Ok(false)
        }
        Err(e) => {
            spinner.fail(
                format!(
                    "{REVERT_PREFIX} oops! 😬 something went wrong while trying to delete patched '{TARGET_PACKAGE}'!"
                )
                .red()
                .to_string(),
            );
            Err(PatchError::DeleteFailed {
                path: target_dir.display().to_string(),
                reason: format!("{e:#}"),
            }
            .into())
        }
    }
}
