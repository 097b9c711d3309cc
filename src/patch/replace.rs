//! Concurrent replacement of the manifest entries.
//!
//! One blocking copy task is started per entry without waiting for the
//! others, and all of them are joined before the outcome is decided. A
//! failing entry never cancels the rest.

use anyhow::{Result, anyhow};
use colored::Colorize;
use futures::future::join_all;
use std::path::Path;
use std::time::Duration;

use super::{EntryKind, ManifestEntry};
use crate::core::PatchError;
use crate::utils::fs::{copy_dir, copy_file};
use crate::utils::progress::ProgressBar;

/// Result of one replacement run, in manifest order.
#[derive(Debug, Default)]
pub struct ReplaceOutcome {
    /// Entries that were copied
    pub copied: Vec<&'static str>,
    /// Entries that failed, as [`PatchError::CopyFailed`]
    pub failed: Vec<PatchError>,
}

impl ReplaceOutcome {
    pub fn total(&self) -> usize {
        self.copied.len() + self.failed.len()
    }

    /// Whether every entry was copied.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Turn an incomplete outcome into [`PatchError::ReplaceFailed`].
    pub fn ensure_complete(self) -> Result<Self, PatchError> {
        if self.is_complete() {
            return Ok(self);
        }

        let entries = self
            .failed
            .iter()
            .map(|e| match e {
                PatchError::CopyFailed { entry, .. } => entry.clone(),
                other => other.to_string(),
            })
            .collect();
        Err(PatchError::ReplaceFailed {
            succeeded: self.copied.len(),
            total: self.total(),
            entries,
        })
    }
}

/// Copy every entry from `src_root` to `dst_root`.
///
/// Each finished entry is printed above `spinner` as it completes; failures
/// are printed to stderr with their cause. Returns the outcome of every
/// entry, or [`PatchError::CopyTimeout`] when the tasks are not all done
/// within `timeout`.
pub async fn replace_files(
    src_root: &Path,
    dst_root: &Path,
    entries: &[ManifestEntry],
    spinner: &ProgressBar,
    timeout: Option<Duration>,
) -> Result<ReplaceOutcome> {
    tracing::debug!(
        target: "patch",
        "Replacing {} entries from {} into {}",
        entries.len(),
        src_root.display(),
        dst_root.display()
    );

    let tasks = entries.iter().map(|entry| {
        let src = src_root.join(entry.name);
        let dst = dst_root.join(entry.name);
        let kind = entry.kind;

        async move {
            let result = tokio::task::spawn_blocking(move || copy_entry(kind, &src, &dst))
                .await
                .unwrap_or_else(|e| Err(anyhow!("copy task panicked: {e}")));

            match &result {
                Ok(()) => spinner.println(entry.to_string()),
                Err(e) => spinner.eprintln(format!("{} {}: {:#}", "✖".red(), entry.name, e)),
            }
            (entry, result)
        }
    });

    let results = join_within(join_all(tasks), timeout).await?;

    let mut outcome = ReplaceOutcome::default();
    for (entry, result) in results {
        match result {
            Ok(()) => outcome.copied.push(entry.name),
            Err(e) => {
                tracing::debug!(target: "patch", "Failed to copy {}: {:#}", entry.name, e);
                outcome.failed.push(PatchError::CopyFailed {
                    entry: entry.name.to_string(),
                    reason: format!("{e:#}"),
                });
            }
        }
    }

    Ok(outcome)
}

/// Await `fan_in`, giving up with [`PatchError::CopyTimeout`] after `timeout`.
async fn join_within<F: Future>(fan_in: F, timeout: Option<Duration>) -> Result<F::Output, PatchError> {
    match timeout {
        Some(duration) => tokio::time::timeout(duration, fan_in).await.map_err(|_| {
            tracing::warn!(target: "patch", "Copy tasks still running after {:?}", duration);
            PatchError::CopyTimeout {
                seconds: duration.as_secs(),
            }
        }),
        None => Ok(fan_in.await),
    }
}

fn copy_entry(kind: EntryKind, src: &Path, dst: &Path) -> Result<()> {
    match kind {
        EntryKind::File => copy_file(src, dst),
        EntryKind::Directory => copy_dir(src, dst).map(|count| {
            tracing::trace!(target: "patch", "Copied {} files into {}", count, dst.display());
        }),
    }
}
