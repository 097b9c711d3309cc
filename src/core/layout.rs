//! On-disk locations the patcher works with.

use std::path::{Path, PathBuf};

use crate::constants::{COMPANION_PACKAGE, NODE_MODULES_DIR, PACKAGE_MANIFEST_FILE, TARGET_PACKAGE};

/// Paths of one project, all derived from its root directory.
///
/// The root is the directory the tool was started from (or `--project-dir`);
/// npm is run there and every other path hangs off it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    /// Create a layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
        }
    }

    /// Project root; the working directory for npm.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `node_modules/svelte`, the copy destination and revert deletion target.
    pub fn target_dir(&self) -> PathBuf {
        self.root.join(NODE_MODULES_DIR).join(TARGET_PACKAGE)
    }

    /// `node_modules/svelte-accmod`, the copy source.
    pub fn companion_dir(&self) -> PathBuf {
        self.root.join(NODE_MODULES_DIR).join(COMPANION_PACKAGE)
    }

    /// `node_modules/svelte/package.json`, read for the installed version.
    pub fn target_manifest(&self) -> PathBuf {
        self.target_dir().join(PACKAGE_MANIFEST_FILE)
    }
}
