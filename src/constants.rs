//! Global constants used throughout the patcher.
//!
//! Package names, on-disk locations relative to the project root, and the
//! default timeouts for external operations live here so that the workflows
//! and their tests agree on a single set of values.

use std::time::Duration;

/// Name of the installed library whose files are replaced.
pub const TARGET_PACKAGE: &str = "svelte";

/// Name of the fork that provides the replacement files.
pub const COMPANION_PACKAGE: &str = "svelte-accmod";

/// Directory npm installs packages into, relative to the project root.
pub const NODE_MODULES_DIR: &str = "node_modules";

/// Per-package manifest that carries the installed version.
pub const PACKAGE_MANIFEST_FILE: &str = "package.json";

/// Optional runtime configuration file at the project root.
pub const CONFIG_FILE_NAME: &str = "svelte-accmod-patch.toml";

/// Environment variable that overrides the npm executable.
pub const NPM_ENV_VAR: &str = "SVELTE_ACCMOD_PATCH_NPM";

/// Output prefix for apply workflow messages.
pub const APPLY_PREFIX: &str = "svelte-accmod-patch (apply) >";

/// Output prefix for revert workflow messages.
pub const REVERT_PREFIX: &str = "svelte-accmod-patch (revert) >";

/// Timeout for `npm i <companion>` (10 minutes).
///
/// A cold npm cache on a slow network can take several minutes to resolve
/// and extract a package.
pub const NPM_INSTALL_TIMEOUT: Duration = Duration::from_secs(600);

/// Timeout for `npm uninstall <companion>` (5 minutes).
pub const NPM_UNINSTALL_TIMEOUT: Duration = Duration::from_secs(300);

/// Timeout of an npm command built without an explicit one (5 minutes).
pub const NPM_DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Timeout for joining every copy task of the replacement step (2 minutes).
pub const COPY_TIMEOUT: Duration = Duration::from_secs(120);
