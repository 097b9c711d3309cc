//! Companion version resolution
//!
//! `svelte-accmod` is released in lockstep with `svelte`: for almost every
//! svelte release there is an accmod release with the same version string.
//! The exceptions are listed in [`VERSION_OVERRIDES`], an exact-match table
//! (no ranges, no comparators). Extending it means adding a row.
//!
//! ```rust
//! use svelte_accmod_patch::version::fixed_version;
//!
//! assert_eq!(fixed_version("3.44.2"), "3.44.2-1");
//! assert_eq!(fixed_version("4.0.0"), "4.0.0");
//! ```

pub mod detect;

use std::fmt;

pub use detect::{InstalledPackage, read_installed_version};

use crate::constants::COMPANION_PACKAGE;

/// Known svelte versions whose accmod counterpart was published under a
/// different version string, as `(svelte version, svelte-accmod version)`.
pub const VERSION_OVERRIDES: &[(&str, &str)] = &[("3.44.2", "3.44.2-1")];

/// Map a detected svelte version to the svelte-accmod version to install.
///
/// Returns the override from [`VERSION_OVERRIDES`] when `version` matches a
/// row exactly, and `version` itself otherwise.
#[must_use]
pub fn fixed_version(version: &str) -> &str {
    VERSION_OVERRIDES
        .iter()
        .find(|(from, _)| *from == version)
        .map_or(version, |&(_, to)| to)
}

/// An exact-version install specifier for the companion package.
///
/// Renders as `svelte-accmod@<version>` with no comparator prefix, so npm
/// installs precisely that release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanionSpec {
    version: String,
}

impl CompanionSpec {
    /// Build the specifier for an installed svelte version, applying overrides.
    pub fn for_target_version(target_version: &str) -> Self {
        let version = fixed_version(target_version);
        if version != target_version {
            tracing::debug!(
                target: "patch",
                "Using override {} -> {} for {}",
                target_version,
                version,
                COMPANION_PACKAGE
            );
        }
        Self {
            version: version.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        COMPANION_PACKAGE
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for CompanionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", COMPANION_PACKAGE, self.version)
    }
}
