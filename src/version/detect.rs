//! Detection of the installed target library's version.

use anyhow::Result;
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

use crate::core::PatchError;

/// The fields of an installed package's `package.json` the patcher reads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InstalledPackage {
    #[serde(default)]
    pub name: Option<String>,
    pub version: String,
}

impl InstalledPackage {
    /// Parse manifest text. Comments and other JSON5 relaxations are accepted.
    pub fn parse(content: &str, file: &Path) -> Result<Self, PatchError> {
        json5::from_str(content).map_err(|e| PatchError::ManifestParseError {
            file: file.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Whether the version string is valid semver.
    pub fn is_semver(&self) -> bool {
        semver::Version::parse(&self.version).is_ok()
    }
}

/// Read `package.json` at `manifest_path` and return its contents.
///
/// A missing file, an unreadable file and unparseable content map to
/// [`PatchError::ManifestNotFound`], [`PatchError::ManifestReadError`] and
/// [`PatchError::ManifestParseError`] respectively.
pub async fn read_installed_version(manifest_path: &Path) -> Result<InstalledPackage> {
    let content = match fs::read_to_string(manifest_path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(PatchError::ManifestNotFound {
                path: manifest_path.display().to_string(),
            }
            .into());
        }
        Err(e) => {
            return Err(PatchError::ManifestReadError {
                path: manifest_path.display().to_string(),
                reason: e.to_string(),
            }
            .into());
        }
    };

    let package = InstalledPackage::parse(&content, manifest_path)?;
    if !package.is_semver() {
        tracing::warn!(
            target: "patch",
            "Installed version '{}' in {} is not valid semver; using it as-is",
            package.version,
            manifest_path.display()
        );
    }

    tracing::debug!(target: "patch", "Read version {} from {}", package.version, manifest_path.display());
    Ok(package)
}
