//! Shared helpers for the integration tests.
//!
//! [`TestProject`] builds a throwaway project directory plus a fake `npm`
//! shell script. The script appends every invocation to a log and simulates
//! the three npm operations the patcher uses by copying fixture packages:
//!
//! - `npm i svelte-accmod@<v> --save-dev` copies `fixtures/svelte-accmod`
//!   into `node_modules/svelte-accmod`
//! - `npm uninstall svelte-accmod --save-dev` removes it again
//! - `npm install` copies `fixtures/svelte` into `node_modules/svelte`
//!
//! Creating a `fail-<operation>` marker (see [`TestProject::fail_npm`]) makes
//! the corresponding operation exit non-zero.

#![allow(dead_code)]

use anyhow::{Context, Result};
use assert_cmd::Command;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// Files of the file manifest, in order.
pub const MANIFEST_FILES: &[&str] = &[
    "compiler.mjs",
    "compiler.js.map",
    "compiler.mjs.map",
    "compiler.js",
    "ssr.js",
    "ssr.mjs",
    "index.js",
    "index.mjs",
    "compiler.d.ts",
];

/// Directories of the file manifest, in order.
pub const MANIFEST_DIRS: &[&str] =
    &["animate", "easing", "internal", "motion", "store", "transition", "types"];

/// Test project with fixture packages and a fake npm
pub struct TestProject {
    _temp_dir: TempDir, // Keep alive for RAII cleanup
    root_dir: PathBuf,
    project_dir: PathBuf,
    fixtures_dir: PathBuf,
    npm_script: PathBuf,
    npm_log: PathBuf,
}

impl TestProject {
    /// Create a project whose fixtures describe svelte `version`.
    ///
    /// Nothing is installed into `node_modules` yet; see
    /// [`install_original_svelte`](Self::install_original_svelte).
    pub fn new(version: &str) -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root_dir = temp_dir.path().to_path_buf();
        let project_dir = root_dir.join("project");
        let fixtures_dir = root_dir.join("fixtures");
        let npm_script = root_dir.join("fake-npm.sh");
        let npm_log = root_dir.join("npm-calls.log");

        fs::create_dir_all(&project_dir)?;
        fs::write(
            project_dir.join("package.json"),
            serde_json::to_string_pretty(&serde_json::json!({
                "name": "test-app",
                "private": true,
                "devDependencies": { "svelte": version },
            }))?,
        )?;

        write_package(&fixtures_dir.join("svelte"), "svelte", version, "original")?;
        write_package(&fixtures_dir.join("svelte-accmod"), "svelte-accmod", version, "accmod")?;

        let project = Self {
            _temp_dir: temp_dir,
            root_dir,
            project_dir,
            fixtures_dir,
            npm_script,
            npm_log,
        };
        project.write_fake_npm()?;
        Ok(project)
    }

    /// Create a project with the original svelte already installed.
    pub fn with_svelte(version: &str) -> Result<Self> {
        let project = Self::new(version)?;
        project.install_original_svelte()?;
        Ok(project)
    }

    pub fn root_path(&self) -> &Path {
        &self.root_dir
    }

    pub fn project_path(&self) -> &Path {
        &self.project_dir
    }

    pub fn target_dir(&self) -> PathBuf {
        self.project_dir.join("node_modules").join("svelte")
    }

    pub fn companion_dir(&self) -> PathBuf {
        self.project_dir.join("node_modules").join("svelte-accmod")
    }

    /// Fixture package that `npm i svelte-accmod@...` installs.
    pub fn companion_fixture(&self) -> PathBuf {
        self.fixtures_dir.join("svelte-accmod")
    }

    /// Fixture package that `npm install` installs.
    pub fn original_fixture(&self) -> PathBuf {
        self.fixtures_dir.join("svelte")
    }

    /// Copy the original svelte fixture into `node_modules/svelte`.
    pub fn install_original_svelte(&self) -> Result<()> {
        copy_tree(&self.original_fixture(), &self.target_dir())
    }

    /// Overwrite the installed `node_modules/svelte/package.json`.
    pub fn write_target_manifest(&self, content: &str) -> Result<()> {
        fs::create_dir_all(self.target_dir())?;
        fs::write(self.target_dir().join("package.json"), content)?;
        Ok(())
    }

    /// Remove one entry from the companion fixture so copying it fails.
    pub fn remove_companion_entry(&self, name: &str) -> Result<()> {
        let path = self.companion_fixture().join(name);
        if path.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    /// Make the fake npm fail for `operation` (`i`, `uninstall` or `install`).
    pub fn fail_npm(&self, operation: &str) -> Result<()> {
        fs::write(self.root_dir.join(format!("fail-{operation}")), "")?;
        Ok(())
    }

    /// Every npm invocation so far, one argument line per call.
    pub fn npm_calls(&self) -> Vec<String> {
        fs::read_to_string(&self.npm_log)
            .map(|log| log.lines().map(ToString::to_string).collect())
            .unwrap_or_default()
    }

    /// The patcher binary, run in the project directory against the fake npm.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("svelte-accmod-patch").unwrap();
        cmd.current_dir(&self.project_dir)
            .env("SVELTE_ACCMOD_PATCH_NPM", &self.npm_script)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }

    fn write_fake_npm(&self) -> Result<()> {
        let root = self.root_dir.display();
        let script = format!(
            r#"#!/bin/sh
echo "$*" >> "{root}/npm-calls.log"
case "$1" in
  i)
    if [ -f "{root}/fail-i" ]; then
      echo "npm ERR! code ETARGET" >&2
      echo "npm ERR! notarget No matching version found for $2." >&2
      exit 1
    fi
    mkdir -p node_modules
    rm -rf node_modules/svelte-accmod
    cp -R "{root}/fixtures/svelte-accmod" node_modules/svelte-accmod
    ;;
  uninstall)
    if [ -f "{root}/fail-uninstall" ]; then
      echo "npm ERR! uninstall failed" >&2
      exit 1
    fi
    rm -rf "node_modules/$2"
    ;;
  install)
    if [ -f "{root}/fail-install" ]; then
      echo "npm ERR! install failed" >&2
      exit 1
    fi
    mkdir -p node_modules
    rm -rf node_modules/svelte
    cp -R "{root}/fixtures/svelte" node_modules/svelte
    ;;
esac
exit 0
"#
        );
        fs::write(&self.npm_script, script).context("Failed to write fake npm")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.npm_script, fs::Permissions::from_mode(0o755))?;
        }
        Ok(())
    }
}

/// Write a fake svelte-like package whose manifest entries contain `flavor`.
fn write_package(dir: &Path, name: &str, version: &str, flavor: &str) -> Result<()> {
    fs::create_dir_all(dir)?;
    fs::write(
        dir.join("package.json"),
        format!(
            "{{\n  // published by the test fixture\n  \"name\": \"{name}\",\n  \"version\": \"{version}\",\n  \"main\": \"index\"\n}}\n"
        ),
    )?;
    fs::write(dir.join("README.md"), format!("# {name}\n"))?;

    for file in MANIFEST_FILES {
        fs::write(dir.join(file), format!("// {flavor} {file}\n"))?;
    }
    for sub in MANIFEST_DIRS {
        let sub_dir = dir.join(sub);
        fs::create_dir_all(sub_dir.join("nested"))?;
        fs::write(sub_dir.join("index.js"), format!("// {flavor} {sub}/index.js\n"))?;
        fs::write(sub_dir.join("index.mjs"), format!("// {flavor} {sub}/index.mjs\n"))?;
        fs::write(sub_dir.join("nested").join("deep.js"), format!("// {flavor} {sub}/deep\n"))?;
    }
    Ok(())
}

fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry?;
        let target = dst.join(entry.path().strip_prefix(src)?);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Relative path → contents of every file under `dir`.
pub fn snapshot(dir: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let relative = e.path().strip_prefix(dir).unwrap().to_path_buf();
            (relative, fs::read(e.path()).unwrap())
        })
        .collect()
}

/// Assert `path` exists with exactly the same bytes as `expected`.
pub fn assert_same_file(path: &Path, expected: &Path) {
    let actual = fs::read(path).unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
    let expected_bytes = fs::read(expected)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", expected.display()));
    assert_eq!(actual, expected_bytes, "{} differs from {}", path.display(), expected.display());
}
