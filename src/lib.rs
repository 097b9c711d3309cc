//! svelte-accmod-patch
//!
//! Replaces the files of an installed `svelte` package with those of its
//! accessibility-modified fork `svelte-accmod`, and reverts that swap.
//!
//! # Workflows
//!
//! **Apply** reads the installed svelte version, installs the matching
//! `svelte-accmod` release as a dev dependency, copies a fixed list of files
//! and directories from `node_modules/svelte-accmod` over
//! `node_modules/svelte`, and uninstalls the companion again.
//!
//! **Revert** deletes `node_modules/svelte` and runs `npm install` so npm
//! restores the original package.
//!
//! # Modules
//!
//! - [`cli`] - argument parsing and the two workflows
//! - [`config`] - optional `svelte-accmod-patch.toml` runtime settings
//! - [`constants`] - package names, paths and default timeouts
//! - [`core`] - error types and the project layout
//! - [`npm`] - the npm command builder and package operations
//! - [`patch`] - the file manifest, concurrent replacement and deletion
//! - [`utils`] - filesystem, platform and progress helpers
//! - [`version`] - installed version detection and companion version mapping

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod npm;
pub mod patch;
pub mod utils;
pub mod version;
