//! The file-level half of patching: what gets copied, and how.
//!
//! [`FILE_MANIFEST`] lists every entry of an installed `svelte` package that
//! `svelte-accmod` ships a replacement for. [`replace::replace_files`] copies
//! those entries over the target and [`delete::delete_target`] removes the
//! patched target again during revert.

pub mod delete;
pub mod replace;

use std::fmt;

pub use delete::delete_target;
pub use replace::{ReplaceOutcome, replace_files};

/// Whether a manifest entry is a single file or a directory tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    /// Marker printed when an entry has been copied.
    pub const fn icon(self) -> &'static str {
        match self {
            Self::File => "➜ 📄",
            Self::Directory => "➜ 📁",
        }
    }
}

/// One top-level entry of the target package to replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifestEntry {
    pub name: &'static str,
    pub kind: EntryKind,
}

impl ManifestEntry {
    pub const fn file(name: &'static str) -> Self {
        Self {
            name,
            kind: EntryKind::File,
        }
    }

    pub const fn directory(name: &'static str) -> Self {
        Self {
            name,
            kind: EntryKind::Directory,
        }
    }
}

impl fmt::Display for ManifestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.icon(), self.name)
    }
}

/// Entries copied from `node_modules/svelte-accmod/` to `node_modules/svelte/`, in order.
pub const FILE_MANIFEST: &[ManifestEntry] = &[
    ManifestEntry::file("compiler.mjs"),
    ManifestEntry::file("compiler.js.map"),
    ManifestEntry::file("compiler.mjs.map"),
    ManifestEntry::file("compiler.js"),
    ManifestEntry::file("ssr.js"),
    ManifestEntry::file("ssr.mjs"),
    ManifestEntry::file("index.js"),
    ManifestEntry::file("index.mjs"),
    ManifestEntry::file("compiler.d.ts"),
    ManifestEntry::directory("animate"),
    ManifestEntry::directory("easing"),
    ManifestEntry::directory("internal"),
    ManifestEntry::directory("motion"),
    ManifestEntry::directory("store"),
    ManifestEntry::directory("transition"),
    ManifestEntry::directory("types"),
];
