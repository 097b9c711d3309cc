//! Cross-platform utilities
//!
//! - [`fs`] - copy and delete helpers with overwrite/merge semantics
//! - [`platform`] - npm executable naming, terminal clearing, long paths
//! - [`progress`] - spinners and the per-step [`Reporter`]

pub mod fs;
pub mod platform;
pub mod progress;

pub use fs::{copy_dir, copy_file, ensure_dir, remove_dir_all};
pub use platform::{clear_terminal, get_npm_command, is_windows};
pub use progress::{OutputMode, ProgressBar, Reporter};
