//! Core types shared by every workflow step.
//!
//! - [`error`] - [`PatchError`], [`ErrorContext`] and [`user_friendly_error`]
//! - [`layout`] - [`ProjectLayout`], the on-disk locations derived from the project root

pub mod error;
pub mod layout;

pub use error::{ErrorContext, PatchError, user_friendly_error};
pub use layout::ProjectLayout;
