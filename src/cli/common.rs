//! State shared by the apply and revert workflows.

use crate::config::PatcherConfig;
use crate::core::ProjectLayout;
use crate::npm::Npm;
use crate::utils::progress::Reporter;

/// Everything a workflow needs, resolved once before it starts.
#[derive(Debug, Clone)]
pub struct PatchContext {
    pub layout: ProjectLayout,
    pub config: PatcherConfig,
    pub reporter: Reporter,
}

impl PatchContext {
    pub const fn new(layout: ProjectLayout, config: PatcherConfig, reporter: Reporter) -> Self {
        Self {
            layout,
            config,
            reporter,
        }
    }

    /// npm bound to this project's root and the configured timeouts.
    pub fn npm(&self) -> Npm {
        Npm::new(&self.config, &self.layout)
    }
}
