//! svelte-accmod-patch binary entry point.

use anyhow::Result;
use clap::Parser;
use svelte_accmod_patch::cli::{self, normalize_args};
use svelte_accmod_patch::core::user_friendly_error;
use svelte_accmod_patch::utils::platform::clear_terminal;
use svelte_accmod_patch::utils::progress::OutputMode;

#[tokio::main]
async fn main() -> Result<()> {
    // Usage errors exit with status 2 here
    let cli = cli::Cli::parse_from(normalize_args(std::env::args_os()));
    let config = cli.build_config();
    config.init_logging();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    if config.output_mode != OutputMode::Silent {
        clear_terminal();
    }

    match cli.execute_with_config(config).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::debug!("Fatal error: {e:?}");
            user_friendly_error(e).display();
            std::process::exit(1);
        }
    }
}
