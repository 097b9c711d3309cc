//! The apply workflow: swap the installed `svelte` files for `svelte-accmod` ones.
//!
//! Steps, each fatal on failure:
//! 1. read the installed svelte version from `node_modules/svelte/package.json`
//! 2. `npm i svelte-accmod@<version> --save-dev` (with the override table applied)
//! 3. copy every [`FILE_MANIFEST`] entry over `node_modules/svelte`
//! 4. `npm uninstall svelte-accmod --save-dev`, only if step 3 copied everything
//!
//! When an entry fails to copy the companion is left installed and the run
//! fails with [`PatchError::ReplaceFailed`](crate::core::PatchError::ReplaceFailed).

use anyhow::Result;
use colored::Colorize;

use super::PatchContext;
use crate::constants::{APPLY_PREFIX, COMPANION_PACKAGE, TARGET_PACKAGE};
use crate::patch::{FILE_MANIFEST, replace_files};
use crate::version::{CompanionSpec, read_installed_version};

pub async fn execute(ctx: &PatchContext) -> Result<()> {
    let reporter = &ctx.reporter;
    reporter.message(format!(
        "{APPLY_PREFIX} replacing original '{TARGET_PACKAGE}' files with corresponding '{COMPANION_PACKAGE}' files ..."
    ));

    let package = read_installed_version(&ctx.layout.target_manifest()).await?;
    reporter.message(format!("ℹ️ detected {TARGET_PACKAGE} version: {} ...", package.version));

    let spec = CompanionSpec::for_target_version(&package.version);
    let npm = ctx.npm();
    npm.install_companion(&spec, reporter).await?;

    replace(ctx).await?;

    npm.uninstall_companion(reporter).await?;
    reporter.done(format!("🚀 DONE! You're now using '{COMPANION_PACKAGE}'!"));
    Ok(())
}

async fn replace(ctx: &PatchContext) -> Result<()> {
    let spinner = ctx.reporter.step("replacing files ...");

    let outcome = match replace_files(
        &ctx.layout.companion_dir(),
        &ctx.layout.target_dir(),
        FILE_MANIFEST,
        &spinner,
        ctx.config.copy_timeout(),
    )
    .await
    {
        Ok(outcome) => outcome,
        Err(e) => {
            spinner.fail(format!("{APPLY_PREFIX} oops! 😬 replacing files did not finish!").red().to_string());
            return Err(e);
        }
    };

    let (copied, total) = (outcome.copied.len(), outcome.total());
    match outcome.ensure_complete() {
        Ok(_) => {
            spinner.succeed(format!(
                "finished replacing original '{TARGET_PACKAGE}' files with corresponding '{COMPANION_PACKAGE}' files!"
            ));
            Ok(())
        }
        Err(e) => {
            spinner.fail(
                format!("{APPLY_PREFIX} oops! 😬 only {copied} of {total} entries were replaced!")
                    .red()
                    .to_string(),
            );
            Err(e.into())
        }
    }
}
