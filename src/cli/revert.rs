//! The revert workflow: delete the patched `svelte` and reinstall the original.

use anyhow::Result;

use super::PatchContext;
use crate::constants::{NODE_MODULES_DIR, REVERT_PREFIX, TARGET_PACKAGE};
use crate::patch::delete_target;

pub async fn execute(ctx: &PatchContext) -> Result<()> {
    let reporter = &ctx.reporter;
    reporter.message(format!(
        "{REVERT_PREFIX} deleting patched '{TARGET_PACKAGE}' from '{NODE_MODULES_DIR}' and reinstalling original '{TARGET_PACKAGE}' ..."
    ));

    // A missing target still gets reinstalled
    delete_target(&ctx.layout.target_dir(), reporter).await?;
    ctx.npm().reinstall_all(reporter).await?;

    reporter.done(format!("DONE! 👍 You're now using original '{TARGET_PACKAGE}' again!"));
    Ok(())
}
