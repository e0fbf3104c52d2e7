use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `dinr status`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let status = ctx.engine.status().await?;
    output(&status, flags.format)
}
