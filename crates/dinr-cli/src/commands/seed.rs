use crate::cli::GlobalFlags;
use crate::commands::types::SeedResponse;
use crate::context::AppContext;
use crate::output::output;

/// Handle `dinr seed`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let seeded = ctx.db.seed_sample_data().await?;
    if !seeded {
        tracing::warn!("database already has users; sample data not inserted");
    }
    output(&SeedResponse { seeded }, flags.format)
}
