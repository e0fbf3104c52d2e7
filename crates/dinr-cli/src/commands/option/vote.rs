use anyhow::Context;
use dinr_core::ids::OptionId;

use crate::cli::GlobalFlags;
use crate::commands::types::VoteResponse;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    option_id: OptionId,
    delta: i64,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.engine
        .vote(option_id, delta)
        .await
        .with_context(|| format!("vote on option {option_id} was not applied"))?;
    let option = ctx.engine.option(option_id).await?;
    output(
        &VoteResponse {
            option_id,
            delta,
            option,
        },
        flags.format,
    )
}
