use crate::cli::GlobalFlags;
use crate::cli::subcommands::LockCommands;
use crate::commands::types::LockResponse;
use crate::context::AppContext;
use crate::output::output;

/// Handle `dinr lock`.
pub async fn handle(
    action: &LockCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let locked = match action {
        LockCommands::On => {
            ctx.engine.lock_voting(true).await?;
            true
        }
        LockCommands::Off => {
            ctx.engine.lock_voting(false).await?;
            false
        }
        LockCommands::Status => ctx.engine.is_voting_locked().await,
    };
    output(&LockResponse { locked }, flags.format)
}
