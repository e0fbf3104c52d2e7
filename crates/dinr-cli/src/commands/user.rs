use dinr_core::ids::UserId;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::UserCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `dinr user`.
pub async fn handle(
    action: &UserCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        UserCommands::Create {
            name,
            email,
            avatar,
        } => {
            let user = ctx.db.create_user(name, email, avatar.as_deref()).await?;
            output(&user, flags.format)
        }
        UserCommands::Get { id } => {
            let user = ctx.db.get_user(UserId(*id)).await?;
            output(&user, flags.format)
        }
    }
}
