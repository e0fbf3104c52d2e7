use dinr_core::ids::{GroupId, SessionId};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SessionCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `dinr session`.
pub async fn handle(
    action: &SessionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        SessionCommands::Create {
            group,
            title,
            description,
            deadline,
        } => {
            let session = ctx
                .db
                .create_session(title, description.as_deref(), GroupId(*group), *deadline)
                .await?;
            output(&session, flags.format)
        }
        SessionCommands::Get { id } => {
            let session = ctx.db.get_session(SessionId(*id)).await?;
            output(&session, flags.format)
        }
        SessionCommands::List { group, active } => {
            let group = GroupId(*group);
            let sessions = if *active {
                ctx.db.list_active_sessions(group).await?
            } else {
                ctx.db.list_group_sessions(group).await?
            };
            output(&sessions, flags.format)
        }
        SessionCommands::Lock { id } => {
            let session = ctx.engine.lock_session(SessionId(*id), true).await?;
            output(&session, flags.format)
        }
        SessionCommands::Unlock { id } => {
            let session = ctx.engine.lock_session(SessionId(*id), false).await?;
            output(&session, flags.format)
        }
    }
}
