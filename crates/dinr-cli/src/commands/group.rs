use dinr_core::ids::{GroupId, UserId};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::GroupCommands;
use crate::commands::types::GroupDeleteResponse;
use crate::context::AppContext;
use crate::output::output;

/// Handle `dinr group`.
pub async fn handle(
    action: &GroupCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        GroupCommands::Create {
            name,
            description,
            emoji,
            color,
            creator,
        } => {
            let group = ctx
                .db
                .create_group(
                    name,
                    description.as_deref(),
                    emoji.as_deref(),
                    color.as_deref(),
                    creator.map(UserId),
                )
                .await?;
            output(&group, flags.format)
        }
        GroupCommands::Get { id } => {
            let group = ctx.db.get_group(GroupId(*id)).await?;
            output(&group, flags.format)
        }
        GroupCommands::List { user } => {
            let groups = match user {
                Some(id) => ctx.db.list_user_groups(UserId(*id)).await?,
                None => ctx.db.list_groups().await?,
            };
            output(&groups, flags.format)
        }
        GroupCommands::Join { group, user } => {
            let group_id = GroupId(*group);
            ctx.db.join_group(group_id, UserId(*user)).await?;
            let members = ctx.db.group_members(group_id).await?;
            output(&members, flags.format)
        }
        GroupCommands::Delete { id } => {
            let group_id = GroupId(*id);
            let deleted = ctx.db.delete_group(group_id).await?;
            output(
                &GroupDeleteResponse { group_id, deleted },
                flags.format,
            )
        }
        GroupCommands::Members { id } => {
            let members = ctx.db.group_members(GroupId(*id)).await?;
            output(&members, flags.format)
        }
    }
}
