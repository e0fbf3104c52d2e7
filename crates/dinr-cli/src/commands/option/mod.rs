mod add;
mod vote;

use dinr_core::ids::{OptionId, SessionId};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::OptionCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `dinr option`.
pub async fn handle(
    action: &OptionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        OptionCommands::Add {
            name,
            link,
            session,
            image_url,
            cuisine,
            price_range,
        } => {
            let details = add::Details {
                image_url: image_url.clone(),
                cuisine: cuisine.clone(),
                price_range: price_range.clone(),
            };
            add::run(name, link, session.map(SessionId), details, ctx, flags).await
        }
        OptionCommands::List { session } => {
            let options = match session {
                Some(id) => ctx.engine.session_options(SessionId(*id)).await?,
                None => ctx.engine.all_options().await?,
            };
            output(&options, flags.format)
        }
        OptionCommands::Get { id } => {
            let option = ctx.engine.option(OptionId(*id)).await?;
            output(&option, flags.format)
        }
        OptionCommands::Vote { id, delta } => vote::run(OptionId(*id), *delta, ctx, flags).await,
        OptionCommands::Winner { session } => {
            let winner = match session {
                Some(id) => ctx.engine.session_winner(SessionId(*id)).await?,
                None => ctx.engine.winner().await?,
            };
            output(&winner, flags.format)
        }
        OptionCommands::Results { session } => {
            let results = ctx.engine.session_results(SessionId(*session)).await?;
            output(&results, flags.format)
        }
    }
}
