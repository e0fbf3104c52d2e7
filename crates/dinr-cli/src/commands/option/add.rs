use dinr_core::entities::OptionDetails;
use dinr_core::ids::SessionId;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Metadata flags as given on the command line. Only meaningful with a session.
pub struct Details {
    pub image_url: Option<String>,
    pub cuisine: Option<String>,
    pub price_range: Option<String>,
}

pub async fn run(
    name: &str,
    link: &str,
    session: Option<SessionId>,
    details: Details,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let option = match session {
        Some(session_id) => {
            let details = OptionDetails {
                image_url: details.image_url,
                cuisine: details.cuisine,
                price_range: details.price_range,
            };
            ctx.engine
                .add_option_to_session(name, link, details, session_id)
                .await?
        }
        None => ctx.engine.add_option(name, link, None).await?,
    };
    output(&option, flags.format)
}
