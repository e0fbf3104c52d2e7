use clap::Subcommand;

/// Dining option commands.
#[derive(Clone, Debug, Subcommand)]
pub enum OptionCommands {
    /// Propose an option, on the shared board or inside a session.
    Add {
        /// Display name.
        name: String,
        /// Menu or website link.
        link: String,
        /// Session to add the option to.
        #[arg(long)]
        session: Option<i64>,
        /// Picture of the place or the food.
        #[arg(long, requires = "session")]
        image_url: Option<String>,
        /// Cuisine tag, e.g. "Italian".
        #[arg(long, requires = "session")]
        cuisine: Option<String>,
        /// Price-range tag, e.g. "$$".
        #[arg(long, requires = "session")]
        price_range: Option<String>,
    },
    /// List options in ranking order.
    List {
        /// Only options of this session.
        #[arg(long)]
        session: Option<i64>,
    },
    /// Show one option.
    Get {
        /// Option id.
        id: i64,
    },
    /// Vote on an option. Negative deltas take votes away, never below zero.
    Vote {
        /// Option id.
        id: i64,
        /// Signed vote delta.
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        delta: i64,
    },
    /// Show the current winner.
    Winner {
        /// Winner of this session instead of the whole board.
        #[arg(long)]
        session: Option<i64>,
    },
    /// Options of a session that received at least one vote.
    Results {
        /// Session id.
        session: i64,
    },
}
