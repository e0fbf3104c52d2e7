use chrono::{DateTime, Utc};
use clap::Subcommand;

/// Voting session commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SessionCommands {
    /// Open a voting session in a group.
    Create {
        /// Owning group id.
        #[arg(long)]
        group: i64,
        /// Session title.
        title: String,
        /// Optional description.
        #[arg(long)]
        description: Option<String>,
        /// Informational deadline (RFC 3339). Does not lock the session.
        #[arg(long)]
        deadline: Option<DateTime<Utc>>,
    },
    /// Show one session.
    Get {
        /// Session id.
        id: i64,
    },
    /// List a group's sessions, newest first.
    List {
        /// Group id.
        #[arg(long)]
        group: i64,
        /// Only unlocked sessions.
        #[arg(long)]
        active: bool,
    },
    /// Lock a session: no more options or votes.
    Lock {
        /// Session id.
        id: i64,
    },
    /// Unlock a session.
    Unlock {
        /// Session id.
        id: i64,
    },
}
