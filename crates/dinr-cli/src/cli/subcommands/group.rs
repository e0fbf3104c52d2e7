use clap::Subcommand;

/// Dining group commands.
#[derive(Clone, Debug, Subcommand)]
pub enum GroupCommands {
    /// Create a group.
    Create {
        /// Group name.
        name: String,
        /// Optional description.
        #[arg(long)]
        description: Option<String>,
        /// Icon shown next to the name.
        #[arg(long)]
        emoji: Option<String>,
        /// Theme color, e.g. "#667eea".
        #[arg(long)]
        color: Option<String>,
        /// User to add as the first member.
        #[arg(long)]
        creator: Option<i64>,
    },
    /// Show one group.
    Get {
        /// Group id.
        id: i64,
    },
    /// List groups, newest first.
    List {
        /// Only groups this user belongs to.
        #[arg(long)]
        user: Option<i64>,
    },
    /// Add a user to a group.
    Join {
        /// Group id.
        group: i64,
        /// User id.
        user: i64,
    },
    /// Delete a group with its sessions and their options.
    Delete {
        /// Group id.
        id: i64,
    },
    /// List a group's members.
    Members {
        /// Group id.
        id: i64,
    },
}
