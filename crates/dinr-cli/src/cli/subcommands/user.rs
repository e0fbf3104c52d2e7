use clap::Subcommand;

/// User commands.
#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    /// Register a user.
    Create {
        /// Display name.
        name: String,
        /// Unique email address.
        email: String,
        /// Avatar URL or emoji.
        #[arg(long)]
        avatar: Option<String>,
    },
    /// Show one user.
    Get {
        /// User id.
        id: i64,
    },
}
