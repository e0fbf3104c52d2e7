use clap::Subcommand;

use crate::cli::subcommands::{
    GroupCommands, LockCommands, OptionCommands, SessionCommands, UserCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Dining options and votes.
    Option {
        #[command(subcommand)]
        action: OptionCommands,
    },
    /// Voting sessions.
    Session {
        #[command(subcommand)]
        action: SessionCommands,
    },
    /// Global voting lock.
    Lock {
        #[command(subcommand)]
        action: LockCommands,
    },
    /// Global lock state and option count.
    Status,
    /// Dining groups.
    Group {
        #[command(subcommand)]
        action: GroupCommands,
    },
    /// Users.
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Insert the demo dataset into an empty database.
    Seed,
}
