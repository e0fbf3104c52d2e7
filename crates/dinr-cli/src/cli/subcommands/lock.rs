use clap::Subcommand;

/// Global voting lock.
#[derive(Clone, Debug, Subcommand)]
pub enum LockCommands {
    /// Lock voting everywhere.
    On,
    /// Unlock voting. Session locks stay as they are.
    Off,
    /// Show whether voting is locked globally.
    Status,
}
