mod group;
mod lock;
mod option;
mod session;
mod user;

pub use group::GroupCommands;
pub use lock::LockCommands;
pub use option::OptionCommands;
pub use session::SessionCommands;
pub use user::UserCommands;
