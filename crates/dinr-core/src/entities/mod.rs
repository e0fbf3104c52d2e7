//! Entity structs for all dinr domain objects.
//!
//! Each entity maps to a table in the libSQL database (see
//! `dinr-db/migrations/001_initial.sql`). All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema` for JSON roundtrip and schema validation.
//! Relationships are carried as ids (`session_id`, `group_id`), never as
//! embedded parents.

mod group;
mod option;
mod session;
mod status;
mod user;

pub use group::{DEFAULT_COLOR_THEME, DEFAULT_EMOJI_ICON, Group};
pub use option::{NewOption, OptionDetails, VoteOption};
pub use session::VotingSession;
pub use status::VotingStatus;
pub use user::User;
