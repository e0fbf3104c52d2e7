//! Lock scopes reported by the voting engine.
//!
//! Uses `snake_case` serialization like every other dinr enum.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::SessionId;

/// Which lock blocked a mutation.
///
/// ```text
/// global:   unlocked ⇄ locked
/// session:  unlocked ⇄ locked   (one flag per voting session)
/// ```
///
/// An option is mutable only when neither the global flag nor its owning
/// session's flag is set. When both are set the global scope is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LockScope {
    Global,
    Session(SessionId),
}

impl LockScope {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Session(_) => "session",
        }
    }
}

impl fmt::Display for LockScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("voting is locked globally"),
            Self::Session(id) => write!(f, "voting session {id} is locked"),
        }
    }
}
