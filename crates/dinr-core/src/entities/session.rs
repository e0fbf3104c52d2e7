use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids::{GroupId, SessionId};

/// A scoped voting round belonging to a group, with its own lock flag.
///
/// The deadline is informational; nothing locks the session when it passes.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct VotingSession {
    pub id: SessionId,
    pub group_id: GroupId,
    pub title: String,
    pub description: Option<String>,
    pub locked: bool,
    pub created_at: DateTime<Utc>,
    pub deadline: Option<DateTime<Utc>>,
}
