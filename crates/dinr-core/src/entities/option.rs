use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids::{OptionId, SessionId};

/// Optional descriptive attributes of a dining option.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct OptionDetails {
    pub image_url: Option<String>,
    /// Free-form cuisine tag, e.g. `"Italian"`.
    pub cuisine: Option<String>,
    /// Free-form price tag, e.g. `"$$"`.
    pub price_range: Option<String>,
}

/// A candidate dining choice that accrues votes.
///
/// `votes` never drops below zero. `session_id` is `None` for options on the
/// unscoped single board.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct VoteOption {
    pub id: OptionId,
    pub name: String,
    pub link: String,
    #[serde(flatten)]
    pub details: OptionDetails,
    pub votes: i64,
    pub created_at: DateTime<Utc>,
    pub session_id: Option<SessionId>,
}

impl VoteOption {
    /// Whether the option belongs to a voting session.
    #[must_use]
    pub const fn is_scoped(&self) -> bool {
        self.session_id.is_some()
    }
}

/// An option that has passed validation but has not been assigned an id yet.
///
/// Stores persist it with a vote count of zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOption {
    pub name: String,
    pub link: String,
    pub details: OptionDetails,
    pub session_id: Option<SessionId>,
    pub created_at: DateTime<Utc>,
}

impl NewOption {
    /// Attach the store-assigned id, producing the persisted form.
    #[must_use]
    pub fn with_id(self, id: OptionId) -> VoteOption {
        VoteOption {
            id,
            name: self.name,
            link: self.link,
            details: self.details,
            votes: 0,
            created_at: self.created_at,
            session_id: self.session_id,
        }
    }
}
