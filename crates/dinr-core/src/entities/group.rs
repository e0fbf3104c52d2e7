use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids::GroupId;

/// Default icon for groups created without one.
pub const DEFAULT_EMOJI_ICON: &str = "🍽️";

/// Default color theme for groups created without one.
pub const DEFAULT_COLOR_THEME: &str = "#667eea";

/// A set of people who vote together. Membership lives in `group_members`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub description: Option<String>,
    pub emoji_icon: String,
    pub color_theme: String,
    pub created_at: DateTime<Utc>,
}
