use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Board-wide voting status: the global lock and how many options exist.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct VotingStatus {
    pub locked: bool,
    pub total_options: usize,
}
