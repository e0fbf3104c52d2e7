use serde::Serialize;

use dinr_core::entities::VoteOption;
use dinr_core::ids::{GroupId, OptionId};

/// Result of `dinr option vote`: the delta applied and the option after it.
#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub option_id: OptionId,
    pub delta: i64,
    pub option: VoteOption,
}

/// Result of toggling or reading the global lock.
#[derive(Debug, Serialize)]
pub struct LockResponse {
    pub locked: bool,
}

#[derive(Debug, Serialize)]
pub struct GroupDeleteResponse {
    pub group_id: GroupId,
    pub deleted: bool,
}

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub seeded: bool,
}
