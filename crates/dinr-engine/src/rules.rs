//! Pure voting rules. No I/O, no state: every input is an explicit argument.

use std::cmp::Ordering;

use dinr_core::entities::VoteOption;
use dinr_core::enums::LockScope;
use dinr_core::ids::SessionId;

/// Apply a signed delta to a vote count, flooring at zero.
///
/// Driving the count below zero is not an error; the result simply stops at
/// zero. Arithmetic saturates, so no delta can overflow.
#[must_use]
pub const fn apply_delta(current: i64, delta: i64) -> i64 {
    let next = current.saturating_add(delta);
    if next < 0 { 0 } else { next }
}

/// Effective lock state of an option: the global flag OR its session's flag.
///
/// `session` is `(owning session, its locked flag)` for scoped options and
/// `None` for unscoped ones. Returns the scope that blocks mutation, reporting
/// the global scope when both are set.
#[must_use]
pub const fn effective_lock(
    global_locked: bool,
    session: Option<(SessionId, bool)>,
) -> Option<LockScope> {
    if global_locked {
        return Some(LockScope::Global);
    }
    match session {
        Some((id, true)) => Some(LockScope::Session(id)),
        _ => None,
    }
}

/// Ranking order for winner selection: votes descending, then creation time
/// ascending, then id ascending.
#[must_use]
pub fn ranking_order(a: &VoteOption, b: &VoteOption) -> Ordering {
    b.votes
        .cmp(&a.votes)
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Sort options into ranking order in place. The first element is the winner.
pub fn rank(options: &mut [VoteOption]) {
    options.sort_by(ranking_order);
}
