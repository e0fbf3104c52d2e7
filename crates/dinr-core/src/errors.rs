//! Cross-cutting error types for dinr.
//!
//! `VotingError` is what the voting engine hands back to its callers.
//! `StorageError` is what a store adapter hands back to the engine. Crate-local
//! errors (`DatabaseError`, `ConfigError`) live in their own crates and convert
//! into these at the boundary.

use thiserror::Error;

use crate::enums::LockScope;
use crate::ids::EntityId;

/// Malformed caller input: a blank required field or a non-positive id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} {reason}")]
pub struct InvalidInput {
    pub field: &'static str,
    pub reason: &'static str,
}

impl InvalidInput {
    #[must_use]
    pub const fn new(field: &'static str, reason: &'static str) -> Self {
        Self { field, reason }
    }
}

/// Failures raised by a store adapter.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store could not be reached or refused the call.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A conditional update kept losing to concurrent writers.
    #[error("Gave up after {attempts} conflicting updates")]
    Contention { attempts: u32 },

    /// Any other backend failure.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Errors returned by voting engine operations.
#[derive(Debug, Error)]
pub enum VotingError {
    /// Caller input is malformed. Never retried.
    #[error("Validation error: {0}")]
    Validation(#[from] InvalidInput),

    /// A referenced option or session does not exist.
    #[error("Entity not found: {entity} {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// A mutation was attempted while a lock is active.
    #[error("Locked: {0}")]
    Locked(LockScope),

    /// The underlying store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl VotingError {
    /// Build a `NotFound` for any typed id.
    #[must_use]
    pub fn not_found<I: EntityId>(id: I) -> Self {
        Self::NotFound {
            entity: I::ENTITY,
            id: id.get(),
        }
    }

    #[must_use]
    pub const fn is_locked(&self) -> bool {
        matches!(self, Self::Locked(_))
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    #[must_use]
    pub const fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// The lock scope that blocked the call, if this is a `Locked` error.
    #[must_use]
    pub const fn lock_scope(&self) -> Option<LockScope> {
        match self {
            Self::Locked(scope) => Some(*scope),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{OptionId, SessionId};

    #[test]
    fn not_found_carries_entity_name() {
        let err = VotingError::not_found(SessionId(12));
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Entity not found: session 12");
    }

    #[test]
    fn locked_is_distinguishable() {
        let err = VotingError::Locked(LockScope::Session(SessionId(3)));
        assert!(err.is_locked());
        assert!(!err.is_not_found());
        assert!(!err.is_validation());
        assert_eq!(err.lock_scope(), Some(LockScope::Session(SessionId(3))));
        assert_eq!(err.to_string(), "Locked: voting session 3 is locked");
    }

    #[test]
    fn validation_message() {
        let err: VotingError = InvalidInput::new("name", "is required").into();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Validation error: name is required");
        assert_eq!(VotingError::not_found(OptionId(1)).lock_scope(), None);
    }

    #[test]
    fn storage_errors_pass_through() {
        let err: VotingError = StorageError::Contention { attempts: 8 }.into();
        assert!(err.is_storage());
        assert_eq!(err.to_string(), "Gave up after 8 conflicting updates");
    }
}
