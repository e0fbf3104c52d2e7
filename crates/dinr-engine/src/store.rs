//! Store contracts the voting engine is written against.
//!
//! Adapters return `Send` futures so engine calls can be spawned onto a
//! multi-threaded runtime. `Arc<T>` implements every contract `T` does, which
//! lets one backend handle fill all three engine slots.

use std::future::Future;
use std::sync::Arc;

use dinr_core::entities::{NewOption, VoteOption, VotingSession};
use dinr_core::errors::StorageError;
use dinr_core::ids::{OptionId, SessionId};

/// Durable keyed storage for dining options.
pub trait OptionStore: Send + Sync {
    /// Persist a new option with zero votes and return it with its assigned id.
    fn create(
        &self,
        option: NewOption,
    ) -> impl Future<Output = Result<VoteOption, StorageError>> + Send;

    fn get(
        &self,
        id: OptionId,
    ) -> impl Future<Output = Result<Option<VoteOption>, StorageError>> + Send;

    /// Every option, scoped or not, sorted by votes descending.
    fn list_all(&self) -> impl Future<Output = Result<Vec<VoteOption>, StorageError>> + Send;

    /// Options belonging to `session_id`, sorted by votes descending.
    fn list_by_session(
        &self,
        session_id: SessionId,
    ) -> impl Future<Output = Result<Vec<VoteOption>, StorageError>> + Send;

    /// Persist `option` only if the stored vote count still equals
    /// `expected_votes`.
    ///
    /// Returns `Ok(None)` when a concurrent writer got there first; the caller
    /// re-reads and tries again.
    fn update(
        &self,
        option: &VoteOption,
        expected_votes: i64,
    ) -> impl Future<Output = Result<Option<VoteOption>, StorageError>> + Send;
}

/// Durable keyed storage for voting sessions and their lock flag.
pub trait SessionStore: Send + Sync {
    fn get(
        &self,
        id: SessionId,
    ) -> impl Future<Output = Result<Option<VotingSession>, StorageError>> + Send;

    fn update(
        &self,
        session: &VotingSession,
    ) -> impl Future<Output = Result<VotingSession, StorageError>> + Send;
}

/// The single system-wide lock flag.
pub trait GlobalLockStore: Send + Sync {
    /// Current flag value; `false` when it was never written.
    fn get(&self) -> impl Future<Output = Result<bool, StorageError>> + Send;

    fn upsert(&self, locked: bool) -> impl Future<Output = Result<(), StorageError>> + Send;
}

impl<T: OptionStore> OptionStore for Arc<T> {
    fn create(
        &self,
        option: NewOption,
    ) -> impl Future<Output = Result<VoteOption, StorageError>> + Send {
        OptionStore::create(&**self, option)
    }

    fn get(
        &self,
        id: OptionId,
    ) -> impl Future<Output = Result<Option<VoteOption>, StorageError>> + Send {
        OptionStore::get(&**self, id)
    }

    fn list_all(&self) -> impl Future<Output = Result<Vec<VoteOption>, StorageError>> + Send {
        OptionStore::list_all(&**self)
    }

    fn list_by_session(
        &self,
        session_id: SessionId,
    ) -> impl Future<Output = Result<Vec<VoteOption>, StorageError>> + Send {
        OptionStore::list_by_session(&**self, session_id)
    }

    fn update(
        &self,
        option: &VoteOption,
        expected_votes: i64,
    ) -> impl Future<Output = Result<Option<VoteOption>, StorageError>> + Send {
        OptionStore::update(&**self, option, expected_votes)
    }
}

impl<T: SessionStore> SessionStore for Arc<T> {
    fn get(
        &self,
        id: SessionId,
    ) -> impl Future<Output = Result<Option<VotingSession>, StorageError>> + Send {
        SessionStore::get(&**self, id)
    }

    fn update(
        &self,
        session: &VotingSession,
    ) -> impl Future<Output = Result<VotingSession, StorageError>> + Send {
        SessionStore::update(&**self, session)
    }
}

impl<T: GlobalLockStore> GlobalLockStore for Arc<T> {
    fn get(&self) -> impl Future<Output = Result<bool, StorageError>> + Send {
        GlobalLockStore::get(&**self)
    }

    fn upsert(&self, locked: bool) -> impl Future<Output = Result<(), StorageError>> + Send {
        GlobalLockStore::upsert(&**self, locked)
    }
}
