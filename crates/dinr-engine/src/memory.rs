//! In-process store adapters.
//!
//! Each store keeps its rows behind a `tokio::sync::Mutex`, so every contract
//! call is atomic with respect to the others on the same store. Nothing is
//! durable; these back the engine in tests and in embeddings that only need a
//! scratch board.

use std::collections::BTreeMap;

use tokio::sync::Mutex;

use dinr_core::entities::{NewOption, VoteOption, VotingSession};
use dinr_core::errors::StorageError;
use dinr_core::ids::{OptionId, SessionId};

use crate::store::{GlobalLockStore, OptionStore, SessionStore};

#[derive(Debug, Default)]
struct OptionTable {
    last_id: i64,
    rows: BTreeMap<OptionId, VoteOption>,
}

/// Options kept in memory, ids assigned sequentially from 1.
#[derive(Debug, Default)]
pub struct MemoryOptionStore {
    table: Mutex<OptionTable>,
}

impl MemoryOptionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Sort by votes descending. Rows come out of the map in id order, and the
/// sort is stable, so equal counts keep insertion order.
fn by_votes_desc(mut options: Vec<VoteOption>) -> Vec<VoteOption> {
    options.sort_by(|a, b| b.votes.cmp(&a.votes));
    options
}

impl OptionStore for MemoryOptionStore {
    async fn create(&self, option: NewOption) -> Result<VoteOption, StorageError> {
        let mut table = self.table.lock().await;
        table.last_id += 1;
        let option = option.with_id(OptionId(table.last_id));
        table.rows.insert(option.id, option.clone());
        Ok(option)
    }

    async fn get(&self, id: OptionId) -> Result<Option<VoteOption>, StorageError> {
        Ok(self.table.lock().await.rows.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<VoteOption>, StorageError> {
        let table = self.table.lock().await;
        Ok(by_votes_desc(table.rows.values().cloned().collect()))
    }

    async fn list_by_session(&self, session_id: SessionId) -> Result<Vec<VoteOption>, StorageError> {
        let table = self.table.lock().await;
        Ok(by_votes_desc(
            table
                .rows
                .values()
                .filter(|option| option.session_id == Some(session_id))
                .cloned()
                .collect(),
        ))
    }

    async fn update(
        &self,
        option: &VoteOption,
        expected_votes: i64,
    ) -> Result<Option<VoteOption>, StorageError> {
        let mut table = self.table.lock().await;
        let Some(stored) = table.rows.get_mut(&option.id) else {
            return Err(StorageError::Unavailable(format!(
                "option {} does not exist",
                option.id
            )));
        };
        if stored.votes != expected_votes {
            return Ok(None);
        }
        *stored = option.clone();
        Ok(Some(option.clone()))
    }
}

/// Sessions kept in memory. Creation is outside the engine's contract, so
/// callers seed sessions with [`MemorySessionStore::insert`].
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    rows: Mutex<BTreeMap<SessionId, VotingSession>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a session.
    pub async fn insert(&self, session: VotingSession) {
        self.rows.lock().await.insert(session.id, session);
    }
}

impl SessionStore for MemorySessionStore {
    async fn get(&self, id: SessionId) -> Result<Option<VotingSession>, StorageError> {
        Ok(self.rows.lock().await.get(&id).cloned())
    }

    async fn update(&self, session: &VotingSession) -> Result<VotingSession, StorageError> {
        let mut rows = self.rows.lock().await;
        let Some(stored) = rows.get_mut(&session.id) else {
            return Err(StorageError::Unavailable(format!(
                "session {} does not exist",
                session.id
            )));
        };
        *stored = session.clone();
        Ok(session.clone())
    }
}

/// The global lock flag kept in memory. Unset until the first upsert.
#[derive(Debug, Default)]
pub struct MemoryLockStore {
    flag: Mutex<Option<bool>>,
}

impl MemoryLockStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl GlobalLockStore for MemoryLockStore {
    async fn get(&self) -> Result<bool, StorageError> {
        Ok(self.flag.lock().await.unwrap_or(false))
    }

    async fn upsert(&self, locked: bool) -> Result<(), StorageError> {
        *self.flag.lock().await = Some(locked);
        Ok(())
    }
}
