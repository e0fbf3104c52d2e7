//! Engine store contracts backed by `DinrDb`.
//!
//! One database implements all three contracts, so a single `Arc<DinrDb>`
//! fills every slot of a `VotingEngine`.

use dinr_core::entities::{NewOption, VoteOption, VotingSession};
use dinr_core::errors::StorageError;
use dinr_core::ids::{OptionId, SessionId};
use dinr_engine::{GlobalLockStore, OptionStore, SessionStore};

use crate::DinrDb;

impl OptionStore for DinrDb {
    async fn create(&self, option: NewOption) -> Result<VoteOption, StorageError> {
        Ok(self.insert_option(&option).await?)
    }

    async fn get(&self, id: OptionId) -> Result<Option<VoteOption>, StorageError> {
        Ok(self.find_option(id).await?)
    }

    async fn list_all(&self) -> Result<Vec<VoteOption>, StorageError> {
        Ok(self.list_options().await?)
    }

    async fn list_by_session(&self, session_id: SessionId) -> Result<Vec<VoteOption>, StorageError> {
        Ok(self.list_session_options(session_id).await?)
    }

    async fn update(
        &self,
        option: &VoteOption,
        expected_votes: i64,
    ) -> Result<Option<VoteOption>, StorageError> {
        Ok(self.update_option(option, expected_votes).await?)
    }
}

impl SessionStore for DinrDb {
    async fn get(&self, id: SessionId) -> Result<Option<VotingSession>, StorageError> {
        Ok(self.find_session(id).await?)
    }

    async fn update(&self, session: &VotingSession) -> Result<VotingSession, StorageError> {
        Ok(self.update_session(session).await?)
    }
}

impl GlobalLockStore for DinrDb {
    async fn get(&self) -> Result<bool, StorageError> {
        Ok(self.voting_locked().await?)
    }

    async fn upsert(&self, locked: bool) -> Result<(), StorageError> {
        Ok(self.set_voting_locked(locked).await?)
    }
}
