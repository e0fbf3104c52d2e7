//! The voting engine.
//!
//! `VotingEngine` owns three store handles and nothing else. Every operation
//! reads fresh state from the stores, applies the rules in [`crate::rules`],
//! and writes back through the store contracts.

use chrono::Utc;
use tracing::{debug, info, warn};

use dinr_core::entities::{NewOption, OptionDetails, VoteOption, VotingSession, VotingStatus};
use dinr_core::errors::{StorageError, VotingError};
use dinr_core::ids::{OptionId, SessionId};
use dinr_core::validate::{optional_text, positive_id, required_text};

use crate::retry::RetryConfig;
use crate::rules::{apply_delta, effective_lock, rank};
use crate::store::{GlobalLockStore, OptionStore, SessionStore};

/// Business rules for proposing options, voting, locking and picking winners.
pub struct VotingEngine<O, S, G> {
    options: O,
    sessions: S,
    global: G,
    retry: RetryConfig,
}

impl<O, S, G> VotingEngine<O, S, G>
where
    O: OptionStore,
    S: SessionStore,
    G: GlobalLockStore,
{
    /// Build an engine over the given stores with the default retry policy.
    #[must_use]
    pub fn new(options: O, sessions: S, global: G) -> Self {
        Self {
            options,
            sessions,
            global,
            retry: RetryConfig::default(),
        }
    }

    /// Replace the retry policy used for conflicted vote updates.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub const fn retry(&self) -> &RetryConfig {
        &self.retry
    }

    /// Propose an option on the unscoped board, or inside a session.
    ///
    /// Unscoped options are gated by the global lock. Scoped options are gated
    /// by their session's lock only; the global flag is not consulted.
    ///
    /// # Errors
    ///
    /// `Validation` for a blank name/link or non-positive session id,
    /// `NotFound` for a missing session, `Locked` when the gating flag is set,
    /// `Storage` when a store call fails.
    pub async fn add_option(
        &self,
        name: &str,
        link: &str,
        session_id: Option<SessionId>,
    ) -> Result<VoteOption, VotingError> {
        self.create_option(name, link, OptionDetails::default(), session_id)
            .await
    }

    /// Propose an option with descriptive metadata inside a session.
    ///
    /// Metadata is passed through as given, except that the image URL is
    /// trimmed (and dropped when blank).
    ///
    /// # Errors
    ///
    /// Same as [`Self::add_option`] for a scoped option.
    pub async fn add_option_to_session(
        &self,
        name: &str,
        link: &str,
        details: OptionDetails,
        session_id: SessionId,
    ) -> Result<VoteOption, VotingError> {
        let details = OptionDetails {
            image_url: optional_text(details.image_url.as_deref()),
            ..details
        };
        self.create_option(name, link, details, Some(session_id))
            .await
    }

    async fn create_option(
        &self,
        name: &str,
        link: &str,
        details: OptionDetails,
        session_id: Option<SessionId>,
    ) -> Result<VoteOption, VotingError> {
        let name = required_text("name", name)?;
        let link = required_text("link", link)?;

        let lock = match session_id {
            None => effective_lock(self.global.get().await?, None),
            // Scoped creation is gated by the session flag alone.
            Some(id) => {
                let session = self.require_session(id).await?;
                effective_lock(false, Some((session.id, session.locked)))
            }
        };
        if let Some(scope) = lock {
            debug!(%scope, "option creation rejected");
            return Err(VotingError::Locked(scope));
        }

        let option = self
            .options
            .create(NewOption {
                name,
                link,
                details,
                session_id,
                created_at: Utc::now(),
            })
            .await?;

        info!(
            option_id = %option.id,
            session_id = ?option.session_id.map(|id| id.0),
            "option added"
        );
        Ok(option)
    }

    /// Apply a signed vote delta to an option, flooring the count at zero.
    ///
    /// Concurrent votes on the same option are serialized through the store's
    /// conditional update; none of them is lost. Locks are checked again after
    /// every conflict, so a lock set mid-retry stops the vote.
    ///
    /// # Errors
    ///
    /// `Validation` for a non-positive id, `NotFound` for a missing option,
    /// `Locked` when the global lock or the option's session lock is set,
    /// `Storage` when a store call fails or the retry bound is exhausted.
    pub async fn vote(&self, option_id: OptionId, delta: i64) -> Result<(), VotingError> {
        let mut current = self.option(option_id).await?;
        self.ensure_mutable(&current).await?;

        let mut attempt = 1;
        loop {
            let updated = VoteOption {
                votes: apply_delta(current.votes, delta),
                ..current.clone()
            };
            if let Some(saved) = self.options.update(&updated, current.votes).await? {
                debug!(
                    option_id = %saved.id,
                    delta,
                    votes = saved.votes,
                    attempt,
                    "vote applied"
                );
                return Ok(());
            }

            if attempt >= self.retry.max_attempts {
                warn!(option_id = %option_id, attempt, "vote kept conflicting; giving up");
                return Err(StorageError::Contention { attempts: attempt }.into());
            }
            debug!(option_id = %option_id, attempt, "vote conflicted with a concurrent update");
            tokio::time::sleep(self.retry.delay_for(attempt)).await;
            attempt += 1;
            current = self.option(option_id).await?;
            self.ensure_mutable(&current).await?;
        }
    }

    /// Set or clear the global lock. Session flags are untouched.
    ///
    /// # Errors
    ///
    /// `Storage` when the flag cannot be written.
    pub async fn lock_voting(&self, locked: bool) -> Result<(), VotingError> {
        self.global.upsert(locked).await?;
        info!(locked, "global voting lock updated");
        Ok(())
    }

    /// Current global lock flag.
    ///
    /// Fails open: if the flag cannot be read the board is reported unlocked,
    /// so a storage hiccup does not freeze read-only views. Write paths do not
    /// use this method and propagate the failure instead.
    pub async fn is_voting_locked(&self) -> bool {
        match self.global.get().await {
            Ok(locked) => locked,
            Err(error) => {
                warn!(%error, "failed to read global voting lock; reporting unlocked");
                false
            }
        }
    }

    /// Set or clear one session's lock flag and return the updated session.
    ///
    /// # Errors
    ///
    /// `Validation` for a non-positive id, `NotFound` for a missing session,
    /// `Storage` when a store call fails.
    pub async fn lock_session(
        &self,
        session_id: SessionId,
        locked: bool,
    ) -> Result<VotingSession, VotingError> {
        let session = self.require_session(session_id).await?;
        let updated = self
            .sessions
            .update(&VotingSession { locked, ..session })
            .await?;
        info!(session_id = %updated.id, locked, "session lock updated");
        Ok(updated)
    }

    /// Highest-ranked option across the whole board, or `None` when empty.
    ///
    /// # Errors
    ///
    /// `Storage` when the options cannot be listed.
    pub async fn winner(&self) -> Result<Option<VoteOption>, VotingError> {
        Ok(self.all_options().await?.into_iter().next())
    }

    /// Highest-ranked option of one session, or `None` when it has none.
    ///
    /// The session's existence is not checked.
    ///
    /// # Errors
    ///
    /// `Validation` for a non-positive id, `Storage` when listing fails.
    pub async fn session_winner(
        &self,
        session_id: SessionId,
    ) -> Result<Option<VoteOption>, VotingError> {
        Ok(self.session_options(session_id).await?.into_iter().next())
    }

    /// All options in ranking order.
    ///
    /// # Errors
    ///
    /// `Storage` when the options cannot be listed.
    pub async fn all_options(&self) -> Result<Vec<VoteOption>, VotingError> {
        let mut options = self.options.list_all().await?;
        rank(&mut options);
        Ok(options)
    }

    /// One session's options in ranking order.
    ///
    /// # Errors
    ///
    /// `Validation` for a non-positive id, `Storage` when listing fails.
    pub async fn session_options(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<VoteOption>, VotingError> {
        positive_id("session_id", session_id)?;
        let mut options = self.options.list_by_session(session_id).await?;
        rank(&mut options);
        Ok(options)
    }

    /// One session's options that received at least one vote, in ranking order.
    ///
    /// # Errors
    ///
    /// Same as [`Self::session_options`].
    pub async fn session_results(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<VoteOption>, VotingError> {
        let mut options = self.session_options(session_id).await?;
        options.retain(|option| option.votes > 0);
        Ok(options)
    }

    /// Fetch one option.
    ///
    /// # Errors
    ///
    /// `Validation` for a non-positive id, `NotFound` for a missing option,
    /// `Storage` when the read fails.
    pub async fn option(&self, option_id: OptionId) -> Result<VoteOption, VotingError> {
        positive_id("option_id", option_id)?;
        self.options
            .get(option_id)
            .await?
            .ok_or_else(|| VotingError::not_found(option_id))
    }

    /// Global lock (fail-open) and the number of options on the board.
    ///
    /// # Errors
    ///
    /// `Storage` when the options cannot be listed.
    pub async fn status(&self) -> Result<VotingStatus, VotingError> {
        let locked = self.is_voting_locked().await;
        let total_options = self.options.list_all().await?.len();
        Ok(VotingStatus {
            locked,
            total_options,
        })
    }

    async fn require_session(&self, session_id: SessionId) -> Result<VotingSession, VotingError> {
        positive_id("session_id", session_id)?;
        self.sessions
            .get(session_id)
            .await?
            .ok_or_else(|| VotingError::not_found(session_id))
    }

    /// Reject mutation of `option` while the global or its session lock is set.
    async fn ensure_mutable(&self, option: &VoteOption) -> Result<(), VotingError> {
        let global_locked = self.global.get().await?;
        let session = match option.session_id {
            Some(id) => Some((id, self.require_session(id).await?.locked)),
            None => None,
        };
        match effective_lock(global_locked, session) {
            Some(scope) => {
                debug!(option_id = %option.id, %scope, "vote rejected");
                Err(VotingError::Locked(scope))
            }
            None => Ok(()),
        }
    }
}
