//! Voting session repository.
//!
//! Sessions belong to a group. The engine reads them and flips their lock
//! flag through the store contract; creation and listing live here.

use chrono::{DateTime, Utc};

use dinr_core::entities::VotingSession;
use dinr_core::ids::{GroupId, SessionId};
use dinr_core::validate::{optional_text, positive_id, required_text};

use super::timestamp;
use crate::DinrDb;
use crate::error::DatabaseError;
use crate::helpers::{get_bool, get_opt_string, opt_text, parse_datetime, parse_optional_datetime};

const SELECT_COLS: &str = "id, group_id, title, description, locked, created_at, deadline";

impl DinrDb {
    /// Open a new, unlocked voting session in a group.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a blank title,
    /// `DatabaseError::NotFound` if the group does not exist, or
    /// `DatabaseError` if the insert fails.
    pub async fn create_session(
        &self,
        title: &str,
        description: Option<&str>,
        group_id: GroupId,
        deadline: Option<DateTime<Utc>>,
    ) -> Result<VotingSession, DatabaseError> {
        let title = required_text("title", title)?;
        let description = optional_text(description);
        // Resolves NotFound before the FK would.
        self.get_group(group_id).await?;

        let sql = format!(
            "INSERT INTO voting_sessions (group_id, title, description, locked, created_at, deadline)
             VALUES (?1, ?2, ?3, 0, ?4, ?5) RETURNING {SELECT_COLS}"
        );
        let mut rows = self
            .conn()
            .query(
                &sql,
                libsql::params![
                    group_id.0,
                    title,
                    opt_text(description.as_deref()),
                    timestamp(Utc::now()),
                    opt_text(deadline.map(timestamp).as_deref()),
                ],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let session = row_to_session(&row)?;
        tracing::info!(session_id = %session.id, group_id = %group_id, "session created");
        Ok(session)
    }

    /// Fetch one session, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_session(&self, id: SessionId) -> Result<Option<VotingSession>, DatabaseError> {
        let sql = format!("SELECT {SELECT_COLS} FROM voting_sessions WHERE id = ?1");
        let mut rows = self.conn().query(&sql, [id.0]).await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_session(&row)?)),
            None => Ok(None),
        }
    }

    /// Fetch one session.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a non-positive id,
    /// `DatabaseError::NotFound` if it does not exist.
    pub async fn get_session(&self, id: SessionId) -> Result<VotingSession, DatabaseError> {
        positive_id("session_id", id)?;
        self.find_session(id).await?.ok_or(DatabaseError::NotFound {
            entity: "session",
            id: id.0,
        })
    }

    /// Overwrite a session's mutable columns.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the session does not exist.
    pub async fn update_session(
        &self,
        session: &VotingSession,
    ) -> Result<VotingSession, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "UPDATE voting_sessions SET title = ?1, description = ?2, locked = ?3, deadline = ?4
                 WHERE id = ?5 RETURNING id",
                libsql::params![
                    session.title.as_str(),
                    opt_text(session.description.as_deref()),
                    i64::from(session.locked),
                    opt_text(session.deadline.map(timestamp).as_deref()),
                    session.id.0,
                ],
            )
            .await?;
        if rows.next().await?.is_none() {
            return Err(DatabaseError::NotFound {
                entity: "session",
                id: session.id.0,
            });
        }
        Ok(session.clone())
    }

    /// All sessions of a group, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_group_sessions(
        &self,
        group_id: GroupId,
    ) -> Result<Vec<VotingSession>, DatabaseError> {
        self.query_sessions(group_id, false).await
    }

    /// Unlocked sessions of a group, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_active_sessions(
        &self,
        group_id: GroupId,
    ) -> Result<Vec<VotingSession>, DatabaseError> {
        self.query_sessions(group_id, true).await
    }

    async fn query_sessions(
        &self,
        group_id: GroupId,
        unlocked_only: bool,
    ) -> Result<Vec<VotingSession>, DatabaseError> {
        let filter = if unlocked_only { "AND locked = 0" } else { "" };
        let sql = format!(
            "SELECT {SELECT_COLS} FROM voting_sessions
             WHERE group_id = ?1 {filter} ORDER BY created_at DESC, id DESC"
        );
        let mut rows = self.conn().query(&sql, [group_id.0]).await?;
        let mut sessions = Vec::new();
        while let Some(row) = rows.next().await? {
            sessions.push(row_to_session(&row)?);
        }
        Ok(sessions)
    }
}

fn row_to_session(row: &libsql::Row) -> Result<VotingSession, DatabaseError> {
    let created_at: String = row.get(5)?;
    let deadline = get_opt_string(row, 6)?;
    Ok(VotingSession {
        id: SessionId(row.get(0)?),
        group_id: GroupId(row.get(1)?),
        title: row.get(2)?,
        description: get_opt_string(row, 3)?,
        locked: get_bool(row, 4)?,
        created_at: parse_datetime(&created_at)?,
        deadline: parse_optional_datetime(deadline.as_deref())?,
    })
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    use super::*;

    async fn db_with_group() -> (DinrDb, GroupId) {
        let db = DinrDb::open_local(":memory:").await.unwrap();
        let group = db
            .create_group("Lunch Crew", None, None, None, None)
            .await
            .unwrap();
        (db, group.id)
    }

    #[tokio::test]
    async fn create_and_get() {
        let (db, group) = db_with_group().await;
        let deadline = Utc::now() + Duration::days(2);
        let session = db
            .create_session("  Friday Lunch ", Some(" "), group, Some(deadline))
            .await
            .unwrap();

        assert_eq!(session.title, "Friday Lunch");
        assert_eq!(session.description, None);
        assert!(!session.locked);
        assert_eq!(
            session.deadline.map(|d| d.timestamp_micros()),
            Some(deadline.timestamp_micros())
        );
        assert_eq!(db.get_session(session.id).await.unwrap(), session);
    }

    #[tokio::test]
    async fn blank_title_is_rejected() {
        let (db, group) = db_with_group().await;
        assert!(matches!(
            db.create_session("   ", None, group, None).await,
            Err(DatabaseError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn unknown_group_is_not_found() {
        let (db, _) = db_with_group().await;
        assert!(matches!(
            db.create_session("Dinner", None, GroupId(77), None).await,
            Err(DatabaseError::NotFound { entity: "group", id: 77 })
        ));
    }

    #[tokio::test]
    async fn active_listing_skips_locked_sessions() {
        let (db, group) = db_with_group().await;
        let first = db.create_session("First", None, group, None).await.unwrap();
        let second = db.create_session("Second", None, group, None).await.unwrap();
        db.update_session(&VotingSession {
            locked: true,
            ..first.clone()
        })
        .await
        .unwrap();

        let all: Vec<_> = db
            .list_group_sessions(group)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(all, vec![second.id, first.id]);

        let active = db.list_active_sessions(group).await.unwrap();
        assert_eq!(active, vec![second]);
    }

    #[tokio::test]
    async fn update_missing_session_is_not_found() {
        let (db, group) = db_with_group().await;
        let session = db.create_session("Only", None, group, None).await.unwrap();
        let ghost = VotingSession {
            id: SessionId(session.id.0 + 10),
            ..session
        };
        assert!(matches!(
            db.update_session(&ghost).await,
            Err(DatabaseError::NotFound { entity: "session", .. })
        ));
    }
}
