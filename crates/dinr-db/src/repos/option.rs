//! Option repository.
//!
//! Rows of the `options` table. Vote counts only change through
//! [`DinrDb::update_option`], a conditional update keyed on the count the
//! caller last read.

use dinr_core::entities::{NewOption, OptionDetails, VoteOption};
use dinr_core::ids::{OptionId, SessionId};
use libsql::Value;

use super::timestamp;
use crate::DinrDb;
use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, opt_text, parse_datetime};

const SELECT_COLS: &str =
    "id, name, link, image_url, cuisine, price_range, votes, created_at, session_id";

/// Ranking order, repeated by the engine; kept here so listings are stable.
const ORDER_BY: &str = "ORDER BY votes DESC, created_at ASC, id ASC";

fn session_value(session_id: Option<SessionId>) -> Value {
    session_id.map_or(Value::Null, |id| Value::Integer(id.0))
}

impl DinrDb {
    /// Insert a new option with zero votes and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the insert fails, including a foreign-key
    /// failure for an unknown session.
    pub async fn insert_option(&self, option: &NewOption) -> Result<VoteOption, DatabaseError> {
        let sql = format!(
            "INSERT INTO options (name, link, image_url, cuisine, price_range, votes, created_at, session_id)
             VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6, ?7) RETURNING {SELECT_COLS}"
        );
        let mut rows = self
            .conn()
            .query(
                &sql,
                libsql::params![
                    option.name.as_str(),
                    option.link.as_str(),
                    opt_text(option.details.image_url.as_deref()),
                    opt_text(option.details.cuisine.as_deref()),
                    opt_text(option.details.price_range.as_deref()),
                    timestamp(option.created_at),
                    session_value(option.session_id),
                ],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_option(&row)
    }

    /// Fetch one option, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_option(&self, id: OptionId) -> Result<Option<VoteOption>, DatabaseError> {
        let sql = format!("SELECT {SELECT_COLS} FROM options WHERE id = ?1");
        let mut rows = self.conn().query(&sql, [id.0]).await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_option(&row)?)),
            None => Ok(None),
        }
    }

    /// All options, highest vote count first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_options(&self) -> Result<Vec<VoteOption>, DatabaseError> {
        let sql = format!("SELECT {SELECT_COLS} FROM options {ORDER_BY}");
        let rows = self.conn().query(&sql, ()).await?;
        collect_options(rows).await
    }

    /// Options belonging to one session, highest vote count first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_session_options(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<VoteOption>, DatabaseError> {
        let sql = format!("SELECT {SELECT_COLS} FROM options WHERE session_id = ?1 {ORDER_BY}");
        let rows = self.conn().query(&sql, [session_id.0]).await?;
        collect_options(rows).await
    }

    /// Write `option` back only if its stored vote count still equals
    /// `expected_votes`. Returns `None` when the guard did not match.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the option no longer exists, or
    /// `DatabaseError` if the update fails.
    pub async fn update_option(
        &self,
        option: &VoteOption,
        expected_votes: i64,
    ) -> Result<Option<VoteOption>, DatabaseError> {
        let sql = format!(
            "UPDATE options SET name = ?1, link = ?2, image_url = ?3, cuisine = ?4,
                    price_range = ?5, votes = ?6
             WHERE id = ?7 AND votes = ?8 RETURNING {SELECT_COLS}"
        );
        let mut rows = self
            .conn()
            .query(
                &sql,
                libsql::params![
                    option.name.as_str(),
                    option.link.as_str(),
                    opt_text(option.details.image_url.as_deref()),
                    opt_text(option.details.cuisine.as_deref()),
                    opt_text(option.details.price_range.as_deref()),
                    option.votes,
                    option.id.0,
                    expected_votes,
                ],
            )
            .await?;
        // Success is the returned row, not the connection-wide change counter.
        let saved = match rows.next().await? {
            Some(row) => Some(row_to_option(&row)?),
            None => None,
        };
        drop(rows);
        if saved.is_some() {
            return Ok(saved);
        }
        if self.find_option(option.id).await?.is_none() {
            return Err(DatabaseError::NotFound {
                entity: "option",
                id: option.id.0,
            });
        }
        Ok(None)
    }

    /// Insert an option with a preset vote count. Used by seeding.
    pub(crate) async fn insert_option_with_votes(
        &self,
        option: &NewOption,
        votes: i64,
    ) -> Result<VoteOption, DatabaseError> {
        let stored = self.insert_option(option).await?;
        let updated = VoteOption { votes, ..stored };
        self.update_option(&updated, 0).await?.ok_or_else(|| {
            DatabaseError::InvalidState(format!("option {} changed during insert", updated.id))
        })
    }
}

async fn collect_options(mut rows: libsql::Rows) -> Result<Vec<VoteOption>, DatabaseError> {
    let mut options = Vec::new();
    while let Some(row) = rows.next().await? {
        options.push(row_to_option(&row)?);
    }
    Ok(options)
}

fn row_to_option(row: &libsql::Row) -> Result<VoteOption, DatabaseError> {
    let created_at: String = row.get(7)?;
    Ok(VoteOption {
        id: OptionId(row.get(0)?),
        name: row.get(1)?,
        link: row.get(2)?,
        details: OptionDetails {
            image_url: get_opt_string(row, 3)?,
            cuisine: get_opt_string(row, 4)?,
            price_range: get_opt_string(row, 5)?,
        },
        votes: row.get(6)?,
        created_at: parse_datetime(&created_at)?,
        session_id: row.get::<Option<i64>>(8)?.map(SessionId),
    })
}
