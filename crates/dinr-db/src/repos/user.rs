//! User repository.

use chrono::Utc;

use dinr_core::entities::User;
use dinr_core::ids::UserId;
use dinr_core::validate::{optional_text, positive_id, required_text};

use super::timestamp;
use crate::DinrDb;
use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, opt_text, parse_datetime};

const SELECT_USER_COLS: &str = "id, name, email, avatar, created_at";

impl DinrDb {
    /// Register a user. Emails are unique.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a blank name or email, or an
    /// email that is already registered.
    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        avatar: Option<&str>,
    ) -> Result<User, DatabaseError> {
        let name = required_text("name", name)?;
        let email = required_text("email", email)?;
        let avatar = optional_text(avatar);

        let mut existing = self
            .conn()
            .query("SELECT 1 FROM users WHERE email = ?1", [email.as_str()])
            .await?;
        if existing.next().await?.is_some() {
            return Err(DatabaseError::Validation(format!(
                "email {email} is already registered"
            )));
        }
        drop(existing);

        let sql = format!(
            "INSERT INTO users (name, email, avatar, created_at)
             VALUES (?1, ?2, ?3, ?4) RETURNING {SELECT_USER_COLS}"
        );
        let mut rows = self
            .conn()
            .query(
                &sql,
                libsql::params![
                    name,
                    email,
                    opt_text(avatar.as_deref()),
                    timestamp(Utc::now()),
                ],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_user(&row)
    }

    /// Fetch one user.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a non-positive id,
    /// `DatabaseError::NotFound` if it does not exist.
    pub async fn get_user(&self, id: UserId) -> Result<User, DatabaseError> {
        positive_id("user_id", id)?;
        let sql = format!("SELECT {SELECT_USER_COLS} FROM users WHERE id = ?1");
        let mut rows = self.conn().query(&sql, [id.0]).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NotFound {
            entity: "user",
            id: id.0,
        })?;
        row_to_user(&row)
    }

    /// Number of registered users.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_users(&self) -> Result<u64, DatabaseError> {
        let mut rows = self.conn().query("SELECT COUNT(*) FROM users", ()).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        u64::try_from(row.get::<i64>(0)?)
            .map_err(|e| DatabaseError::InvalidState(format!("user count: {e}")))
    }
}

pub(crate) fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    let created_at: String = row.get(4)?;
    Ok(User {
        id: UserId(row.get(0)?),
        name: row.get(1)?,
        email: row.get(2)?,
        avatar: get_opt_string(row, 3)?,
        created_at: parse_datetime(&created_at)?,
    })
}
