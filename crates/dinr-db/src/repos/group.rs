//! Group repository: dining groups and their membership.

use chrono::Utc;

use dinr_core::entities::{DEFAULT_COLOR_THEME, DEFAULT_EMOJI_ICON, Group, User};
use dinr_core::ids::{GroupId, UserId};
use dinr_core::validate::{optional_text, positive_id, required_text};

use super::timestamp;
use super::user::row_to_user;
use crate::DinrDb;
use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, opt_text, parse_datetime};

const SELECT_COLS: &str = "id, name, description, emoji_icon, color_theme, created_at";

impl DinrDb {
    /// Create a group. Blank icon and theme fall back to the defaults.
    ///
    /// When `creator` names an existing user, that user becomes the first
    /// member; an unknown creator is ignored.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a blank name, or
    /// `DatabaseError` if an insert fails.
    pub async fn create_group(
        &self,
        name: &str,
        description: Option<&str>,
        emoji_icon: Option<&str>,
        color_theme: Option<&str>,
        creator: Option<UserId>,
    ) -> Result<Group, DatabaseError> {
        let name = required_text("name", name)?;
        let description = optional_text(description);
        let emoji_icon =
            optional_text(emoji_icon).unwrap_or_else(|| DEFAULT_EMOJI_ICON.to_string());
        let color_theme =
            optional_text(color_theme).unwrap_or_else(|| DEFAULT_COLOR_THEME.to_string());

        let sql = format!(
            "INSERT INTO dinner_groups (name, description, emoji_icon, color_theme, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5) RETURNING {SELECT_COLS}"
        );
        let mut rows = self
            .conn()
            .query(
                &sql,
                libsql::params![
                    name,
                    opt_text(description.as_deref()),
                    emoji_icon,
                    color_theme,
                    timestamp(Utc::now()),
                ],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let group = row_to_group(&row)?;
        drop(rows);

        if let Some(user_id) = creator {
            self.conn()
                .execute(
                    "INSERT OR IGNORE INTO group_members (group_id, user_id, joined_at)
                     SELECT ?1, id, ?3 FROM users WHERE id = ?2",
                    libsql::params![group.id.0, user_id.0, timestamp(Utc::now())],
                )
                .await?;
        }

        tracing::info!(group_id = %group.id, "group created");
        Ok(group)
    }

    /// Fetch one group.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a non-positive id,
    /// `DatabaseError::NotFound` if it does not exist.
    pub async fn get_group(&self, id: GroupId) -> Result<Group, DatabaseError> {
        positive_id("group_id", id)?;
        let sql = format!("SELECT {SELECT_COLS} FROM dinner_groups WHERE id = ?1");
        let mut rows = self.conn().query(&sql, [id.0]).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NotFound {
            entity: "group",
            id: id.0,
        })?;
        row_to_group(&row)
    }

    /// All groups, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_groups(&self) -> Result<Vec<Group>, DatabaseError> {
        let sql =
            format!("SELECT {SELECT_COLS} FROM dinner_groups ORDER BY created_at DESC, id DESC");
        let rows = self.conn().query(&sql, ()).await?;
        collect_groups(rows).await
    }

    /// Groups the user belongs to, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_user_groups(&self, user_id: UserId) -> Result<Vec<Group>, DatabaseError> {
        let sql = "SELECT g.id, g.name, g.description, g.emoji_icon, g.color_theme, g.created_at
                   FROM dinner_groups g
                   JOIN group_members m ON m.group_id = g.id
                   WHERE m.user_id = ?1
                   ORDER BY g.created_at DESC, g.id DESC";
        let rows = self.conn().query(sql, [user_id.0]).await?;
        collect_groups(rows).await
    }

    /// Add a user to a group. Joining a group twice changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the group or the user does not
    /// exist.
    pub async fn join_group(&self, group_id: GroupId, user_id: UserId) -> Result<(), DatabaseError> {
        self.get_group(group_id).await?;
        self.get_user(user_id).await?;
        let mut rows = self
            .conn()
            .query(
                "INSERT OR IGNORE INTO group_members (group_id, user_id, joined_at) VALUES (?1, ?2, ?3)
                 RETURNING user_id",
                libsql::params![group_id.0, user_id.0, timestamp(Utc::now())],
            )
            .await?;
        if rows.next().await?.is_some() {
            tracing::info!(group_id = %group_id, user_id = %user_id, "user joined group");
        }
        Ok(())
    }

    /// Delete a group together with its memberships, sessions and their
    /// options. Returns whether a group was deleted.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the delete fails.
    pub async fn delete_group(&self, id: GroupId) -> Result<bool, DatabaseError> {
        let mut rows = self
            .conn()
            .query("DELETE FROM dinner_groups WHERE id = ?1 RETURNING id", [id.0])
            .await?;
        let deleted = rows.next().await?.is_some();
        if deleted {
            tracing::info!(group_id = %id, "group deleted");
        }
        Ok(deleted)
    }

    /// Members of a group in join order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the group does not exist.
    pub async fn group_members(&self, group_id: GroupId) -> Result<Vec<User>, DatabaseError> {
        self.get_group(group_id).await?;
        let sql = "SELECT u.id, u.name, u.email, u.avatar, u.created_at
                   FROM users u
                   JOIN group_members m ON m.user_id = u.id
                   WHERE m.group_id = ?1
                   ORDER BY m.joined_at ASC, u.id ASC";
        let mut rows = self.conn().query(sql, [group_id.0]).await?;
        let mut members = Vec::new();
        while let Some(row) = rows.next().await? {
            members.push(row_to_user(&row)?);
        }
        Ok(members)
    }
}

async fn collect_groups(mut rows: libsql::Rows) -> Result<Vec<Group>, DatabaseError> {
    let mut groups = Vec::new();
    while let Some(row) = rows.next().await? {
        groups.push(row_to_group(&row)?);
    }
    Ok(groups)
}

fn row_to_group(row: &libsql::Row) -> Result<Group, DatabaseError> {
    let created_at: String = row.get(5)?;
    Ok(Group {
        id: GroupId(row.get(0)?),
        name: row.get(1)?,
        description: get_opt_string(row, 2)?,
        emoji_icon: row.get(3)?,
        color_theme: row.get(4)?,
        created_at: parse_datetime(&created_at)?,
    })
}
