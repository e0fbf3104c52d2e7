//! Global voting lock, stored as the single row `voting_config.id = 1`.

use crate::DinrDb;
use crate::error::DatabaseError;
use crate::helpers::get_bool;

impl DinrDb {
    /// Current global lock flag. An absent row means unlocked.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn voting_locked(&self) -> Result<bool, DatabaseError> {
        let mut rows = self
            .conn()
            .query("SELECT voting_locked FROM voting_config WHERE id = 1", ())
            .await?;
        match rows.next().await? {
            Some(row) => get_bool(&row, 0),
            None => Ok(false),
        }
    }

    /// Create or overwrite the global lock row.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the upsert fails.
    pub async fn set_voting_locked(&self, locked: bool) -> Result<(), DatabaseError> {
        self.conn()
            .execute(
                "INSERT INTO voting_config (id, voting_locked) VALUES (1, ?1)
                 ON CONFLICT(id) DO UPDATE SET voting_locked = excluded.voting_locked",
                [i64::from(locked)],
            )
            .await?;
        Ok(())
    }
}
