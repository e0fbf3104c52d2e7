//! # dinr-db
//!
//! libSQL persistence for dinr.
//!
//! `DinrDb` is one handle over one local libSQL database. It implements the
//! three store contracts the voting engine needs ([`stores`]) and carries the
//! CRUD repositories for groups, users and sessions ([`repos`]) plus the demo
//! dataset ([`seed`]).
//!
//! Share it between the engine's slots with `Arc<DinrDb>`:
//!
//! ```no_run
//! # async fn demo() -> Result<(), dinr_db::error::DatabaseError> {
//! use std::sync::Arc;
//! use dinr_engine::VotingEngine;
//!
//! let db = Arc::new(dinr_db::DinrDb::open_local(":memory:").await?);
//! let engine = VotingEngine::new(Arc::clone(&db), Arc::clone(&db), db);
//! # Ok(()) }
//! ```

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod seed;
pub mod stores;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle for all dinr state.
pub struct DinrDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl DinrDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let dinr_db = Self { db, conn };
        dinr_db.run_migrations().await?;
        tracing::debug!(path, "database opened");
        Ok(dinr_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}
