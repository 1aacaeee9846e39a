use super::migrations;
use crate::libs::error::StoreResult;
use rusqlite::Connection;
use std::path::Path;

/// Owned handle to the SQLite store.
///
/// Opened once by the caller and lent to repositories and controllers; closing
/// consumes it, so nothing can outlive the connection.
#[derive(Debug)]
pub struct Db {
    pub conn: Connection,
}

impl Db {
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Db> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        tracing::debug!(path = %path.display(), "database opened");

        Ok(Db { conn })
    }

    pub fn open_in_memory() -> StoreResult<Db> {
        let conn = Connection::open_in_memory()?;

        Ok(Db { conn })
    }

    /// Opens `path` and brings the schema up to date.
    pub fn open_with_schema(path: impl AsRef<Path>) -> StoreResult<Db> {
        let db = Self::open(path)?;
        db.ensure_schema()?;
        Ok(db)
    }

    /// Creates the `users`, `projects` and `tasks` tables when absent. Safe to call repeatedly.
    pub fn ensure_schema(&self) -> StoreResult<()> {
        migrations::init_with_migrations(&self.conn)
    }

    /// Closes the connection, reporting any error SQLite raises while doing so.
    pub fn close(self) -> StoreResult<()> {
        self.conn.close().map_err(|(_, err)| err)?;
        tracing::debug!("database closed");
        Ok(())
    }
}
