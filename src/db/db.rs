//! SQLite connection handling.
//!
//! [`Db`] wraps one `rusqlite` connection. Every constructor brings the
//! schema up to date through [`MigrationManager`] before handing the
//! connection out, so callers never see a database without the `kv` table.
//!
//! The database file is [`DB_FILE_NAME`] inside the lenslog data directory
//! (see [`DataStorage`]); tests point it at a temporary directory with
//! [`Db::open_in`] or skip the file entirely with [`Db::in_memory`].

use crate::db::migrations::MigrationManager;
use crate::libs::data_storage::DataStorage;
use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;

pub const DB_FILE_NAME: &str = "lenslog.db";

/// An open SQLite connection with all migrations applied.
pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the database in the default data directory.
    pub fn new() -> Result<Db> {
        Self::open_in(&DataStorage::new())
    }

    pub fn open_in(storage: &DataStorage) -> Result<Db> {
        let db_file_path = storage.get_path(DB_FILE_NAME)?;
        Self::open(db_file_path)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Db> {
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    pub fn in_memory() -> Result<Db> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(mut conn: Connection) -> Result<Db> {
        MigrationManager::new().run_migrations(&mut conn)?;
        Ok(Db { conn })
    }
}
