//! SQLite-backed [`PersistenceAdapter`].
//!
//! Values live in the `kv` table created by migration 1. A batch passed to
//! [`PersistenceAdapter::apply`] runs inside a single transaction, so a
//! tracker state change is either fully written or not written at all.

use crate::db::db::Db;
use crate::libs::data_storage::DataStorage;
use crate::libs::store::{PersistenceAdapter, StoreError, WriteOp};
use anyhow::Result;
use rusqlite::{params, OptionalExtension};

const SELECT_VALUE: &str = "SELECT value FROM kv WHERE key = ?1";
const UPSERT_VALUE: &str = "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, CURRENT_TIMESTAMP)
    ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";
const DELETE_VALUE: &str = "DELETE FROM kv WHERE key = ?1";

pub struct SqliteStore {
    db: Db,
}

impl SqliteStore {
    /// Opens the store in the default data directory.
    pub fn new() -> Result<Self> {
        Ok(Self { db: Db::new()? })
    }

    pub fn open_in(storage: &DataStorage) -> Result<Self> {
        Ok(Self { db: Db::open_in(storage)? })
    }

    pub fn in_memory() -> Result<Self> {
        Ok(Self { db: Db::in_memory()? })
    }
}

impl PersistenceAdapter for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self.db.conn.query_row(SELECT_VALUE, [key], |row| row.get(0)).optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.db.conn.execute(UPSERT_VALUE, params![key, value])?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.db.conn.execute(DELETE_VALUE, [key])?;
        Ok(())
    }

    fn apply(&mut self, ops: &[WriteOp]) -> Result<(), StoreError> {
        let tx = self.db.conn.transaction()?;
        for op in ops {
            match op {
                WriteOp::Set(key, value) => tx.execute(UPSERT_VALUE, params![key, value])?,
                WriteOp::Remove(key) => tx.execute(DELETE_VALUE, [key])?,
            };
        }
        tx.commit()?;
        Ok(())
    }
}
