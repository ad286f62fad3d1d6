//! Key-value persistence abstraction.
//!
//! Every piece of tracker, reminder and prescription state goes through the
//! narrow [`PersistenceAdapter`] interface. Values are opaque strings; the
//! encoding of each key lives in [`crate::libs::state`].
//!
//! Two adapters ship with the crate:
//! - [`MemoryStore`] keeps everything in a `BTreeMap`, used by tests and dry runs
//! - [`crate::db::kv::SqliteStore`] writes to the local SQLite database

use std::collections::BTreeMap;
use thiserror::Error;

/// Failure raised by a persistence adapter.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("store is unavailable: {0}")]
    Unavailable(String),
}

/// One write in a batch passed to [`PersistenceAdapter::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    Set(String, String),
    Remove(String),
}

impl WriteOp {
    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Self {
        WriteOp::Set(key.into(), value.into())
    }

    pub fn remove(key: impl Into<String>) -> Self {
        WriteOp::Remove(key.into())
    }

    pub fn key(&self) -> &str {
        match self {
            WriteOp::Set(key, _) | WriteOp::Remove(key) => key,
        }
    }
}

/// Narrow key-value interface used for all persisted state.
pub trait PersistenceAdapter {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;

    /// Applies a batch of writes.
    ///
    /// The default applies them in order and stops at the first failure.
    /// Adapters with transactions override this so the batch is all-or-nothing.
    fn apply(&mut self, ops: &[WriteOp]) -> Result<(), StoreError> {
        for op in ops {
            match op {
                WriteOp::Set(key, value) => self.set(key, value)?,
                WriteOp::Remove(key) => self.remove(key)?,
            }
        }
        Ok(())
    }
}

impl<T: PersistenceAdapter + ?Sized> PersistenceAdapter for &mut T {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }

    fn apply(&mut self, ops: &[WriteOp]) -> Result<(), StoreError> {
        (**self).apply(ops)
    }
}

/// In-memory adapter.
///
/// `fail_writes` makes every subsequent write fail, which lets callers
/// exercise their write-failure paths.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Unavailable("writes are disabled".to_string()));
        }
        Ok(())
    }
}

impl PersistenceAdapter for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check_writable()?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.check_writable()?;
        self.entries.remove(key);
        Ok(())
    }

    fn apply(&mut self, ops: &[WriteOp]) -> Result<(), StoreError> {
        // Nothing is written unless the whole batch can be.
        self.check_writable()?;
        for op in ops {
            match op {
                WriteOp::Set(key, value) => {
                    self.entries.insert(key.clone(), value.clone());
                }
                WriteOp::Remove(key) => {
                    self.entries.remove(key);
                }
            }
        }
        Ok(())
    }
}
