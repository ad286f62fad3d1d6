//! Local persistence for lenslog.
//!
//! lenslog keeps all of its state in a small SQLite database in the data
//! directory. The schema is a single key-value table; the meaning of each key
//! is defined by [`crate::libs::state`], not by the database layer.
//!
//! ```rust
//! use lenslog::db::kv::SqliteStore;
//! use lenslog::libs::store::PersistenceAdapter;
//!
//! let mut store = SqliteStore::in_memory().unwrap();
//! store.set("pair.pairs_remaining", "6").unwrap();
//! assert_eq!(store.get("pair.pairs_remaining").unwrap().as_deref(), Some("6"));
//! ```

/// Connection management: opens the database file and applies migrations.
pub mod db;

/// [`crate::libs::store::PersistenceAdapter`] implementation over the `kv` table.
pub mod kv;

/// Versioned schema changes.
pub mod migrations;
