//! Database schema migrations.
//!
//! Every migration has a version, a name and an `up` function. Pending
//! migrations run in version order inside one transaction, and each applied
//! version is recorded in the `migrations` table.
//!
//! ```rust
//! use lenslog::db::migrations::{get_db_version, MigrationManager};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open_in_memory().unwrap();
//! MigrationManager::new().run_migrations(&mut conn).unwrap();
//! assert!(get_db_version(&conn).unwrap() >= 1);
//! ```

use crate::libs::messages::Message;
use crate::{msg_debug, msg_error};
use anyhow::Result;
use rusqlite::{params, Connection, Transaction};

const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

#[derive(Debug, Clone)]
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> Result<()>,
}

pub struct MigrationManager {
    /// Registered in ascending version order.
    migrations: Vec<Migration>,
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        // Version 1: key-value table backing the persistence adapter
        self.add_migration(1, "create_kv_store", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS kv (
                    key TEXT NOT NULL PRIMARY KEY,
                    value TEXT NOT NULL,
                    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )?;
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Applies every migration newer than the current schema version.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!(Message::DatabaseUpToDate);
            return Ok(());
        }

        msg_debug!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;
        for migration in pending {
            msg_debug!(Message::RunningMigration(migration.version, migration.name.to_string()));

            match (migration.up)(&tx) {
                Ok(()) => {
                    tx.execute(
                        "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                        params![migration.version, migration.name],
                    )?;
                }
                Err(e) => {
                    msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                    return Err(e);
                }
            }
        }
        tx.commit()?;

        msg_debug!(Message::AllMigrationsCompleted);
        Ok(())
    }

    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0))?;
        Ok(version.unwrap_or(0))
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Current schema version of `conn`, or 0 before any migration ran.
pub fn get_db_version(conn: &Connection) -> Result<u32> {
    conn.execute(MIGRATIONS_TABLE, [])?;
    MigrationManager::new().get_current_version(conn)
}
