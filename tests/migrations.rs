#[cfg(test)]
mod tests {
    use lenslog::db::db::{Db, DB_FILE_NAME};
    use lenslog::db::migrations::{get_db_version, MigrationManager};
    use lenslog::libs::data_storage::DataStorage;
    use rusqlite::Connection;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct MigrationTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for MigrationTestContext {
        fn setup() -> Self {
            MigrationTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    fn applied_migrations(conn: &Connection) -> Vec<(u32, String)> {
        let mut stmt = conn.prepare("SELECT version, name FROM migrations ORDER BY version").unwrap();
        stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migrations_run_on_open(ctx: &mut MigrationTestContext) {
        let storage = DataStorage::with_base(ctx.temp_dir.path());
        let db = Db::open_in(&storage).unwrap();

        assert!(ctx.temp_dir.path().join(DB_FILE_NAME).exists());
        assert_eq!(get_db_version(&db.conn).unwrap(), 1);

        let kv_tables: i32 = db
            .conn
            .query_row("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'kv'", [], |row| row.get(0))
            .unwrap();
        assert_eq!(kv_tables, 1);
    }

    #[test]
    fn test_migration_history() {
        let mut conn = Connection::open_in_memory().unwrap();
        let manager = MigrationManager::new();

        assert_eq!(get_db_version(&conn).unwrap(), 0);
        manager.run_migrations(&mut conn).unwrap();

        let history = applied_migrations(&conn);
        assert!(!history.is_empty());
        for (index, (version, _)) in history.iter().enumerate() {
            assert_eq!(*version as usize, index + 1);
        }
        assert_eq!(history[0].1, "create_kv_store");
        assert_eq!(get_db_version(&conn).unwrap(), 1);
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migration_idempotency(ctx: &mut MigrationTestContext) {
        let path = ctx.temp_dir.path().join(DB_FILE_NAME);
        let version1 = get_db_version(&Db::open(&path).unwrap().conn).unwrap();
        let version2 = get_db_version(&Db::open(&path).unwrap().conn).unwrap();

        assert_eq!(version1, version2);
        let mut conn = Connection::open(&path).unwrap();
        MigrationManager::new().run_migrations(&mut conn).unwrap();
        assert_eq!(applied_migrations(&conn).len(), 1);
    }
}
