#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use lenslog::db::kv::SqliteStore;
    use lenslog::libs::cycle::LensKind;
    use lenslog::libs::data_storage::DataStorage;
    use lenslog::libs::reminder::NoReminders;
    use lenslog::libs::store::{MemoryStore, PersistenceAdapter, WriteOp};
    use lenslog::libs::tracker::{TrackerRole, TrackerSettings, WearCycleTracker};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct StoreTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for StoreTestContext {
        fn setup() -> Self {
            StoreTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    impl StoreTestContext {
        fn open(&self) -> SqliteStore {
            SqliteStore::open_in(&DataStorage::with_base(self.temp_dir.path())).unwrap()
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn test_memory_store_basic_operations() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());

        store.set("a", "1").unwrap();
        store.set("a", "2").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));
        assert_eq!(store.len(), 1);

        store.remove("a").unwrap();
        store.remove("missing").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
    }

    #[test]
    fn test_memory_store_failed_batch_writes_nothing() {
        let mut store = MemoryStore::new();
        store.set("kept", "yes").unwrap();
        store.fail_writes(true);

        let result = store.apply(&[WriteOp::set("new", "1"), WriteOp::remove("kept")]);

        assert!(result.is_err());
        assert_eq!(store.get("new").unwrap(), None);
        assert_eq!(store.get("kept").unwrap().as_deref(), Some("yes"));
    }

    #[test]
    fn test_write_op_key() {
        assert_eq!(WriteOp::set("pair.kind", "\"Daily\"").key(), "pair.kind");
        assert_eq!(WriteOp::remove("pair.start").key(), "pair.start");
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_sqlite_store_persists_across_connections(ctx: &mut StoreTestContext) {
        {
            let mut store = ctx.open();
            store.set("pair.pairs_remaining", "6").unwrap();
            store.set("pair.kind", "\"Monthly\"").unwrap();
            store.set("pair.kind", "\"Daily\"").unwrap();
        }

        let store = ctx.open();
        assert_eq!(store.get("pair.pairs_remaining").unwrap().as_deref(), Some("6"));
        assert_eq!(store.get("pair.kind").unwrap().as_deref(), Some("\"Daily\""));
        assert_eq!(store.get("pair.start").unwrap(), None);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_sqlite_store_apply_batch(ctx: &mut StoreTestContext) {
        let mut store = ctx.open();
        store.set("wear.start", "100").unwrap();

        store
            .apply(&[WriteOp::set("wear.active", "false"), WriteOp::remove("wear.start"), WriteOp::set("wear.history", "[]")])
            .unwrap();

        assert_eq!(store.get("wear.active").unwrap().as_deref(), Some("false"));
        assert_eq!(store.get("wear.start").unwrap(), None);
        assert_eq!(store.get("wear.history").unwrap().as_deref(), Some("[]"));
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_tracker_round_trip_through_sqlite(ctx: &mut StoreTestContext) {
        let start = at(2024, 4, 15, 7, 30) + Duration::milliseconds(400);
        {
            let mut tracker = WearCycleTracker::open(ctx.open(), NoReminders, TrackerRole::PairLifetime, TrackerSettings::default());
            tracker.add_pairs(5).unwrap();
            tracker.activate_next_pair(start, Some(LensKind::Monthly)).unwrap();
        }

        let tracker = WearCycleTracker::open(ctx.open(), NoReminders, TrackerRole::PairLifetime, TrackerSettings::default());
        let cycle = tracker.cycle().unwrap();

        assert_eq!(cycle.start_time, at(2024, 4, 15, 7, 30));
        assert_eq!(cycle.kind, LensKind::Monthly);
        assert_eq!(cycle.pairs_remaining, 4);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_history_round_trip_through_sqlite(ctx: &mut StoreTestContext) {
        let start = at(2024, 4, 15, 7, 30);
        {
            let mut tracker = WearCycleTracker::open(ctx.open(), NoReminders, TrackerRole::default(), TrackerSettings::default());
            tracker.start_cycle(Some(start), LensKind::Daily).unwrap();
            tracker.close_cycle(Some(start + Duration::hours(9))).unwrap();
            tracker.start_cycle(Some(start + Duration::days(1)), LensKind::Daily).unwrap();
        }

        let tracker = WearCycleTracker::open(ctx.open(), NoReminders, TrackerRole::default(), TrackerSettings::default());

        assert_eq!(tracker.history().len(), 1);
        assert_eq!(tracker.history()[0].start, start);
        assert_eq!(tracker.history()[0].duration, Duration::hours(9));
        assert_eq!(tracker.last_end(), Some(start + Duration::hours(9)));
        assert_eq!(tracker.cycle().unwrap().start_time, start + Duration::days(1));
    }
}
