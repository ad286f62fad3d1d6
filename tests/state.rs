#[cfg(test)]
mod tests {
    use chrono::{Duration, Local, NaiveDate, NaiveDateTime, TimeZone};
    use lenslog::libs::cycle::{CompletedInterval, LensKind};
    use lenslog::libs::reminder::Reminder;
    use lenslog::libs::state::{
        cycle_state_writes, from_epoch, from_legacy_epoch, load_cycle_state, load_cycle_state_with, load_reminders, reminders_write, to_epoch, CycleKeys, CycleState,
    };
    use lenslog::libs::store::{MemoryStore, PersistenceAdapter};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
    }

    fn utc_epoch(local: NaiveDateTime) -> i64 {
        Local.from_local_datetime(&local).earliest().unwrap().timestamp()
    }

    #[test]
    fn test_keys_are_namespaced() {
        let keys = CycleKeys::new("pair");
        assert_eq!(keys.active, "pair.active");
        assert_eq!(keys.start, "pair.start");
        assert_eq!(keys.pairs_remaining, "pair.pairs_remaining");
        assert_eq!(keys.history, "pair.history");
    }

    #[test]
    fn test_epoch_conversion() {
        let time = at(2024, 7, 1, 12, 0);
        assert_eq!(from_epoch(to_epoch(time)), Some(time));
        assert_eq!(from_epoch(0), Some(at(1970, 1, 1, 0, 0)));
    }

    #[test]
    fn test_state_round_trip() {
        let keys = CycleKeys::new("pair");
        let state = CycleState {
            active: true,
            start: Some(at(2024, 7, 1, 12, 0)),
            kind: LensKind::Monthly,
            pairs_remaining: 7,
            last_end: Some(at(2024, 7, 1, 11, 0)),
            history: vec![CompletedInterval {
                start: at(2024, 6, 1, 12, 0),
                duration: Duration::days(30) - Duration::hours(1),
            }],
        };
        let mut store = MemoryStore::new();

        store.apply(&cycle_state_writes(&keys, &state)).unwrap();

        assert_eq!(load_cycle_state(&store, &keys), state);
    }

    #[test]
    fn test_missing_values_fall_back_to_defaults() {
        let store = MemoryStore::new();
        assert_eq!(load_cycle_state(&store, &CycleKeys::new("wear")), CycleState::default());
    }

    #[test]
    fn test_corrupt_values_fall_back_to_defaults() {
        let keys = CycleKeys::new("pair");
        let mut store = MemoryStore::new();
        store.set(&keys.kind, "\"Weekly\"").unwrap();
        store.set(&keys.pairs_remaining, "-3").unwrap();
        store.set(&keys.history, "{not json").unwrap();

        let state = load_cycle_state(&store, &keys);

        assert_eq!(state.kind, LensKind::Daily);
        assert_eq!(state.pairs_remaining, 0);
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_active_without_start_is_inactive() {
        let keys = CycleKeys::new("wear");
        let mut store = MemoryStore::new();
        store.set(&keys.active, "true").unwrap();

        let state = load_cycle_state(&store, &keys);

        assert!(!state.active);
        assert_eq!(state.start, None);
    }

    #[test]
    fn test_legacy_history_mapping_is_read() {
        let keys = CycleKeys::new("wear");
        let first = at(2024, 1, 2, 8, 0);
        let second = at(2024, 1, 1, 8, 0);
        let mut store = MemoryStore::new();
        let legacy = format!("{{\"{}\": 3600.0, \"{}\": 7200.5}}", utc_epoch(first), utc_epoch(second));
        store.set(&keys.history, &legacy).unwrap();

        let history = load_cycle_state(&store, &keys).history;

        assert_eq!(history.len(), 2);
        assert_eq!(history[0].start, second);
        assert_eq!(history[0].duration, Duration::seconds(7200));
        assert_eq!(history[1].start, first);
        assert_eq!(history[1].duration, Duration::hours(1));
    }

    #[test]
    fn test_legacy_epoch_is_utc() {
        let local = at(2024, 3, 15, 18, 45);
        assert_eq!(from_legacy_epoch(utc_epoch(local)), Some(local));
    }

    #[test]
    fn test_unreachable_due_time_is_corrupt() {
        let keys = CycleKeys::new("pair");
        let mut store = MemoryStore::new();
        let late = NaiveDateTime::MAX - Duration::days(1);
        store.set(&keys.active, "true").unwrap();
        store.set(&keys.start, &to_epoch(late).to_string()).unwrap();
        store.set(&keys.kind, "\"Monthly\"").unwrap();

        let state = load_cycle_state(&store, &keys);

        assert!(!state.active);
        assert_eq!(state.start, None);
        assert_eq!(state.kind, LensKind::Monthly);
    }

    #[test]
    fn test_due_time_checked_against_given_nominal() {
        let keys = CycleKeys::new("wear");
        let mut store = MemoryStore::new();
        let late = NaiveDateTime::MAX - Duration::hours(20);
        store.set(&keys.active, "true").unwrap();
        store.set(&keys.start, &to_epoch(late).to_string()).unwrap();

        assert!(load_cycle_state_with(&store, &keys, |_| Duration::hours(16)).active);
        assert!(!load_cycle_state_with(&store, &keys, |_| Duration::hours(24)).active);
    }

    #[test]
    fn test_inactive_state_removes_start() {
        let keys = CycleKeys::new("wear");
        let mut store = MemoryStore::new();
        store.set(&keys.start, "100").unwrap();

        store.apply(&cycle_state_writes(&keys, &CycleState::default())).unwrap();

        assert_eq!(store.get(&keys.start).unwrap(), None);
        assert_eq!(store.get(&keys.active).unwrap().as_deref(), Some("false"));
        assert_eq!(store.get(&keys.history).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_reminders_round_trip() {
        let reminders = vec![Reminder {
            at: at(2024, 8, 1, 9, 0),
            title: "Replace Contacts".to_string(),
            body: "It's time to replace your contact lenses.".to_string(),
        }];
        let mut store = MemoryStore::new();

        store.apply(&[reminders_write(&reminders)]).unwrap();

        assert_eq!(load_reminders(&store), reminders);
    }
}
