#[cfg(test)]
mod tests {
    use lenslog::libs::config::{Config, ReminderConfig, TrackerConfig, WearConfig, CONFIG_FILE_NAME};
    use lenslog::libs::data_storage::DataStorage;
    use lenslog::libs::reminder::ReminderPolicy;
    use lenslog::libs::tracker::TrackerSettings;
    use std::fs;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ConfigTestContext {
        _temp_dir: TempDir,
        storage: DataStorage,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let storage = DataStorage::with_base(temp_dir.path().join("lenslog"));
            ConfigTestContext {
                _temp_dir: temp_dir,
                storage,
            }
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.tracker(), TrackerConfig::default());
        assert!(config.tracker().reset_consumes_inventory);
        assert!(config.tracker().history_enabled);
        assert_eq!(config.wear().max_wear_hours, 16);
        assert_eq!(config.wear().refresh_interval, 60);
        assert_eq!(ReminderConfig::default().title, "Replace Contacts");
        assert!(!ReminderConfig::default().align_to_day);
        assert_eq!(config.brands_file, None);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_missing_file_reads_defaults(ctx: &mut ConfigTestContext) {
        let config = Config::read_from(&ctx.storage).unwrap();
        assert!(config.tracker.is_none());
        assert!(config.wear.is_none());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read(ctx: &mut ConfigTestContext) {
        let config = Config {
            tracker: Some(TrackerConfig {
                reset_consumes_inventory: false,
                history_enabled: true,
            }),
            wear: Some(WearConfig {
                max_wear_hours: 12,
                refresh_interval: 30,
            }),
            reminder: None,
            brands_file: Some("/tmp/brands.csv".to_string()),
        };

        config.save_to(&ctx.storage).unwrap();
        let loaded = Config::read_from(&ctx.storage).unwrap();

        assert_eq!(loaded.tracker, config.tracker);
        assert_eq!(loaded.wear, config.wear);
        assert_eq!(loaded.reminder, None);
        assert_eq!(loaded.brands_file.as_deref(), Some("/tmp/brands.csv"));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_unset_sections_are_not_written(ctx: &mut ConfigTestContext) {
        Config::default().save_to(&ctx.storage).unwrap();

        let raw = fs::read_to_string(ctx.storage.get_path(CONFIG_FILE_NAME).unwrap()).unwrap();
        assert_eq!(raw.trim(), "{}");
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_invalid_file_is_an_error(ctx: &mut ConfigTestContext) {
        fs::write(ctx.storage.get_path(CONFIG_FILE_NAME).unwrap(), "{ broken").unwrap();
        assert!(Config::read_from(&ctx.storage).is_err());
    }

    #[test]
    fn test_sections_convert_into_settings() {
        let settings: TrackerSettings = TrackerConfig {
            reset_consumes_inventory: false,
            history_enabled: false,
        }
        .into();
        assert!(!settings.reset_consumes_inventory);
        assert!(!settings.history_enabled);

        let policy: ReminderPolicy = ReminderConfig {
            title: "Swap lenses".to_string(),
            body: "New pair today".to_string(),
            align_to_day: true,
        }
        .into();
        assert_eq!(policy.title, "Swap lenses");
        assert!(policy.align_to_day);
    }
}
