//! Configuration management for lenslog.
//!
//! Settings live in `config.json` inside the data directory resolved by
//! [`DataStorage`]. Every section is optional; a missing section or a missing
//! file means "use the defaults", so lenslog works without any setup.
//!
//! ## Sections
//!
//! - **tracker**: inventory and history behavior of the pair tracker
//! - **wear**: wear budget and refresh interval of the daily-wear timer
//! - **reminder**: text and timing of the replacement reminder
//! - **brands_file**: CSV file with the lens brands offered for prescriptions
//!
//! ```rust,no_run
//! use lenslog::libs::config::Config;
//!
//! let config = Config::read()?;
//! let wear = config.wear.clone().unwrap_or_default();
//! println!("Wear budget: {} hours", wear.max_wear_hours);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::libs::tracker::DEFAULT_MAX_WEAR_HOURS;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// A section offered by the interactive setup.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// Pair tracker behavior.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TrackerConfig {
    /// Whether "reset duration of current pair" uses up one unopened pair.
    ///
    /// When disabled, a reset only restarts the clock.
    pub reset_consumes_inventory: bool,

    /// Whether closed cycles are kept in the history archive.
    pub history_enabled: bool,
}

/// Daily-wear timer settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WearConfig {
    /// Maximum recommended wear time per session, in hours.
    pub max_wear_hours: u64,

    /// How often the `watch` command refreshes the countdown, in seconds.
    pub refresh_interval: u64,
}

/// Replacement reminder settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ReminderConfig {
    pub title: String,
    pub body: String,

    /// Fire at the start of the due day rather than at the exact due time.
    pub align_to_day: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracker: Option<TrackerConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub wear: Option<WearConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder: Option<ReminderConfig>,

    /// Path of a CSV file listing lens brands, one per line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brands_file: Option<String>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            reset_consumes_inventory: true,
            history_enabled: true,
        }
    }
}

impl Default for WearConfig {
    fn default() -> Self {
        WearConfig {
            max_wear_hours: DEFAULT_MAX_WEAR_HOURS,
            refresh_interval: 60,
        }
    }
}

impl Default for ReminderConfig {
    fn default() -> Self {
        ReminderConfig {
            title: "Replace Contacts".to_string(),
            body: "It's time to replace your contact lenses.".to_string(),
            align_to_day: false,
        }
    }
}

impl Config {
    /// Reads the configuration from the default data directory.
    pub fn read() -> Result<Config> {
        Self::read_from(&DataStorage::new())
    }

    /// Reads the configuration from `storage`, or returns defaults if no file exists.
    ///
    /// A file that exists but cannot be parsed is an error.
    pub fn read_from(storage: &DataStorage) -> Result<Config> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&DataStorage::new())
    }

    pub fn save_to(&self, storage: &DataStorage) -> Result<()> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    pub fn wear(&self) -> WearConfig {
        self.wear.clone().unwrap_or_default()
    }

    pub fn tracker(&self) -> TrackerConfig {
        self.tracker.clone().unwrap_or_default()
    }

    /// Interactive setup. Existing values are offered as defaults.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![
            ConfigModule {
                key: "tracker".to_string(),
                name: "Pair tracker".to_string(),
            },
            ConfigModule {
                key: "wear".to_string(),
                name: "Daily wear timer".to_string(),
            },
            ConfigModule {
                key: "reminder".to_string(),
                name: "Replacement reminder".to_string(),
            },
            ConfigModule {
                key: "brands".to_string(),
                name: "Brand catalog".to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "tracker" => {
                    let default = config.tracker();
                    msg_print!(Message::ConfigModuleTracker);
                    config.tracker = Some(TrackerConfig {
                        reset_consumes_inventory: Confirm::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptResetConsumesInventory.to_string())
                            .default(default.reset_consumes_inventory)
                            .interact()?,
                        history_enabled: Confirm::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptHistoryEnabled.to_string())
                            .default(default.history_enabled)
                            .interact()?,
                    });
                }
                "wear" => {
                    let default = config.wear();
                    msg_print!(Message::ConfigModuleWear);
                    config.wear = Some(WearConfig {
                        max_wear_hours: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptMaxWearHours.to_string())
                            .default(default.max_wear_hours)
                            .interact_text()?,
                        refresh_interval: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptRefreshInterval.to_string())
                            .default(default.refresh_interval)
                            .interact_text()?,
                    });
                }
                "reminder" => {
                    let default = config.reminder.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleReminder);
                    config.reminder = Some(ReminderConfig {
                        title: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptReminderTitle.to_string())
                            .default(default.title)
                            .interact_text()?,
                        body: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptReminderBody.to_string())
                            .default(default.body)
                            .interact_text()?,
                        align_to_day: Confirm::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptReminderAlignToDay.to_string())
                            .default(default.align_to_day)
                            .interact()?,
                    });
                }
                "brands" => {
                    let path: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptBrandsFile.to_string())
                        .default(config.brands_file.clone().unwrap_or_default())
                        .allow_empty(true)
                        .interact_text()?;
                    config.brands_file = Some(path).filter(|path| !path.trim().is_empty());
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
