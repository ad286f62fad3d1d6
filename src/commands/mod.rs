//! Command-line interface.
//!
//! [`Cli`] is the clap parser and [`Cli::menu`] dispatches to one module per
//! subcommand. Each module exposes an `Args` struct (or a subcommand enum)
//! and an async `cmd` entry point.
//!
//! Commands build their trackers through the helpers at the bottom of this
//! file, which read the configuration once and open the SQLite store:
//!
//! - wear session commands (`on`, `off`, `wear`) use the `wear` namespace
//!   with the configured wear budget and no reminders
//! - pair commands (`pair`, `reminders`) use the `pair` namespace, with
//!   reminders persisted next to the tracker state
//! - `history` and `watch` pick either one with `--pairs`

pub mod history;
pub mod init;
pub mod pair;
pub mod prescription;
pub mod reminders;
pub mod watch;
pub mod wear;

use crate::db::kv::SqliteStore;
use crate::libs::config::Config;
use crate::libs::reminder::{NoReminders, StoredReminders};
use crate::libs::tracker::{TrackerRole, WearCycleTracker};
use anyhow::Result;
use clap::{Parser, Subcommand};

/// Tracker backed by the default database that schedules no reminders.
pub type WearTracker = WearCycleTracker<SqliteStore>;

/// Pair tracker whose replacement reminders are kept in the default database.
pub type PairTracker = WearCycleTracker<SqliteStore, StoredReminders<SqliteStore>>;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Put lenses in and start the wear timer")]
    On(wear::AtArgs),
    #[command(about = "Take lenses out and stop the wear timer")]
    Off(wear::AtArgs),
    #[command(about = "Show the current wear session")]
    Wear,
    #[command(about = "Manage the current pair and pair inventory")]
    Pair(pair::PairArgs),
    #[command(about = "Show or export completed cycles")]
    History(history::HistoryArgs),
    #[command(about = "Show or edit the lens prescription")]
    Prescription(prescription::PrescriptionArgs),
    #[command(about = "List scheduled replacement reminders")]
    Reminders(reminders::RemindersArgs),
    #[command(about = "Show a live countdown until Ctrl+C")]
    Watch(watch::WatchArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::On(args) => wear::on(args).await,
            Commands::Off(args) => wear::off(args).await,
            Commands::Wear => wear::status().await,
            Commands::Pair(args) => pair::cmd(args).await,
            Commands::History(args) => history::cmd(args).await,
            Commands::Prescription(args) => prescription::cmd(args).await,
            Commands::Reminders(args) => reminders::cmd(args).await,
            Commands::Watch(args) => watch::cmd(args).await,
        }
    }
}

pub fn wear_tracker(config: &Config) -> Result<WearTracker> {
    Ok(WearCycleTracker::from_config(SqliteStore::new()?, NoReminders, wear_role(config), config))
}

pub fn pair_tracker(config: &Config) -> Result<PairTracker> {
    let reminders = StoredReminders::new(SqliteStore::new()?);
    Ok(WearCycleTracker::from_config(SqliteStore::new()?, reminders, TrackerRole::PairLifetime, config))
}

/// Read-only view of either tracker; reminders are never scheduled through it.
pub fn tracker_for(pairs: bool, config: &Config) -> Result<WearTracker> {
    let role = if pairs { TrackerRole::PairLifetime } else { wear_role(config) };
    Ok(WearCycleTracker::from_config(SqliteStore::new()?, NoReminders, role, config))
}

fn wear_role(config: &Config) -> TrackerRole {
    TrackerRole::wear_session(config.wear().max_wear_hours)
}
