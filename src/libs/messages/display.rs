//! Display implementation for lenslog messages.
//!
//! All user-facing text lives here so the wording stays consistent between
//! commands, and parameters are interpolated in one place.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === WEAR SESSION MESSAGES ===
            Message::WearStarted(time) => format!("Lenses in since {}", time),
            Message::WearEnded(duration) => format!("Lenses out. Worn for {}", duration),
            Message::WearNotActive => "You are not wearing lenses right now".to_string(),
            Message::WearOverdue(over) => format!("Maximum wear time exceeded by {}", over),
            Message::WearRemaining(left) => format!("Time remaining: {}", left),
            Message::InvalidTimeFormat(input) => format!("Invalid time '{}', expected HH:MM", input),

            // === PAIR MESSAGES ===
            Message::PairsAdded(added, total) => format!("Added {} pair(s), {} in stock", added, total),
            Message::PairActivated(kind, due) => format!("Opened a new {} pair, replace by {}", kind, due),
            Message::PairReset(due) => format!("Pair clock restarted, replace by {}", due),
            Message::PairNotActive => "No pair is currently in use".to_string(),
            Message::PairExpired => "Your lenses are due for replacement".to_string(),
            Message::PairDaysRemaining(days) => format!("{} until replacement", days),
            Message::PairsInInventory(count) => format!("Pairs remaining: {}", count),
            Message::NoPairsHint => "No pairs left. Restock with `lenslog pair add --count N`".to_string(),
            Message::LensKindChanged(kind) => format!("Lens type set to {}", kind),
            Message::LensKindUnchanged(kind) => format!("Lens type is already {}", kind),
            Message::ConfirmPairReset => "Restart the current pair's clock?".to_string(),
            Message::ConfirmPairResetConsumes(left) => {
                format!("Restart with a fresh pair? {} pair(s) will be left", left)
            }
            Message::OperationCancelled => "Operation cancelled".to_string(),

            // === HISTORY MESSAGES ===
            Message::HistoryEmpty => "No completed cycles yet".to_string(),
            Message::HistoryDisabled => "History is disabled in the configuration".to_string(),
            Message::HistoryExported(path) => format!("History exported to {}", path),

            // === PRESCRIPTION MESSAGES ===
            Message::PrescriptionSaved => "Prescription saved".to_string(),
            Message::PrescriptionEmpty => "No prescription recorded yet".to_string(),
            Message::PrescriptionNothingToSet => "Nothing to set, pass at least one field".to_string(),
            Message::PrescriptionExpired(date) => format!("Prescription expired on {}", date),
            Message::PrescriptionExpiresIn(date, days) => format!("Prescription expires on {} ({} days)", date, days),
            Message::PrescriptionImageAttached(path) => format!("Prescription image set to {}", path),
            Message::PrescriptionImageCleared => "Prescription image removed".to_string(),
            Message::PrescriptionImage(path) => format!("Prescription image: {}", path),
            Message::InvalidDateFormat(input) => format!("Invalid date '{}', expected YYYY-MM-DD", input),
            Message::BrandsFileNotConfigured => "No brands file configured, run `lenslog init`".to_string(),
            Message::BrandsEmpty => "The brands file lists no brands".to_string(),
            Message::BrandsLoadFailed(error) => format!("Failed to load brands: {}", error),

            // === REMINDER MESSAGES ===
            Message::RemindersEmpty => "No upcoming reminders".to_string(),
            Message::RemindersPruned(count) => format!("Removed {} past reminder(s)", count),
            Message::ReminderScheduleFailed(error) => format!("Failed to schedule replacement reminder: {}", error),

            // === WATCH MESSAGES ===
            Message::WatchStarted(namespace) => format!("Watching {} countdown, press Ctrl+C to stop", namespace),
            Message::WatchStopped(ticks) => format!("Stopped watching after {} refreshes", ticks),
            Message::WatchCycleDue => "Time is up".to_string(),
            Message::WatchNothingActive => "Nothing to watch, no cycle is active".to_string(),
            Message::WatchCtrlCListenFailed(error) => format!("Failed to listen for Ctrl+C: {}", error),

            // === STATE MESSAGES ===
            Message::StoreReadFailed { key, reason } => format!("Failed to read '{}', using default: {}", key, reason),
            Message::StoredValueCorrupt { key, reason } => {
                format!("Stored value '{}' is unreadable, using default: {}", key, reason)
            }
            Message::InconsistentCycleState(key) => format!("'{}' is set without a start time, treating as inactive", key),
            Message::StateWriteFailed(error) => format!("Failed to save state: {}", error),

            // === CONFIGURATION MESSAGES ===
            Message::MaxWearOutOfRange(hours, fallback) => {
                format!("Max wear of {} hours is out of range, using {} hours", hours, fallback)
            }
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleTracker => "Tracker settings".to_string(),
            Message::ConfigModuleWear => "Wear session settings".to_string(),
            Message::ConfigModuleReminder => "Reminder settings".to_string(),
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptResetConsumesInventory => "Does restarting a pair use up a pair from stock?".to_string(),
            Message::PromptHistoryEnabled => "Keep a history of completed cycles?".to_string(),
            Message::PromptMaxWearHours => "Maximum wear time per day (hours)".to_string(),
            Message::PromptRefreshInterval => "Countdown refresh interval (seconds)".to_string(),
            Message::PromptReminderTitle => "Reminder title".to_string(),
            Message::PromptReminderBody => "Reminder text".to_string(),
            Message::PromptReminderAlignToDay => "Fire reminders at midnight of the due day?".to_string(),
            Message::PromptBrandsFile => "Path to a brands CSV file (leave empty for none)".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending database migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationFailed(version, error) => format!("✗ Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All database migrations completed successfully".to_string(),
            Message::DatabaseUpToDate => "Database schema is up to date".to_string(),
        };

        write!(f, "{}", text)
    }
}
