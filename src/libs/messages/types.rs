//! The [`Message`] catalog.
//!
//! Variants are grouped by the command area that emits them. Payloads carry
//! already formatted values (times, durations, paths) so the display text in
//! [`super::display`] stays free of formatting logic.

#[derive(Debug, Clone)]
pub enum Message {
    // === WEAR SESSION MESSAGES ===
    WearStarted(String),     // start time
    WearEnded(String),       // worn duration
    WearNotActive,
    WearOverdue(String),     // overdue by
    WearRemaining(String),   // time left
    InvalidTimeFormat(String),

    // === PAIR MESSAGES ===
    PairsAdded(u32, u32),       // added, total
    PairActivated(String, String), // kind, due date
    PairReset(String),          // due date
    PairNotActive,
    PairExpired,
    PairDaysRemaining(String),  // "N days"
    PairsInInventory(u32),
    NoPairsHint,
    LensKindChanged(String),
    LensKindUnchanged(String),
    ConfirmPairReset,
    ConfirmPairResetConsumes(u32), // pairs left after reset
    OperationCancelled,

    // === HISTORY MESSAGES ===
    HistoryEmpty,
    HistoryDisabled,
    HistoryExported(String), // path

    // === PRESCRIPTION MESSAGES ===
    PrescriptionSaved,
    PrescriptionEmpty,
    PrescriptionNothingToSet,
    PrescriptionExpired(String),          // date
    PrescriptionExpiresIn(String, i64),   // date, days
    PrescriptionImageAttached(String),
    PrescriptionImageCleared,
    PrescriptionImage(String),
    InvalidDateFormat(String),
    BrandsFileNotConfigured,
    BrandsEmpty,
    BrandsLoadFailed(String),

    // === REMINDER MESSAGES ===
    RemindersEmpty,
    RemindersPruned(usize),
    ReminderScheduleFailed(String),

    // === WATCH MESSAGES ===
    WatchStarted(String), // tracker namespace
    WatchStopped(u64),    // ticks
    WatchCycleDue,
    WatchNothingActive,
    WatchCtrlCListenFailed(String),

    // === STATE MESSAGES ===
    StoreReadFailed { key: String, reason: String },
    StoredValueCorrupt { key: String, reason: String },
    InconsistentCycleState(String), // key
    StateWriteFailed(String),

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    MaxWearOutOfRange(u64, u64), // configured, fallback hours
    ConfigModuleTracker,
    ConfigModuleWear,
    ConfigModuleReminder,
    PromptSelectModules,
    PromptResetConsumesInventory,
    PromptHistoryEnabled,
    PromptMaxWearHours,
    PromptRefreshInterval,
    PromptReminderTitle,
    PromptReminderBody,
    PromptReminderAlignToDay,
    PromptBrandsFile,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),        // count
    RunningMigration(u32, String), // version, name
    MigrationFailed(u32, String),  // version, error
    AllMigrationsCompleted,
    DatabaseUpToDate,
}
