//! Lifecycle of a single wear or replacement cycle.
//!
//! [`WearCycleTracker`] owns exactly one cycle at a time and the bookkeeping
//! around it: pair inventory, the archive of completed cycles and the
//! replacement reminder. Two roles share the implementation:
//!
//! - [`TrackerRole::WearSession`] times one wear session against a fixed
//!   budget (16 hours by default) and never touches inventory
//! - [`TrackerRole::PairLifetime`] counts down the days a pair may be used,
//!   according to its [`LensKind`]
//!
//! Every mutation builds the next state, persists it as one batch, and only
//! then replaces the in-memory state. A failed write leaves the tracker as it
//! was before the call.
//!
//! ```rust
//! use lenslog::libs::cycle::LensKind;
//! use lenslog::libs::reminder::NoReminders;
//! use lenslog::libs::store::MemoryStore;
//! use lenslog::libs::tracker::{TrackerRole, TrackerSettings, WearCycleTracker};
//!
//! let mut tracker = WearCycleTracker::open(MemoryStore::new(), NoReminders, TrackerRole::PairLifetime, TrackerSettings::default());
//! tracker.add_pairs(6).unwrap();
//! let cycle = tracker.activate_next_pair(chrono::Local::now().naive_local(), Some(LensKind::Monthly)).unwrap();
//! assert_eq!(cycle.pairs_remaining, 5);
//! ```

use crate::libs::config::{Config, TrackerConfig};
use crate::libs::cycle::{local_now, truncate_to_seconds, CompletedInterval, LensCycle, LensKind};
use crate::libs::messages::Message;
use crate::libs::reminder::{NoReminders, ReminderPolicy, ReminderScheduler};
use crate::libs::state::{cycle_state_writes, load_cycle_state_with, CycleKeys, CycleState};
use crate::libs::store::{PersistenceAdapter, StoreError};
use crate::{msg_debug, msg_error, msg_warning};
use chrono::{Duration, NaiveDateTime};
use thiserror::Error;

/// Default wear budget of a wear session.
pub const DEFAULT_MAX_WEAR_HOURS: u64 = 16;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("no cycle is currently active")]
    NoActiveCycle,
    #[error("no unopened pairs are left")]
    NoPairsAvailable,
    #[error("a cycle is already active since {0}")]
    CycleAlreadyActive(NaiveDateTime),
    #[error("end time {end} is before start time {start}")]
    EndBeforeStart { start: NaiveDateTime, end: NaiveDateTime },
    #[error("wear sessions do not track pair inventory")]
    InventoryNotTracked,
    #[error("failed to save tracker state: {0}")]
    Persistence(#[from] StoreError),
}

/// What a tracker instance models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerRole {
    WearSession { max_wear: Duration },
    PairLifetime,
}

impl TrackerRole {
    /// Wear session role with a budget of `max_wear_hours`. An out-of-range
    /// budget falls back to [`DEFAULT_MAX_WEAR_HOURS`].
    pub fn wear_session(max_wear_hours: u64) -> Self {
        let max_wear = i64::try_from(max_wear_hours).ok().and_then(Duration::try_hours);
        TrackerRole::WearSession {
            max_wear: max_wear.unwrap_or_else(|| {
                msg_warning!(Message::MaxWearOutOfRange(max_wear_hours, DEFAULT_MAX_WEAR_HOURS));
                Duration::hours(DEFAULT_MAX_WEAR_HOURS as i64)
            }),
        }
    }

    /// Storage namespace, so both roles can share one store.
    pub fn namespace(&self) -> &'static str {
        match self {
            TrackerRole::WearSession { .. } => "wear",
            TrackerRole::PairLifetime => "pair",
        }
    }

    pub fn nominal_duration(&self, kind: LensKind) -> Duration {
        match self {
            TrackerRole::WearSession { max_wear } => *max_wear,
            TrackerRole::PairLifetime => kind.nominal_duration(),
        }
    }

    pub fn tracks_inventory(&self) -> bool {
        matches!(self, TrackerRole::PairLifetime)
    }
}

impl Default for TrackerRole {
    fn default() -> Self {
        TrackerRole::wear_session(DEFAULT_MAX_WEAR_HOURS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerSettings {
    /// Whether resetting the current pair's clock uses up a pair from inventory.
    pub reset_consumes_inventory: bool,
    /// Whether closed cycles are archived.
    pub history_enabled: bool,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        TrackerConfig::default().into()
    }
}

impl From<TrackerConfig> for TrackerSettings {
    fn from(config: TrackerConfig) -> Self {
        Self {
            reset_consumes_inventory: config.reset_consumes_inventory,
            history_enabled: config.history_enabled,
        }
    }
}

pub struct WearCycleTracker<S: PersistenceAdapter, R: ReminderScheduler = NoReminders> {
    store: S,
    scheduler: R,
    role: TrackerRole,
    settings: TrackerSettings,
    policy: ReminderPolicy,
    keys: CycleKeys,
    state: CycleState,
}

impl<S: PersistenceAdapter, R: ReminderScheduler> WearCycleTracker<S, R> {
    /// Restores the tracker from `store`. Missing or corrupt values fall back to defaults.
    pub fn open(store: S, scheduler: R, role: TrackerRole, settings: TrackerSettings) -> Self {
        let keys = CycleKeys::new(role.namespace());
        let state = load_cycle_state_with(&store, &keys, |kind| role.nominal_duration(kind));
        msg_debug!(format!(
            "Restored {} tracker: active={}, pairs={}, history={}",
            role.namespace(),
            state.active,
            state.pairs_remaining,
            state.history.len()
        ));

        Self {
            store,
            scheduler,
            role,
            settings,
            policy: ReminderPolicy::default(),
            keys,
            state,
        }
    }

    /// Opens a tracker with settings and reminder policy taken from `config`.
    pub fn from_config(store: S, scheduler: R, role: TrackerRole, config: &Config) -> Self {
        Self::open(store, scheduler, role, config.tracker.clone().unwrap_or_default().into())
            .with_reminder_policy(config.reminder.clone().unwrap_or_default().into())
    }

    pub fn with_reminder_policy(mut self, policy: ReminderPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn role(&self) -> TrackerRole {
        self.role
    }

    pub fn settings(&self) -> TrackerSettings {
        self.settings
    }

    pub fn kind(&self) -> LensKind {
        self.state.kind
    }

    pub fn pairs_remaining(&self) -> u32 {
        self.state.pairs_remaining
    }

    pub fn is_active(&self) -> bool {
        self.active_start().is_some()
    }

    /// When the last cycle was closed, if ever.
    pub fn last_end(&self) -> Option<NaiveDateTime> {
        self.state.last_end
    }

    pub fn history(&self) -> &[CompletedInterval] {
        &self.state.history
    }

    pub fn scheduler(&self) -> &R {
        &self.scheduler
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn nominal_duration(&self) -> Duration {
        self.role.nominal_duration(self.state.kind)
    }

    /// The active cycle, if any.
    pub fn cycle(&self) -> Option<LensCycle> {
        self.active_start().map(|start| self.snapshot(start))
    }

    /// Exact time left in the active cycle; zero when nothing is active.
    pub fn remaining(&self, now: NaiveDateTime) -> Duration {
        self.cycle().map_or_else(Duration::zero, |cycle| cycle.remaining(now))
    }

    /// Calendar days left in the active cycle; zero when nothing is active.
    pub fn days_remaining(&self, now: NaiveDateTime) -> i64 {
        self.cycle().map_or(0, |cycle| cycle.days_remaining(now))
    }

    /// Opens a new cycle starting at `start`, or now.
    ///
    /// Fails with [`TrackerError::CycleAlreadyActive`] if one is open; use
    /// [`Self::reset_current_cycle`] to replace it.
    pub fn start_cycle(&mut self, start: Option<NaiveDateTime>, kind: LensKind) -> Result<LensCycle, TrackerError> {
        if let Some(active) = self.active_start() {
            return Err(TrackerError::CycleAlreadyActive(active));
        }

        let start = start.map(truncate_to_seconds).unwrap_or_else(local_now);
        let mut next = self.state.clone();
        Self::open_into(&mut next, start, kind);
        self.commit(next)?;

        msg_debug!(format!("Started {} cycle at {}", self.role.namespace(), start));
        Ok(self.snapshot(start))
    }

    /// Closes the active cycle at `end`, or now, and archives it.
    pub fn close_cycle(&mut self, end: Option<NaiveDateTime>) -> Result<CompletedInterval, TrackerError> {
        let start = self.active_start().ok_or(TrackerError::NoActiveCycle)?;
        let end = end.map(truncate_to_seconds).unwrap_or_else(local_now);
        if end < start {
            return Err(TrackerError::EndBeforeStart { start, end });
        }

        let mut next = self.state.clone();
        let interval = self.close_into(&mut next, start, end);
        self.commit(next)?;

        msg_debug!(format!("Closed {} cycle after {} minutes", self.role.namespace(), interval.duration.num_minutes()));
        Ok(interval)
    }

    /// Takes a pair out of inventory and starts its lifetime at `now`.
    ///
    /// Any open cycle is archived first. `kind` switches the lens type for the
    /// new pair; `None` keeps the current one.
    pub fn activate_next_pair(&mut self, now: NaiveDateTime, kind: Option<LensKind>) -> Result<LensCycle, TrackerError> {
        self.require_inventory()?;
        if self.state.pairs_remaining == 0 {
            return Err(TrackerError::NoPairsAvailable);
        }

        let now = truncate_to_seconds(now);
        let mut next = self.state.clone();
        if let Some(start) = self.active_start() {
            self.close_into(&mut next, start, now.max(start));
        }
        next.pairs_remaining -= 1;
        Self::open_into(&mut next, now, kind.unwrap_or(self.state.kind));
        self.commit(next)?;

        self.schedule_replacement(now);
        Ok(self.snapshot(now))
    }

    /// Restarts the current pair's clock at `now`.
    ///
    /// Consumes a pair only when the role tracks inventory and
    /// `reset_consumes_inventory` is set.
    pub fn reset_current_cycle(&mut self, now: NaiveDateTime) -> Result<LensCycle, TrackerError> {
        let consumes = self.role.tracks_inventory() && self.settings.reset_consumes_inventory;
        if consumes && self.state.pairs_remaining == 0 {
            return Err(TrackerError::NoPairsAvailable);
        }

        let now = truncate_to_seconds(now);
        let mut next = self.state.clone();
        if let Some(start) = self.active_start() {
            self.close_into(&mut next, start, now.max(start));
        }
        if consumes {
            next.pairs_remaining -= 1;
        }
        Self::open_into(&mut next, now, self.state.kind);
        self.commit(next)?;

        if self.role.tracks_inventory() {
            self.schedule_replacement(now);
        }
        Ok(self.snapshot(now))
    }

    /// Adds unopened pairs to inventory. Returns the new count.
    pub fn add_pairs(&mut self, count: u32) -> Result<u32, TrackerError> {
        self.require_inventory()?;

        let mut next = self.state.clone();
        next.pairs_remaining = next.pairs_remaining.saturating_add(count);
        self.commit(next)?;
        Ok(self.state.pairs_remaining)
    }

    /// Changes the lens kind. An active cycle keeps its start; its due date moves.
    pub fn set_kind(&mut self, kind: LensKind) -> Result<(), TrackerError> {
        if kind == self.state.kind {
            return Ok(());
        }

        let mut next = self.state.clone();
        next.kind = kind;
        self.commit(next)?;

        if let Some(start) = self.active_start().filter(|_| self.role.tracks_inventory()) {
            self.schedule_replacement(start);
        }
        Ok(())
    }

    fn active_start(&self) -> Option<NaiveDateTime> {
        self.state.start.filter(|_| self.state.active)
    }

    fn snapshot(&self, start: NaiveDateTime) -> LensCycle {
        LensCycle {
            start_time: start,
            kind: self.state.kind,
            nominal: self.nominal_duration(),
            pairs_remaining: self.state.pairs_remaining,
            is_active: true,
        }
    }

    fn require_inventory(&self) -> Result<(), TrackerError> {
        if self.role.tracks_inventory() {
            Ok(())
        } else {
            Err(TrackerError::InventoryNotTracked)
        }
    }

    fn open_into(next: &mut CycleState, start: NaiveDateTime, kind: LensKind) {
        next.active = true;
        next.start = Some(start);
        next.kind = kind;
    }

    fn close_into(&self, next: &mut CycleState, start: NaiveDateTime, end: NaiveDateTime) -> CompletedInterval {
        let interval = CompletedInterval {
            start,
            duration: end - start,
        };
        if self.settings.history_enabled {
            next.history.push(interval);
        }
        next.active = false;
        next.start = None;
        next.last_end = Some(end);
        interval
    }

    /// Persists `next` as one batch and adopts it only if the write succeeded.
    fn commit(&mut self, next: CycleState) -> Result<(), TrackerError> {
        let ops = cycle_state_writes(&self.keys, &next);
        if let Err(e) = self.store.apply(&ops) {
            msg_error!(Message::StateWriteFailed(e.to_string()));
            return Err(e.into());
        }
        self.state = next;
        Ok(())
    }

    /// The cycle is already committed, so a scheduling failure is only reported.
    fn schedule_replacement(&mut self, start: NaiveDateTime) {
        let reminder = self.policy.reminder(start, self.nominal_duration());
        msg_debug!(format!("Scheduling replacement reminder for {}", reminder.at));
        if let Err(e) = self.scheduler.schedule(reminder) {
            msg_warning!(Message::ReminderScheduleFailed(e.to_string()));
        }
    }
}
