//! Replacement reminder decisions.
//!
//! The tracker decides *when* a reminder should fire and hands a [`Reminder`]
//! to a [`ReminderScheduler`]. Delivery is up to the scheduler: the CLI keeps
//! them in the store ([`StoredReminders`]) and lists them on demand.
//!
//! A reminder is due when the cycle runs out. With `align_to_day` enabled in
//! the `reminder` config section it fires at midnight of the due date
//! instead, matching a calendar-style notification. Scheduling a reminder
//! under a title that is already pending replaces the pending one, so
//! resetting or swapping a pair never leaves a stale reminder behind.

use crate::libs::cycle;
use crate::libs::config::ReminderConfig;
use crate::libs::state::{load_reminders, reminders_write};
use crate::libs::store::{PersistenceAdapter, StoreError};
use chrono::{Duration, NaiveDateTime};

/// A fire-once alert at a wall-clock time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub at: NaiveDateTime,
    pub title: String,
    pub body: String,
}

pub trait ReminderScheduler {
    fn schedule(&mut self, reminder: Reminder) -> Result<(), StoreError>;
}

/// Discards every reminder.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoReminders;

impl ReminderScheduler for NoReminders {
    fn schedule(&mut self, _reminder: Reminder) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Collects reminders in memory.
impl ReminderScheduler for Vec<Reminder> {
    fn schedule(&mut self, reminder: Reminder) -> Result<(), StoreError> {
        self.push(reminder);
        Ok(())
    }
}

/// Decides when the replacement reminder fires and what it says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderPolicy {
    pub title: String,
    pub body: String,
    /// Fire at midnight of the due day instead of the exact due time.
    pub align_to_day: bool,
}

impl Default for ReminderPolicy {
    fn default() -> Self {
        ReminderConfig::default().into()
    }
}

impl From<ReminderConfig> for ReminderPolicy {
    fn from(config: ReminderConfig) -> Self {
        Self {
            title: config.title,
            body: config.body,
            align_to_day: config.align_to_day,
        }
    }
}

impl ReminderPolicy {
    pub fn due(&self, start: NaiveDateTime, nominal: Duration) -> NaiveDateTime {
        let due = cycle::due_at(start, nominal);
        if self.align_to_day {
            due.date().and_hms_opt(0, 0, 0).unwrap_or(due)
        } else {
            due
        }
    }

    pub fn reminder(&self, start: NaiveDateTime, nominal: Duration) -> Reminder {
        Reminder {
            at: self.due(start, nominal),
            title: self.title.clone(),
            body: self.body.clone(),
        }
    }
}

/// Scheduler that keeps pending reminders in a [`PersistenceAdapter`].
///
/// A newly scheduled reminder replaces any pending one with the same title.
pub struct StoredReminders<S: PersistenceAdapter> {
    store: S,
}

impl<S: PersistenceAdapter> StoredReminders<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All stored reminders ordered by fire time.
    pub fn all(&self) -> Vec<Reminder> {
        let mut reminders = load_reminders(&self.store);
        reminders.sort_by_key(|reminder| reminder.at);
        reminders
    }

    pub fn upcoming(&self, now: NaiveDateTime) -> Vec<Reminder> {
        self.all().into_iter().filter(|reminder| reminder.at > now).collect()
    }

    /// Drops reminders that already fired. Returns how many were removed.
    pub fn prune(&mut self, now: NaiveDateTime) -> Result<usize, StoreError> {
        let all = self.all();
        let upcoming: Vec<Reminder> = all.iter().filter(|reminder| reminder.at > now).cloned().collect();
        let removed = all.len() - upcoming.len();
        if removed > 0 {
            self.store.apply(&[reminders_write(&upcoming)])?;
        }
        Ok(removed)
    }
}

impl<S: PersistenceAdapter> ReminderScheduler for StoredReminders<S> {
    fn schedule(&mut self, reminder: Reminder) -> Result<(), StoreError> {
        let mut reminders: Vec<Reminder> = self.all().into_iter().filter(|pending| pending.title != reminder.title).collect();
        reminders.push(reminder);
        reminders.sort_by_key(|reminder| reminder.at);
        self.store.apply(&[reminders_write(&reminders)])
    }
}
