//! Wear/replacement cycle model.
//!
//! A cycle is one period of lens use: either a single wear session (lenses
//! in, lenses out) or the lifetime of one pair before it must be replaced.
//! Everything derived from a cycle (time left, days left, progress) is a pure
//! function of its start time, its nominal duration and the current time, so
//! values stay consistent across restarts and across refresh ticks.
//!
//! ## Time left and days left
//!
//! [`remaining`] is exact: the duration from `now` to `start + nominal`,
//! clamped at zero. [`days_remaining`] works on calendar dates instead, so a
//! pair that is due tomorrow afternoon reads "1 day" all of today, whatever
//! the hour. It never reports zero while time is still left, and never
//! reports a negative count once the cycle has run out.
//!
//! Due times saturate at the edge of the representable date range instead of
//! overflowing, so a damaged start time can only make a cycle look very long.

use chrono::{Duration, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Replacement schedule of a lens type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LensKind {
    #[default]
    Daily,
    Monthly,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown lens kind '{0}', expected 'daily' or 'monthly'")]
pub struct UnknownLensKind(pub String);

impl LensKind {
    /// Days a pair of this kind may be used.
    pub fn duration_days(self) -> u32 {
        match self {
            LensKind::Daily => 1,
            LensKind::Monthly => 30,
        }
    }

    pub fn nominal_duration(self) -> Duration {
        Duration::days(self.duration_days() as i64)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LensKind::Daily => "Daily",
            LensKind::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for LensKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LensKind {
    type Err = UnknownLensKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "d" => Ok(LensKind::Daily),
            "monthly" | "m" => Ok(LensKind::Monthly),
            other => Err(UnknownLensKind(other.to_string())),
        }
    }
}

/// Snapshot of one active or completed cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LensCycle {
    pub start_time: NaiveDateTime,
    pub kind: LensKind,
    /// Nominal length of the cycle, resolved from the tracker role.
    pub nominal: Duration,
    pub pairs_remaining: u32,
    pub is_active: bool,
}

impl LensCycle {
    /// When the cycle runs out.
    pub fn due_at(&self) -> NaiveDateTime {
        due_at(self.start_time, self.nominal)
    }

    pub fn remaining(&self, now: NaiveDateTime) -> Duration {
        remaining(self.start_time, self.nominal, now)
    }

    pub fn days_remaining(&self, now: NaiveDateTime) -> i64 {
        days_remaining(self.start_time, self.nominal, now)
    }

    pub fn elapsed(&self, now: NaiveDateTime) -> Duration {
        (now - self.start_time).max(Duration::zero())
    }

    /// Fraction of the nominal duration already used, in `0.0..=1.0`.
    pub fn progress(&self, now: NaiveDateTime) -> f64 {
        let total = self.nominal.num_seconds();
        if total <= 0 {
            return 1.0;
        }
        (self.elapsed(now).num_seconds() as f64 / total as f64).clamp(0.0, 1.0)
    }
}

/// One archived cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletedInterval {
    pub start: NaiveDateTime,
    pub duration: Duration,
}

impl CompletedInterval {
    pub fn end(&self) -> NaiveDateTime {
        due_at(self.start, self.duration)
    }
}

/// `start + nominal`, saturating at the end of the representable range.
pub fn due_at(start: NaiveDateTime, nominal: Duration) -> NaiveDateTime {
    start.checked_add_signed(nominal).unwrap_or(if nominal < Duration::zero() {
        NaiveDateTime::MIN
    } else {
        NaiveDateTime::MAX
    })
}

/// Exact time left: `max(0, start + nominal - now)`.
pub fn remaining(start: NaiveDateTime, nominal: Duration, now: NaiveDateTime) -> Duration {
    (due_at(start, nominal) - now).max(Duration::zero())
}

/// Calendar days from `now` to the due date, never negative.
///
/// Counted on date boundaries rather than in 24 hour steps. While any time is
/// left the due day itself still counts, so the result only reaches zero once
/// the cycle has run out:
///
/// ```rust
/// use chrono::{Duration, NaiveDate};
/// use lenslog::libs::cycle::days_remaining;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// let nominal = Duration::days(30);
/// assert_eq!(days_remaining(start, nominal, start + Duration::days(29) + Duration::hours(23)), 1);
/// assert_eq!(days_remaining(start, nominal, start + Duration::days(30) + Duration::hours(1)), 0);
/// ```
pub fn days_remaining(start: NaiveDateTime, nominal: Duration, now: NaiveDateTime) -> i64 {
    if remaining(start, nominal, now) <= Duration::zero() {
        return 0;
    }
    (due_at(start, nominal).date() - now.date()).num_days().max(1)
}

/// Drops sub-second precision; persisted timestamps are whole seconds.
pub fn truncate_to_seconds(time: NaiveDateTime) -> NaiveDateTime {
    time.with_nanosecond(0).unwrap_or(time)
}

/// Current local wall-clock time, truncated to whole seconds.
pub fn local_now() -> NaiveDateTime {
    truncate_to_seconds(chrono::Local::now().naive_local())
}
