//! Duration and interval formatting for display and export.
//!
//! - [`format_duration`] renders `HH:MM` (hours may exceed two digits)
//! - [`format_hours_minutes`] renders the countdown wording, `7 hours and 5 minutes`
//! - [`format_days`] renders a day count with the right plural
//! - [`format_progress`] renders the used share of a cycle as a whole percentage
//!
//! Negative durations are shown as zero.
//!
//! ```rust
//! use lenslog::libs::formatter::format_duration;
//! use chrono::Duration;
//!
//! assert_eq!(format_duration(&(Duration::hours(2) + Duration::minutes(30))), "02:30");
//! ```

use crate::libs::cycle::CompletedInterval;
use chrono::Duration;
use serde::{Deserialize, Serialize};

pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// An archived interval with every field pre-formatted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormattedInterval {
    pub id: usize,
    pub start: String,
    pub end: String,
    pub duration: String,
}

impl FormattedInterval {
    pub fn from_history(history: &[CompletedInterval]) -> Vec<FormattedInterval> {
        history
            .iter()
            .enumerate()
            .map(|(index, interval)| FormattedInterval {
                id: index + 1,
                start: interval.start.format(DATE_TIME_FORMAT).to_string(),
                end: interval.end().format(DATE_TIME_FORMAT).to_string(),
                duration: format_duration(&interval.duration),
            })
            .collect()
    }
}

pub fn format_duration(duration: &Duration) -> String {
    let hours = duration.num_hours();
    let mins = duration.num_minutes() % 60;
    format!("{:02}:{:02}", hours.max(0), mins.max(0))
}

pub fn format_hours_minutes(duration: &Duration) -> String {
    let total_minutes = duration.num_minutes().max(0);
    format!("{} hours and {} minutes", total_minutes / 60, total_minutes % 60)
}

pub fn format_days(days: i64) -> String {
    match days.max(0) {
        1 => "1 day".to_string(),
        n => format!("{n} days"),
    }
}

pub fn format_progress(progress: f64) -> String {
    format!("{:.0}%", (progress.clamp(0.0, 1.0) * 100.0).floor())
}
