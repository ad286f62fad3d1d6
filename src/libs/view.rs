//! Table output for the CLI.
//!
//! Each function renders one screen with `prettytable` and prints it to
//! stdout. Values are formatted through [`crate::libs::formatter`] so that
//! tables and exports show the same strings. Time-dependent columns (worn
//! time, share of the cycle used, time or days left) are computed from the
//! `now` passed in, never from the system clock, which keeps the output of
//! one command consistent with its messages.
//!
//! | Function | Shows |
//! |---|---|
//! | [`View::wear`] | the running wear session against the wear budget |
//! | [`View::pair`] | the open pair, its replacement date and the inventory |
//! | [`View::history`] | archived cycles, oldest first |
//! | [`View::prescription`] | per-eye values side by side and the expiration |
//! | [`View::reminders`] | pending replacement reminders |
//! | [`View::brands`] | the brand catalog |

use super::cycle::{CompletedInterval, LensCycle, LensKind};
use super::formatter::{format_days, format_duration, format_hours_minutes, format_progress, FormattedInterval, DATE_FORMAT, DATE_TIME_FORMAT};
use super::prescription::{EyeSide, Prescription, PrescriptionField};
use super::reminder::Reminder;
use anyhow::Result;
use chrono::NaiveDateTime;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn wear(cycle: &LensCycle, now: NaiveDateTime) -> Result<()> {
        let mut table = Table::new();
        let remaining = cycle.remaining(now);

        table.add_row(row!["IN SINCE", "WORN", "MAX WEAR", "USED", "REMAINING"]);
        table.add_row(row![
            cycle.start_time.format(DATE_TIME_FORMAT),
            format_duration(&cycle.elapsed(now)),
            format_duration(&cycle.nominal),
            format_progress(cycle.progress(now)),
            format_hours_minutes(&remaining)
        ]);
        table.printstd();

        Ok(())
    }

    pub fn pair(cycle: Option<&LensCycle>, kind: LensKind, pairs_remaining: u32, now: NaiveDateTime) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["TYPE", "OPENED", "REPLACE BY", "USED", "DAYS LEFT", "PAIRS LEFT"]);
        match cycle {
            Some(cycle) => table.add_row(row![
                kind,
                cycle.start_time.format(DATE_FORMAT),
                cycle.due_at().format(DATE_FORMAT),
                format_progress(cycle.progress(now)),
                format_days(cycle.days_remaining(now)),
                pairs_remaining
            ]),
            None => table.add_row(row![kind, "-", "-", "-", "-", pairs_remaining]),
        };
        table.printstd();

        Ok(())
    }

    pub fn history(history: &[CompletedInterval]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "START", "END", "DURATION"]);
        for interval in FormattedInterval::from_history(history) {
            table.add_row(row![interval.id, interval.start, interval.end, interval.duration]);
        }
        table.printstd();

        Ok(())
    }

    pub fn prescription(prescription: &Prescription) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["", "RIGHT (OD)", "LEFT (OS)"]);
        for field in PrescriptionField::ALL {
            let value = |side: EyeSide| prescription.eye(side).get(field).cloned().unwrap_or_else(|| "-".to_string());
            table.add_row(row![field.label(), value(EyeSide::Right), value(EyeSide::Left)]);
        }
        let expiration = prescription
            .expiration
            .map(|date| date.format(DATE_FORMAT).to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(row!["Expires", H2 -> expiration]);
        table.printstd();

        Ok(())
    }

    pub fn reminders(reminders: &[Reminder]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["AT", "TITLE", "TEXT"]);
        for reminder in reminders {
            table.add_row(row![reminder.at.format(DATE_TIME_FORMAT), reminder.title, reminder.body]);
        }
        table.printstd();

        Ok(())
    }

    pub fn brands(brands: &[String]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["#", "BRAND"]);
        for (index, brand) in brands.iter().enumerate() {
            table.add_row(row![index + 1, brand]);
        }
        table.printstd();

        Ok(())
    }
}
