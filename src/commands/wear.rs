use super::wear_tracker;
use crate::libs::config::Config;
use crate::libs::cycle::local_now;
use crate::libs::formatter::{format_hours_minutes, DATE_TIME_FORMAT};
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_error_anyhow, msg_info, msg_success, msg_warning};
use anyhow::Result;
use chrono::{Local, NaiveDateTime, NaiveTime};
use clap::Args;

#[derive(Debug, Args)]
pub struct AtArgs {
    #[arg(long, help = "Time of day (HH:MM) instead of now")]
    at: Option<String>,
}

pub async fn on(args: AtArgs) -> Result<()> {
    let config = Config::read()?;
    let mut tracker = wear_tracker(&config)?;

    let kind = tracker.kind();
    let cycle = tracker.start_cycle(parse_at(args.at.as_deref())?, kind)?;

    msg_success!(Message::WearStarted(cycle.start_time.format(DATE_TIME_FORMAT).to_string()));
    msg_info!(Message::WearRemaining(format_hours_minutes(&cycle.remaining(local_now()))));
    Ok(())
}

pub async fn off(args: AtArgs) -> Result<()> {
    let config = Config::read()?;
    let mut tracker = wear_tracker(&config)?;

    let interval = tracker.close_cycle(parse_at(args.at.as_deref())?)?;

    msg_success!(Message::WearEnded(format_hours_minutes(&interval.duration)));
    Ok(())
}

pub async fn status() -> Result<()> {
    let config = Config::read()?;
    let tracker = wear_tracker(&config)?;
    let now = local_now();

    let Some(cycle) = tracker.cycle() else {
        msg_info!(Message::WearNotActive);
        return Ok(());
    };

    View::wear(&cycle, now)?;
    let overdue = cycle.elapsed(now) - cycle.nominal;
    if overdue > chrono::Duration::zero() {
        msg_warning!(Message::WearOverdue(format_hours_minutes(&overdue)));
    }
    Ok(())
}

/// Parses `HH:MM` as a time today.
pub fn parse_at(at: Option<&str>) -> Result<Option<NaiveDateTime>> {
    at.map(|input| {
        NaiveTime::parse_from_str(input.trim(), "%H:%M")
            .map(|time| Local::now().date_naive().and_time(time))
            .map_err(|_| msg_error_anyhow!(Message::InvalidTimeFormat(input.to_string())))
    })
    .transpose()
}
