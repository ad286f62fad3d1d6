//! `lenslog watch`: live countdown of the active cycle.
//!
//! Prints the time (or days) left at the configured refresh interval until
//! the cycle runs out or Ctrl-C is pressed.

use super::tracker_for;
use crate::libs::config::Config;
use crate::libs::cycle::local_now;
use crate::libs::formatter::{format_days, format_hours_minutes};
use crate::libs::messages::Message;
use crate::libs::refresh::{countdown, Ended, RefreshTask};
use crate::{msg_info, msg_print, msg_success, msg_warning};
use anyhow::Result;
use clap::Args;
use std::time::Duration;

#[derive(Debug, Args)]
pub struct WatchArgs {
    #[arg(long, short, help = "Count down the current pair instead of the wear session")]
    pairs: bool,
}

pub async fn cmd(args: WatchArgs) -> Result<()> {
    let config = Config::read()?;
    let tracker = tracker_for(args.pairs, &config)?;
    let namespace = tracker.role().namespace();

    let Some(cycle) = tracker.cycle() else {
        msg_info!(Message::WatchNothingActive);
        return Ok(());
    };
    drop(tracker);

    let period = Duration::from_secs(config.wear().refresh_interval.max(1));
    let pairs = args.pairs;
    let render = move |left: chrono::Duration| {
        if pairs {
            msg_print!(Message::PairDaysRemaining(format_days(cycle.days_remaining(local_now()))));
        } else {
            msg_print!(Message::WearRemaining(format_hours_minutes(&left)));
        }
    };

    msg_info!(Message::WatchStarted(namespace.to_string()));
    let task = RefreshTask::spawn(period, countdown(cycle, local_now, render));

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            msg_warning!(Message::WatchCtrlCListenFailed(e.to_string()));
            std::future::pending::<()>().await;
        }
    };

    match task.run_until(shutdown).await {
        Ended::Finished(_) => msg_success!(Message::WatchCycleDue),
        Ended::Stopped(ticks) => msg_info!(Message::WatchStopped(ticks)),
    }
    Ok(())
}
