//! `lenslog pair`: pair inventory and replacement cycle.

use super::pair_tracker;
use crate::libs::config::Config;
use crate::libs::cycle::{local_now, LensKind};
use crate::libs::formatter::{format_days, DATE_FORMAT};
use crate::libs::messages::Message;
use crate::libs::tracker::TrackerError;
use crate::libs::view::View;
use crate::{msg_bail_anyhow, msg_info, msg_success, msg_warning};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct PairArgs {
    #[command(subcommand)]
    command: Option<PairCommand>,
}

#[derive(Debug, Subcommand)]
enum PairCommand {
    #[command(about = "Show the current pair and inventory (default)")]
    Status,
    #[command(about = "Add unopened pairs to inventory")]
    Add {
        #[arg(long, short, default_value_t = 1)]
        count: u32,
    },
    #[command(about = "Open the next pair from inventory")]
    Activate {
        #[arg(long, short, help = "Lens type of the new pair (daily or monthly)")]
        kind: Option<LensKind>,
    },
    #[command(about = "Restart the current pair's clock")]
    Reset {
        #[arg(long, short, help = "Skip the confirmation prompt")]
        yes: bool,
    },
    #[command(about = "Change the lens type")]
    Kind { kind: LensKind },
}

pub async fn cmd(args: PairArgs) -> Result<()> {
    let config = Config::read()?;
    let mut tracker = pair_tracker(&config)?;
    let now = local_now();

    match args.command.unwrap_or(PairCommand::Status) {
        PairCommand::Status => {
            let cycle = tracker.cycle();
            View::pair(cycle.as_ref(), tracker.kind(), tracker.pairs_remaining(), now)?;
            match cycle {
                Some(cycle) if cycle.remaining(now) <= chrono::Duration::zero() => msg_warning!(Message::PairExpired),
                Some(cycle) => msg_info!(Message::PairDaysRemaining(format_days(cycle.days_remaining(now)))),
                None => msg_info!(Message::PairNotActive),
            }
            if tracker.pairs_remaining() == 0 {
                msg_info!(Message::NoPairsHint);
            }
        }
        PairCommand::Add { count } => {
            let total = tracker.add_pairs(count)?;
            msg_success!(Message::PairsAdded(count, total));
        }
        PairCommand::Activate { kind } => match tracker.activate_next_pair(now, kind) {
            Ok(cycle) => msg_success!(Message::PairActivated(
                cycle.kind.to_string(),
                cycle.due_at().format(DATE_FORMAT).to_string()
            )),
            Err(TrackerError::NoPairsAvailable) => msg_bail_anyhow!(Message::NoPairsHint),
            Err(e) => return Err(e.into()),
        },
        PairCommand::Reset { yes } => {
            let consumes = tracker.settings().reset_consumes_inventory;
            if consumes && tracker.pairs_remaining() == 0 {
                msg_bail_anyhow!(Message::NoPairsHint);
            }
            let prompt = if consumes {
                Message::ConfirmPairResetConsumes(tracker.pairs_remaining() - 1)
            } else {
                Message::ConfirmPairReset
            };
            if !yes {
                let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(prompt.to_string())
                    .default(false)
                    .interact()?;
                if !confirmed {
                    msg_info!(Message::OperationCancelled);
                    return Ok(());
                }
            }
            let cycle = tracker.reset_current_cycle(now)?;
            msg_success!(Message::PairReset(cycle.due_at().format(DATE_FORMAT).to_string()));
        }
        PairCommand::Kind { kind } => {
            if kind == tracker.kind() {
                msg_info!(Message::LensKindUnchanged(kind.to_string()));
            } else {
                tracker.set_kind(kind)?;
                msg_success!(Message::LensKindChanged(kind.to_string()));
            }
        }
    }

    Ok(())
}
