use crate::db::kv::SqliteStore;
use crate::libs::cycle::local_now;
use crate::libs::messages::Message;
use crate::libs::reminder::StoredReminders;
use crate::libs::view::View;
use crate::{msg_info, msg_success};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct RemindersArgs {
    #[arg(long, short, help = "Include reminders that already fired")]
    all: bool,

    #[arg(long, help = "Delete reminders that already fired")]
    prune: bool,
}

pub async fn cmd(args: RemindersArgs) -> Result<()> {
    let mut reminders = StoredReminders::new(SqliteStore::new()?);
    let now = local_now();

    if args.prune {
        let removed = reminders.prune(now)?;
        msg_success!(Message::RemindersPruned(removed));
    }

    let list = if args.all { reminders.all() } else { reminders.upcoming(now) };
    if list.is_empty() {
        msg_info!(Message::RemindersEmpty);
        return Ok(());
    }
    View::reminders(&list)?;

    Ok(())
}
