use super::tracker_for;
use crate::libs::config::Config;
use crate::libs::export::{ExportFormat, Exporter};
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_info, msg_success};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct HistoryArgs {
    #[arg(long, short, help = "Show replaced pairs instead of wear sessions")]
    pairs: bool,

    #[arg(long, short, value_enum, help = "Write the history to a file")]
    export: Option<ExportFormat>,

    #[arg(long, short, requires = "export", help = "Output file for --export")]
    output: Option<PathBuf>,
}

pub async fn cmd(args: HistoryArgs) -> Result<()> {
    let config = Config::read()?;
    if !config.tracker().history_enabled {
        msg_info!(Message::HistoryDisabled);
    }

    let tracker = tracker_for(args.pairs, &config)?;
    let history = tracker.history();

    if let Some(format) = args.export {
        let path = Exporter::new(format, args.output, tracker.role().namespace()).export_history(history)?;
        msg_success!(Message::HistoryExported(path.display().to_string()));
        return Ok(());
    }

    if history.is_empty() {
        msg_info!(Message::HistoryEmpty);
        return Ok(());
    }
    View::history(history)?;

    Ok(())
}
