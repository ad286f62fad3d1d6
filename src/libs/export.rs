//! Export of archived wear intervals.
//!
//! Writes the history of a tracker to CSV or JSON so it can be opened in a
//! spreadsheet or processed elsewhere. Each row carries the sequential id,
//! formatted start and end, and the `HH:MM` duration.
//!
//! Without an explicit output path the file is written to the current
//! directory as `lenslog_<scope>_<YYYYMMDD_HHMMSS>.<ext>`.

use crate::libs::cycle::CompletedInterval;
use crate::libs::formatter::FormattedInterval;
use anyhow::Result;
use chrono::Local;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// Pretty-printed array of interval objects.
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Creates an exporter. `scope` names the history in the default file name.
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>, scope: &str) -> Self {
        let output_path = output_path.unwrap_or_else(|| {
            let timestamp = Local::now().format("%Y%m%d_%H%M%S");
            PathBuf::from(format!("lenslog_{}_{}.{}", scope, timestamp, format.extension()))
        });

        Self { format, output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Writes `history` and returns the path written to.
    pub fn export_history(&self, history: &[CompletedInterval]) -> Result<PathBuf> {
        let rows = FormattedInterval::from_history(history);
        match self.format {
            ExportFormat::Csv => self.export_history_csv(&rows)?,
            ExportFormat::Json => self.export_history_json(&rows)?,
        }
        Ok(self.output_path.clone())
    }

    fn export_history_csv(&self, rows: &[FormattedInterval]) -> Result<()> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;
        wtr.write_record(["ID", "Start", "End", "Duration"])?;
        for row in rows {
            wtr.write_record([row.id.to_string(), row.start.clone(), row.end.clone(), row.duration.clone()])?;
        }
        wtr.flush()?;
        Ok(())
    }

    fn export_history_json(&self, rows: &[FormattedInterval]) -> Result<()> {
        let json = serde_json::to_string_pretty(rows)?;
        File::create(&self.output_path)?.write_all(json.as_bytes())?;
        Ok(())
    }
}
