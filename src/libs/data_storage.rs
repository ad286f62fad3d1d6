//! Platform-specific location of the lenslog data directory.
//!
//! The database and `config.json` both live here:
//! - **Windows**: `%LOCALAPPDATA%\lenslog\lenslog`
//! - **macOS**: `~/Library/Application Support/lenslog/lenslog`
//! - **Linux**: `~/.local/share/lenslog/lenslog`

use anyhow::Result;
use std::env::consts::OS;
use std::env::var;
use std::fs;
use std::path::{Path, PathBuf};

include!(concat!(env!("OUT_DIR"), "/app_metadata.rs"));

pub const VENDOR_NAME: &str = APP_METADATA_OWNER;
pub const APP_NAME: &str = APP_METADATA_NAME;

#[derive(Debug, Clone)]
pub struct DataStorage {
    base_path: PathBuf,
}

impl DataStorage {
    pub fn new() -> Self {
        let base_path = match OS {
            "windows" => var("LOCALAPPDATA").unwrap_or_else(|_| ".".into()),
            "macos" => var("HOME").unwrap_or_else(|_| ".".into()) + "/Library/Application Support",
            _ => var("HOME").unwrap_or_else(|_| ".".into()) + "/.local/share",
        };
        let base_path = Path::new(&base_path).join(VENDOR_NAME).join(APP_NAME);

        Self { base_path }
    }

    /// Uses an explicit directory instead of the platform default.
    pub fn with_base<P: Into<PathBuf>>(base_path: P) -> Self {
        Self { base_path: base_path.into() }
    }

    /// Resolves `file_name` inside the data directory, creating the directory on first use.
    pub fn get_path(&self, file_name: &str) -> Result<PathBuf> {
        if !self.base_path.exists() {
            fs::create_dir_all(&self.base_path)?;
        }
        Ok(self.base_path.join(file_name))
    }
}

impl Default for DataStorage {
    fn default() -> Self {
        Self::new()
    }
}
