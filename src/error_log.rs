//! Append-only local error log.
//!
//! Mail delivery problems have no other place to surface once the run is
//! over, so they are written here, one timestamped line per entry.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use log::{error, warn};

#[derive(Debug, Clone)]
pub struct ErrorLog {
    path: PathBuf,
}

impl ErrorLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `[YYYY-MM-DD HH:MM:SS] message` to the log file, creating it
    /// if needed. Line breaks in `message` are flattened so every entry
    /// stays on one line.
    pub fn append(&self, message: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let flattened = message.replace("\r\n", " | ").replace('\n', " | ");
        writeln!(file, "[{timestamp}] {flattened}")
    }

    /// Logs the message and appends it to the file. Failing to write the
    /// file is only reported through the logger.
    pub fn record(&self, message: &str) {
        error!("{message}");
        if let Err(e) = self.append(message) {
            warn!("Failed to write error log {:?}: {e}", self.path);
        }
    }
}

#[cfg(test)]
#[path = "error_log_tests.rs"]
mod tests;
