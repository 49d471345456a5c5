//! CSV processing for order uploads.
//!
//! # Module Structure
//!
//! - [`order_parser`] - Row parsing into [`OrderLine`]
//! - [`validator`] - Version consistency rules
//! - [`consolidator`] - Grouping lines into [`ConsolidatedOrder`]s
//!
//! # Example
//!
//! ```no_run
//! use veracore_order_upload::csv_processor::CsvProcessor;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let processor = CsvProcessor::new();
//!     let lines = processor.load_lines_from_csv("orders.csv").await?;
//!     let orders = processor.consolidate(&lines)?;
//!     println!("{} orders ready for submission", orders.len());
//!     Ok(())
//! }
//! ```

pub mod consolidator;
pub mod order_parser;
pub mod validator;

use log::{debug, info, warn};
use std::path::Path;

use crate::error::{Result, UploadError};
use crate::models::{ConsolidatedOrder, OrderLine, UploadSummaryRow, REQUIRED_HEADERS};

/// Loads, checks and consolidates order uploads.
#[derive(Default)]
pub struct CsvProcessor;

impl CsvProcessor {
    pub fn new() -> Self {
        debug!("Creating new CSV processor");
        Self
    }

    /// Loads order lines from a CSV file.
    ///
    /// # Errors
    /// I/O failures, missing headers, malformed rows or invalid quantities.
    pub async fn load_lines_from_csv<P: AsRef<Path>>(&self, file_path: P) -> Result<Vec<OrderLine>> {
        let path = file_path.as_ref();
        info!("Loading order lines from CSV file: {path:?}");

        let file_content = tokio::fs::read_to_string(path).await?;

        debug!("CSV file size: {} bytes", file_content.len());
        self.parse_csv_content(&file_content)
    }

    /// Parses comma-separated CSV content with a header row.
    ///
    /// The header check runs before any data row is read. Rows shorter than
    /// the header are accepted and their missing cells read as empty.
    pub fn parse_csv_content(&self, content: &str) -> Result<Vec<OrderLine>> {
        debug!("Starting CSV content parsing");
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        debug!("Header line: {headers:?}");

        let missing = missing_headers(&headers);
        if !missing.is_empty() {
            warn!("CSV is missing headers: {missing:?}");
            return Err(UploadError::MissingHeaders(missing));
        }

        order_parser::parse_order_lines(&mut reader)
    }

    /// Validates versions and groups lines into orders.
    pub fn consolidate(&self, lines: &[OrderLine]) -> Result<Vec<ConsolidatedOrder>> {
        consolidator::consolidate(lines)
    }
}

/// Required headers absent from `headers`, in the required order.
pub fn missing_headers<S: AsRef<str>>(headers: &[S]) -> Vec<String> {
    REQUIRED_HEADERS
        .iter()
        .filter(|required| !headers.iter().any(|h| h.as_ref() == **required))
        .map(|required| required.to_string())
        .collect()
}

/// The per-line overview of an upload, before any grouping.
pub fn summarize(lines: &[OrderLine]) -> Vec<UploadSummaryRow> {
    lines
        .iter()
        .map(|line| UploadSummaryRow {
            order_id: line.order_id.clone(),
            offer_id: line.offer_id.clone(),
            version: line.version.clone(),
            quantity: line.quantity,
        })
        .collect()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
