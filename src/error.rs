//! Error types for loading and validating an order upload.
//!
//! Everything that happens before the first API call is reported through
//! [`UploadError`] and aborts the run. Per-order API faults never surface
//! here; they are recorded as [`crate::models::SubmissionResult`] values.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    /// One or more required CSV columns are absent.
    #[error(
        "The following headers are missing:\n\n{}\n\nPlease upload the CSV with the correct headers.",
        .0.join("\n")
    )]
    MissingHeaders(Vec<String>),

    /// Lines of one order (or one offer within an order) disagree on Version.
    #[error("Version validation failed:\n{0}")]
    InconsistentVersions(String),

    #[error("Line {line}: invalid quantity '{value}'")]
    InvalidQuantity { line: u64, value: String },

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, UploadError>;
