//! VeraCore Order Upload
//!
//! This library consolidates order CSV exports into one order per Order ID,
//! submits them to VeraCore and mails a report of the orders that failed.

pub mod config;
pub mod csv_processor;
pub mod error;
pub mod error_log;
pub mod error_report;
pub mod mail_api;
pub mod models;
pub mod request_builder;
pub mod veracore_api;

pub use config::{AppConfig, MailConfig, VeraCoreConfig};
pub use csv_processor::CsvProcessor;
pub use error::{Result, UploadError};
pub use error_log::ErrorLog;
pub use error_report::{EmailTemplate, ErrorReport};
pub use mail_api::{GraphMailApi, MailDeliveryStatus};
pub use models::*;
pub use veracore_api::VeraCoreApi;
