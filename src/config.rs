//! Runtime configuration read from the environment.
//!
//! The binary loads a `.env` file first (if present), so every setting can
//! live there as well.

use std::path::PathBuf;

use log::{debug, warn};

use crate::error::{Result, UploadError};

pub const DEFAULT_WAREHOUSE_ID: &str = "MAIN";
pub const DEFAULT_ERROR_LOG_PATH: &str = "error_log.txt";
pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.microsoft.com/v1.0";
pub const DEFAULT_LOGIN_BASE_URL: &str = "https://login.microsoftonline.com";

#[derive(Debug, Clone)]
pub struct VeraCoreConfig {
    /// AddOrder SOAP endpoint.
    pub soap_url: String,
    /// Base URL of the REST API (login and version update).
    pub rest_url: String,
    pub system_id: String,
    pub warehouse_id: String,
}

#[derive(Clone)]
pub struct MailConfig {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
    /// Mailbox the error report is sent from.
    pub sender: String,
    pub recipients: Vec<String>,
    pub graph_base_url: String,
    pub login_base_url: String,
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("sender", &self.sender)
            .field("recipients", &self.recipients)
            .field("graph_base_url", &self.graph_base_url)
            .field("login_base_url", &self.login_base_url)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub veracore: VeraCoreConfig,
    /// `None` when the Graph application is not configured; error reports
    /// are then only logged.
    pub mail: Option<MailConfig>,
    pub error_log_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Blank values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let require = |key: &str| {
            get(key).ok_or_else(|| UploadError::Config(format!("{key} is not set")))
        };

        let veracore = VeraCoreConfig {
            soap_url: require("VERACORE_SOAP_URL")?,
            rest_url: require("VERACORE_REST_URL")?
                .trim_end_matches('/')
                .to_string(),
            system_id: require("VERACORE_SYSTEM_ID")?,
            warehouse_id: get("VERACORE_WAREHOUSE_ID").unwrap_or_else(|| {
                debug!("VERACORE_WAREHOUSE_ID not set, using {DEFAULT_WAREHOUSE_ID}");
                DEFAULT_WAREHOUSE_ID.to_string()
            }),
        };

        let mail = match (
            get("GRAPH_TENANT_ID"),
            get("GRAPH_CLIENT_ID"),
            get("GRAPH_CLIENT_SECRET"),
            get("GRAPH_SENDER"),
            get("ERROR_REPORT_RECIPIENTS"),
        ) {
            (Some(tenant_id), Some(client_id), Some(client_secret), Some(sender), Some(recipients)) => {
                Some(MailConfig {
                    tenant_id,
                    client_id,
                    client_secret,
                    sender,
                    recipients: parse_recipients(&recipients),
                    graph_base_url: get("GRAPH_BASE_URL")
                        .unwrap_or_else(|| DEFAULT_GRAPH_BASE_URL.to_string()),
                    login_base_url: get("GRAPH_LOGIN_URL")
                        .unwrap_or_else(|| DEFAULT_LOGIN_BASE_URL.to_string()),
                })
            }
            _ => {
                warn!("Graph mail settings incomplete, error reports will not be emailed");
                None
            }
        };

        let error_log_path = get("ERROR_LOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ERROR_LOG_PATH));

        Ok(Self {
            veracore,
            mail,
            error_log_path,
        })
    }
}

/// Splits a comma-separated recipient list, dropping blanks.
pub fn parse_recipients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
