//! Microsoft Graph client for mailing error reports.
//!
//! Every call is a single attempt. Failures are written to the local
//! [`ErrorLog`] instead of being returned, so a broken mail setup never
//! fails an upload run.

mod auth;
mod messages;
mod report;

pub use report::MailDeliveryStatus;

use reqwest::Client;
use serde::Deserialize;

use crate::config::MailConfig;
use crate::error_log::ErrorLog;

pub const GRAPH_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Graph client sending as one mailbox with application credentials.
pub struct GraphMailApi {
    pub(crate) client: Client,
    pub(crate) tenant_id: String,
    pub(crate) client_id: String,
    pub(crate) client_secret: String,
    pub(crate) sender: String,
    pub(crate) graph_base_url: String,
    pub(crate) login_base_url: String,
    pub(crate) error_log: ErrorLog,
}

/// Any Graph object where only the id matters.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphObject {
    pub id: Option<String>,
}

impl GraphMailApi {
    pub fn new(config: &MailConfig, error_log: ErrorLog) -> Self {
        log::info!("Creating Graph mail client for sender {}", config.sender);
        Self {
            client: Client::new(),
            tenant_id: config.tenant_id.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            sender: config.sender.clone(),
            graph_base_url: config.graph_base_url.trim_end_matches('/').to_string(),
            login_base_url: config.login_base_url.trim_end_matches('/').to_string(),
            error_log,
        }
    }

    pub(crate) fn messages_url(&self) -> String {
        format!("{}/users/{}/messages", self.graph_base_url, self.sender)
    }
}

#[cfg(test)]
#[path = "tests/mod.rs"]
mod tests;
