//! VeraCore API client for order creation and version updates.
//!
//! Orders are created through the SOAP AddOrder endpoint. Version and
//! quantity corrections go through the REST API, which needs a separate
//! login for a bearer token.

mod auth;
mod orders;
mod simulation;
mod submission;
mod versions;

pub use auth::LoginOutcome;
pub use orders::{extract_fault_text, is_duplicate_order_fault, AddOrderOutcome};

use reqwest::Client;

use crate::config::VeraCoreConfig;
use crate::models::Credentials;

/// VeraCore API client acting as a single web user.
pub struct VeraCoreApi {
    pub(crate) client: Client,
    pub(crate) credentials: Credentials,
    pub(crate) soap_url: String,
    pub(crate) rest_url: String,
    pub(crate) system_id: String,
    pub(crate) warehouse_id: String,
}

impl VeraCoreApi {
    pub fn new(config: &VeraCoreConfig, credentials: Credentials) -> Self {
        log::info!("Creating VeraCore API client for {}", config.rest_url);
        log::debug!(
            "User name length: {}, password length: {}",
            credentials.username.len(),
            credentials.password.len()
        );
        Self {
            client: Client::new(),
            credentials,
            soap_url: config.soap_url.clone(),
            rest_url: config.rest_url.trim_end_matches('/').to_string(),
            system_id: config.system_id.clone(),
            warehouse_id: config.warehouse_id.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tests/mod.rs"]
mod tests;
