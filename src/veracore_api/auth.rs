//! REST API login.

use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use reqwest::StatusCode;

use crate::models::LoginResponse;

use super::VeraCoreApi;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Token(String),
    /// The API answered 403.
    InvalidCredentials,
}

impl VeraCoreApi {
    /// Logs in to the REST API with the client's credentials.
    ///
    /// # Errors
    /// Transport failures, statuses other than 2xx/403 and bodies without a
    /// `Token`.
    pub async fn login(&self) -> Result<LoginOutcome> {
        let url = format!("{}/api/login", self.rest_url);
        debug!("Logging in at: {url}");

        let form = [
            ("userName", self.credentials.username.as_str()),
            ("password", self.credentials.password.as_str()),
            ("systemId", self.system_id.as_str()),
        ];

        let response = self
            .client
            .post(&url)
            .form(&form)
            .send()
            .await
            .context("Failed to send login request")?;

        let status = response.status();
        debug!("Login response status: {status}");

        if status == StatusCode::FORBIDDEN {
            warn!("Login rejected with status {status}");
            return Ok(LoginOutcome::InvalidCredentials);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Login failed with status {status}: {error_text}");
            anyhow::bail!("Login failed: {} - {}", status, error_text);
        }

        let response_text = response
            .text()
            .await
            .context("Failed to read login response")?;

        let login: LoginResponse =
            serde_json::from_str(&response_text).context("Failed to parse login response")?;

        info!("Logged in to VeraCore REST API");
        Ok(LoginOutcome::Token(login.token))
    }
}
