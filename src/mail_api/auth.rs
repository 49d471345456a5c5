//! Application token for Graph.

use anyhow::{Context, Result};
use log::{debug, error, info};
use serde::Deserialize;

use super::{GraphMailApi, GRAPH_SCOPE};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl GraphMailApi {
    /// Requests a client-credentials token for the configured tenant.
    pub async fn acquire_token(&self) -> Result<String> {
        let url = format!(
            "{}/{}/oauth2/v2.0/token",
            self.login_base_url, self.tenant_id
        );
        debug!("Requesting Graph token at: {url}");

        let form = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("scope", GRAPH_SCOPE),
            ("grant_type", "client_credentials"),
        ];

        let response = self
            .client
            .post(&url)
            .form(&form)
            .send()
            .await
            .context("Failed to send token request")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Token request failed with status {status}: {error_text}");
            anyhow::bail!("Token request failed: {} - {}", status, error_text);
        }

        let token: TokenResponse = response
            .json()
            .await
            .context("Failed to parse token response")?;

        info!("Acquired Graph access token");
        Ok(token.access_token)
    }
}
