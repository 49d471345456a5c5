//! REST version/quantity update.

use anyhow::{Context, Result};
use log::{debug, error, info};
use reqwest::StatusCode;

use crate::request_builder::ChangeVersionRequest;

use super::VeraCoreApi;

impl VeraCoreApi {
    /// Sets version and quantity of every product of an existing order.
    ///
    /// Only `200 OK` counts as success.
    pub async fn change_version(&self, request: &ChangeVersionRequest, token: &str) -> Result<()> {
        let url = format!("{}/api/orders/changeversion", self.rest_url);
        info!(
            "Updating versions of order {} ({} products)",
            request.order_id,
            request.products.len()
        );
        debug!(
            "Change version body: {}",
            serde_json::to_string_pretty(request).unwrap_or_default()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(request)
            .send()
            .await
            .context("Failed to send version update request")?;

        let status = response.status();
        debug!("Change version response status: {status}");

        if status != StatusCode::OK {
            let error_text = response.text().await.unwrap_or_default();
            error!(
                "Version update for order {} failed: {} - {}",
                request.order_id, status, error_text
            );
            anyhow::bail!("Version update failed: {} - {}", status, error_text);
        }

        let response_text = response.text().await.unwrap_or_default();
        debug!("Change version response: {response_text}");

        Ok(())
    }
}
