//! Draft, attachment and send calls.

use anyhow::{Context, Result};
use log::{debug, error, info};
use reqwest::StatusCode;

use super::{GraphMailApi, GraphObject};

impl GraphMailApi {
    /// Creates an HTML draft and returns its id. Expects `201 Created`.
    pub async fn create_draft(
        &self,
        token: &str,
        subject: &str,
        html_body: &str,
        recipients: &[String],
    ) -> Result<String> {
        let url = self.messages_url();
        debug!("Creating draft at: {url}");

        let to_recipients: Vec<serde_json::Value> = recipients
            .iter()
            .map(|address| serde_json::json!({ "emailAddress": { "address": address } }))
            .collect();

        let body = serde_json::json!({
            "subject": subject,
            "body": {
                "contentType": "HTML",
                "content": html_body
            },
            "toRecipients": to_recipients
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .context("Failed to send draft request")?;

        let id = expect_created(response, "Draft creation").await?;
        info!("Created draft {id}");
        Ok(id)
    }

    /// Attaches a base64-encoded CSV file to a draft. Expects `201 Created`.
    pub async fn add_attachment(
        &self,
        token: &str,
        message_id: &str,
        file_name: &str,
        content_base64: &str,
    ) -> Result<String> {
        let url = format!("{}/{}/attachments", self.messages_url(), message_id);
        debug!("Adding attachment {file_name} at: {url}");

        let body = serde_json::json!({
            "@odata.type": "#microsoft.graph.fileAttachment",
            "name": file_name,
            "contentType": "text/csv",
            "contentBytes": content_base64
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .context("Failed to send attachment request")?;

        let id = expect_created(response, "Attachment upload").await?;
        info!("Attached {file_name} to draft {message_id}");
        Ok(id)
    }

    /// Sends a draft. Expects `202 Accepted`.
    pub async fn send_message(&self, token: &str, message_id: &str) -> Result<()> {
        let url = format!("{}/{}/send", self.messages_url(), message_id);
        debug!("Sending message at: {url}");

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .send()
            .await
            .context("Failed to send message request")?;

        let status = response.status();
        if status != StatusCode::ACCEPTED {
            let error_text = response.text().await.unwrap_or_default();
            error!("Sending message {message_id} failed: {status} - {error_text}");
            anyhow::bail!("Sending message failed: {} - {}", status, error_text);
        }

        info!("Message {message_id} sent");
        Ok(())
    }
}

/// Checks for `201 Created` and an `id` in the body.
async fn expect_created(response: reqwest::Response, step: &str) -> Result<String> {
    let status = response.status();
    let response_text = response.text().await.unwrap_or_default();
    debug!("{step} response status: {status}");

    if status != StatusCode::CREATED {
        error!("{step} failed: {status} - {response_text}");
        anyhow::bail!("{} failed: {} - {}", step, status, response_text);
    }

    let object: GraphObject = serde_json::from_str(&response_text)
        .with_context(|| format!("Failed to parse {step} response"))?;
    object
        .id
        .filter(|id| !id.is_empty())
        .with_context(|| format!("{step} response has no id"))
}
