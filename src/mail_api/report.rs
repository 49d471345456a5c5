//! Error report delivery.

use log::{info, warn};

use crate::error_report::{EmailTemplate, ErrorReport};

use super::GraphMailApi;

/// How far delivery of a report got.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MailDeliveryStatus {
    pub draft_id: Option<String>,
    pub attached: bool,
    pub sent: bool,
}

impl GraphMailApi {
    /// Mails the report as an HTML body with the failed offers attached as
    /// CSV.
    ///
    /// Steps run in order and each one only if the previous succeeded.
    /// Failures go to the error log and are reflected in the returned
    /// status.
    pub async fn send_error_report(
        &self,
        report: &ErrorReport,
        template: &EmailTemplate,
    ) -> MailDeliveryStatus {
        let mut status = MailDeliveryStatus::default();

        if template.recipients.is_empty() {
            warn!("No recipients configured, error report not mailed");
            return status;
        }

        info!(
            "Mailing error report for {} orders to {}",
            report.errors().len(),
            template.recipients.join(", ")
        );

        let token = match self.acquire_token().await {
            Ok(token) => token,
            Err(e) => {
                self.error_log
                    .record(&format!("Could not acquire mail token: {e:#}"));
                return status;
            }
        };

        let html = report.to_html(template);
        let draft_id = match self
            .create_draft(&token, &template.subject, &html, &template.recipients)
            .await
        {
            Ok(id) => id,
            Err(e) => {
                self.error_log
                    .record(&format!("Could not create error report draft: {e:#}"));
                return status;
            }
        };
        status.draft_id = Some(draft_id.clone());

        let attachment = match report.csv_attachment_base64() {
            Ok(content) => content,
            Err(e) => {
                self.error_log
                    .record(&format!("Could not render failed offers CSV: {e:#}"));
                return status;
            }
        };

        match self
            .add_attachment(&token, &draft_id, &template.attachment_name, &attachment)
            .await
        {
            Ok(_) => status.attached = true,
            Err(e) => {
                self.error_log
                    .record(&format!("Could not attach failed offers CSV: {e:#}"));
                return status;
            }
        }

        match self.send_message(&token, &draft_id).await {
            Ok(()) => status.sent = true,
            Err(e) => self
                .error_log
                .record(&format!("Could not send error report: {e:#}")),
        }

        status
    }
}
