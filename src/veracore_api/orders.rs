//! SOAP AddOrder call.

use anyhow::{Context, Result};
use log::{debug, error, info, warn};

use crate::request_builder::{redact_envelope, unescape_xml};

use super::VeraCoreApi;

const ADD_ORDER_ACTION: &str = "\"http://omscom/AddOrder\"";

/// What the AddOrder endpoint made of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOrderOutcome {
    Created,
    /// The order ID is already known to VeraCore.
    AlreadyExists { fault: String },
    Rejected { status: u16, fault: String },
}

impl VeraCoreApi {
    /// Posts an AddOrder envelope.
    ///
    /// Any status up to 299 counts as created. For other statuses the fault
    /// text is inspected to tell duplicates from real rejections.
    ///
    /// # Errors
    /// Only when the request could not be sent or the response not read.
    pub async fn add_order(&self, order_id: &str, envelope: &str) -> Result<AddOrderOutcome> {
        info!("Submitting AddOrder for order {order_id}");
        debug!(
            "AddOrder envelope for {order_id}:\n{}",
            redact_envelope(envelope)
        );

        let response = self
            .client
            .post(&self.soap_url)
            .header("Content-Type", "text/xml; charset=utf-8")
            .header("SOAPAction", ADD_ORDER_ACTION)
            .body(envelope.to_string())
            .send()
            .await
            .context("Failed to send AddOrder request")?;

        let status = response.status();
        debug!("AddOrder response status: {status}");

        let response_text = response
            .text()
            .await
            .context("Failed to read AddOrder response")?;
        debug!("AddOrder response body: {response_text}");

        if status.as_u16() <= 299 {
            info!("Order {order_id} created");
            return Ok(AddOrderOutcome::Created);
        }

        let fault = extract_fault_text(&response_text);
        if is_duplicate_order_fault(&fault) {
            warn!("Order {order_id} already exists: {fault}");
            Ok(AddOrderOutcome::AlreadyExists { fault })
        } else {
            error!("AddOrder for {order_id} failed with status {status}: {fault}");
            Ok(AddOrderOutcome::Rejected {
                status: status.as_u16(),
                fault,
            })
        }
    }
}

/// The decoded `<faultstring>` of a SOAP fault, or the whole trimmed body
/// when there is none.
pub fn extract_fault_text(body: &str) -> String {
    const OPEN: &str = "<faultstring>";
    const CLOSE: &str = "</faultstring>";

    if let Some(start) = body.find(OPEN) {
        let rest = &body[start + OPEN.len()..];
        if let Some(end) = rest.find(CLOSE) {
            return unescape_xml(rest[..end].trim());
        }
    }
    body.trim().to_string()
}

pub fn is_duplicate_order_fault(fault: &str) -> bool {
    fault.to_lowercase().contains("already exists")
}
