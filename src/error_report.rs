//! Per-run collection of failed orders and the notification built from it.

use std::collections::HashMap;

use anyhow::{Context, Result};
use base64::Engine;
use log::debug;

use crate::models::ConsolidatedOrder;

/// Header row of the failed-offers attachment.
pub const FAILED_OFFERS_HEADER: [&str; 5] =
    ["Order ID", "Offer ID", "Version", "Quantity", "Reference #"];

/// Wording and addressing of one error report email.
///
/// Built per report so nothing carries over between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailTemplate {
    pub subject: String,
    pub recipients: Vec<String>,
    pub greeting: String,
    pub attachment_name: String,
}

impl EmailTemplate {
    pub fn new(recipients: Vec<String>) -> Self {
        Self {
            subject: "VeraCore order upload errors".to_string(),
            recipients,
            greeting: "The following orders could not be submitted to VeraCore:".to_string(),
            attachment_name: "failed_offers.csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedOffer {
    pub order_id: String,
    pub offer_id: String,
    pub version: String,
    pub quantity: u32,
    pub reference: String,
}

#[derive(Debug, Clone, Default)]
pub struct ErrorReport {
    /// Order ID and error text, in the order failures were first recorded.
    errors: Vec<(String, String)>,
    /// Position of each order in `errors`.
    error_index: HashMap<String, usize>,
    failed_offers: Vec<FailedOffer>,
}

impl ErrorReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error for an order. A second error for the same order is
    /// appended on a new line.
    pub fn add_error(&mut self, order_id: &str, text: &str) {
        match self.error_index.get(order_id) {
            Some(&pos) => {
                let existing = &mut self.errors[pos].1;
                existing.push('\n');
                existing.push_str(text);
            }
            None => {
                self.error_index
                    .insert(order_id.to_string(), self.errors.len());
                self.errors.push((order_id.to_string(), text.to_string()));
            }
        }
    }

    pub fn add_failed_offers(&mut self, order: &ConsolidatedOrder) {
        self.failed_offers
            .extend(order.offers.iter().map(|offer| FailedOffer {
                order_id: order.order_id.clone(),
                offer_id: offer.offer_id.clone(),
                version: offer.version.clone(),
                quantity: offer.quantity,
                reference: offer.reference.clone(),
            }));
    }

    pub fn errors(&self) -> &[(String, String)] {
        &self.errors
    }

    pub fn error_for(&self, order_id: &str) -> Option<&str> {
        self.error_index
            .get(order_id)
            .map(|&pos| self.errors[pos].1.as_str())
    }

    pub fn failed_offers(&self) -> &[FailedOffer] {
        &self.failed_offers
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.failed_offers.is_empty()
    }

    /// Failed offers as CSV, header row first.
    pub fn failed_offers_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(FAILED_OFFERS_HEADER)
            .context("Failed to write CSV header")?;
        for offer in &self.failed_offers {
            let quantity = offer.quantity.to_string();
            writer
                .write_record([
                    offer.order_id.as_str(),
                    offer.offer_id.as_str(),
                    offer.version.as_str(),
                    quantity.as_str(),
                    offer.reference.as_str(),
                ])
                .context("Failed to write failed offer row")?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {e}"))?;
        let csv = String::from_utf8(bytes).context("Failed offers CSV is not valid UTF-8")?;
        debug!("Failed offers CSV has {} rows", self.failed_offers.len());
        Ok(csv)
    }

    pub fn csv_attachment_base64(&self) -> Result<String> {
        let csv = self.failed_offers_csv()?;
        Ok(base64::engine::general_purpose::STANDARD.encode(csv.as_bytes()))
    }

    /// HTML body listing every failed order with its error text.
    pub fn to_html(&self, template: &EmailTemplate) -> String {
        let mut html = String::new();
        html.push_str("<html><body>");
        html.push_str(&format!("<p>{}</p>", escape_html(&template.greeting)));
        html.push_str("<ul>");
        for (order_id, text) in &self.errors {
            let text = escape_html(text).replace('\n', "<br>");
            html.push_str(&format!(
                "<li><b>Order {}</b><br>{}</li>",
                escape_html(order_id),
                text
            ));
        }
        html.push_str("</ul>");
        html.push_str(&format!(
            "<p>The affected offers are attached as {}.</p>",
            escape_html(&template.attachment_name)
        ));
        html.push_str("</body></html>");
        html
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
#[path = "error_report_tests.rs"]
mod tests;
