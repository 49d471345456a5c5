//! Dry-run simulation of order submission.

use chrono::NaiveDateTime;
use log::{debug, info};

use crate::csv_processor::validator::validate_order_versions;
use crate::error_report::ErrorReport;
use crate::models::{
    ConsolidatedOrder, FailureKind, SubmissionOutcome, SubmissionResult, SubmissionSummary,
};
use crate::request_builder::{
    build_add_order_envelope, build_change_version_request, redact_envelope,
};

use super::submission::record_result;
use super::VeraCoreApi;

impl VeraCoreApi {
    /// Builds both payloads for an order and logs them without making API
    /// calls.
    pub fn simulate_order(
        &self,
        order: &ConsolidatedOrder,
        entry_date: NaiveDateTime,
    ) -> SubmissionResult {
        info!(
            "[DRY RUN] Simulating submission of order {} ({})",
            order.order_id, order.ship_to.company_name
        );

        let outcome = match validate_order_versions(order) {
            Ok(()) => {
                let envelope = build_add_order_envelope(order, &self.credentials, entry_date);
                let request = build_change_version_request(order, &self.warehouse_id);
                debug!(
                    "[DRY RUN] Would POST AddOrder to {}:\n{}",
                    self.soap_url,
                    redact_envelope(&envelope)
                );
                debug!(
                    "[DRY RUN] Would POST version update to {}/api/orders/changeversion: {}",
                    self.rest_url,
                    serde_json::to_string_pretty(&request).unwrap_or_default()
                );
                info!(
                    "[DRY RUN] Order {}: {} products, version '{}'",
                    order.order_id,
                    request.products.len(),
                    order.version()
                );
                SubmissionOutcome::Simulated
            }
            Err(message) => SubmissionOutcome::Failed {
                kind: FailureKind::Validation,
                message,
            },
        };

        SubmissionResult {
            order_id: order.order_id.clone(),
            company_name: order.ship_to.company_name.clone(),
            outcome,
        }
    }

    pub fn simulate_orders(
        &self,
        orders: &[ConsolidatedOrder],
        entry_date: NaiveDateTime,
    ) -> (SubmissionSummary, ErrorReport) {
        info!("[DRY RUN] Simulating submission of {} orders", orders.len());
        let mut summary = SubmissionSummary::default();
        let mut report = ErrorReport::new();

        for order in orders {
            let result = self.simulate_order(order, entry_date);
            record_result(&mut summary, &mut report, order, result);
        }

        (summary, report)
    }
}
