//! Order submission workflow.
//!
//! Per order:
//! 1. Re-check version consistency
//! 2. AddOrder via SOAP
//! 3. On success, or when the order already exists: REST login, then the
//!    version/quantity update
//!
//! Failures are recorded against the order and never stop the run.

use chrono::NaiveDateTime;
use log::{debug, error, info, warn};

use crate::csv_processor::validator::validate_order_versions;
use crate::error_report::ErrorReport;
use crate::models::{
    ConsolidatedOrder, FailureKind, SubmissionOutcome, SubmissionResult, SubmissionSummary,
};
use crate::request_builder::{build_add_order_envelope, build_change_version_request};

use super::{AddOrderOutcome, LoginOutcome, VeraCoreApi};

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid Credentials";

fn failed(kind: FailureKind, message: impl Into<String>) -> SubmissionOutcome {
    SubmissionOutcome::Failed {
        kind,
        message: message.into(),
    }
}

impl VeraCoreApi {
    /// Submits every order in turn and collects the outcomes.
    ///
    /// Orders are processed strictly in the given order; each call finishes
    /// before the next one starts.
    pub async fn submit_orders(
        &self,
        orders: &[ConsolidatedOrder],
        entry_date: NaiveDateTime,
    ) -> (SubmissionSummary, ErrorReport) {
        info!("Starting submission of {} orders", orders.len());
        let mut summary = SubmissionSummary::default();
        let mut report = ErrorReport::new();

        for (index, order) in orders.iter().enumerate() {
            debug!(
                "Processing order {}/{}: {}",
                index + 1,
                orders.len(),
                order.order_id
            );
            let result = self.submit_order(order, entry_date).await;
            record_result(&mut summary, &mut report, order, result);
        }

        info!(
            "Submission completed: {} successful, {} errors",
            summary.success_count(),
            summary.failure_count()
        );
        if summary.credentials_rejected {
            error!("VeraCore rejected the supplied credentials");
        }

        (summary, report)
    }

    /// Runs the full workflow for one order.
    pub async fn submit_order(
        &self,
        order: &ConsolidatedOrder,
        entry_date: NaiveDateTime,
    ) -> SubmissionResult {
        info!(
            "Submitting order {} ({})",
            order.order_id, order.ship_to.company_name
        );
        let outcome = self.run_order_workflow(order, entry_date).await;

        match &outcome {
            SubmissionOutcome::Failed { kind, message } => error!(
                "Order {} failed ({}): {}",
                order.order_id,
                kind.as_str(),
                message
            ),
            other => info!("Order {} finished: {:?}", order.order_id, other),
        }

        SubmissionResult {
            order_id: order.order_id.clone(),
            company_name: order.ship_to.company_name.clone(),
            outcome,
        }
    }

    async fn run_order_workflow(
        &self,
        order: &ConsolidatedOrder,
        entry_date: NaiveDateTime,
    ) -> SubmissionOutcome {
        if let Err(message) = validate_order_versions(order) {
            return failed(FailureKind::Validation, message);
        }

        let envelope = build_add_order_envelope(order, &self.credentials, entry_date);
        let success = match self.add_order(&order.order_id, &envelope).await {
            Ok(AddOrderOutcome::Created) => SubmissionOutcome::Created,
            Ok(AddOrderOutcome::AlreadyExists { fault }) => {
                info!(
                    "Order {} exists ({fault}), updating it instead",
                    order.order_id
                );
                SubmissionOutcome::UpdatedExisting
            }
            Ok(AddOrderOutcome::Rejected { fault, .. }) => {
                return failed(FailureKind::Creation, fault);
            }
            Err(e) => return failed(FailureKind::Transport, format!("{e:#}")),
        };

        match self.update_order_version(order).await {
            Ok(()) => success,
            Err(outcome) => outcome,
        }
    }

    /// Login followed by the version update. A rejected login stops here.
    async fn update_order_version(
        &self,
        order: &ConsolidatedOrder,
    ) -> Result<(), SubmissionOutcome> {
        let token = match self.login().await {
            Ok(LoginOutcome::Token(token)) => token,
            Ok(LoginOutcome::InvalidCredentials) => {
                return Err(failed(
                    FailureKind::InvalidCredentials,
                    INVALID_CREDENTIALS_MESSAGE,
                ));
            }
            Err(e) => return Err(failed(FailureKind::Update, format!("{e:#}"))),
        };

        let request = build_change_version_request(order, &self.warehouse_id);
        if request.products.is_empty() {
            warn!(
                "Order {} has no offers with an Offer ID to update",
                order.order_id
            );
        }

        self.change_version(&request, &token)
            .await
            .map_err(|e| failed(FailureKind::Update, format!("{e:#}")))
    }
}

/// Adds a result to the run summary, and to the error report if it failed.
pub(crate) fn record_result(
    summary: &mut SubmissionSummary,
    report: &mut ErrorReport,
    order: &ConsolidatedOrder,
    result: SubmissionResult,
) {
    if let SubmissionOutcome::Failed { kind, message } = &result.outcome {
        if *kind == FailureKind::InvalidCredentials {
            summary.credentials_rejected = true;
        }
        report.add_error(&order.order_id, message);
        report.add_failed_offers(order);
    }
    summary.results.push(result);
}
