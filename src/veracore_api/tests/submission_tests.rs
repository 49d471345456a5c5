//! Tests for the full order submission workflow.

use chrono::{NaiveDate, NaiveDateTime};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{api_with_mock, create_test_order};
use crate::models::{FailureKind, SubmissionOutcome};

fn entry_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 14)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

fn fault_body(text: &str) -> String {
    format!("<soap:Envelope><soap:Body><soap:Fault><faultstring>{text}</faultstring></soap:Fault></soap:Body></soap:Envelope>")
}

async fn mock_add_order(mock_server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/oms.asmx"))
        .respond_with(template)
        .expect(1)
        .mount(mock_server)
        .await;
}

async fn mock_login(mock_server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "Token": "tok-123" })),
        )
        .expect(expected_calls)
        .mount(mock_server)
        .await;
}

async fn mock_change_version(mock_server: &MockServer, status: u16, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/api/orders/changeversion"))
        .and(header("Authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(status).set_body_string("update response"))
        .expect(expected_calls)
        .mount(mock_server)
        .await;
}

// ── submit_order ─────────────────────────────────────────────────────

#[tokio::test]
async fn created_order_is_updated() {
    let mock_server = MockServer::start().await;
    let api = api_with_mock(&mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/oms.asmx"))
        .and(body_string_contains("<EntryDate>2025-03-14T09:30:00</EntryDate>"))
        .and(body_string_contains("<Username>webuser</Username>"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<ok/>"))
        .expect(1)
        .mount(&mock_server)
        .await;
    mock_login(&mock_server, 1).await;
    mock_change_version(&mock_server, 200, 1).await;

    let result = api.submit_order(&create_test_order(), entry_date()).await;
    assert_eq!(result.outcome, SubmissionOutcome::Created);
    assert_eq!(result.order_id, "1001");
    assert_eq!(result.company_name, "Acme Retail");
    assert!(result.is_success());
}

#[tokio::test]
async fn existing_order_is_updated_instead() {
    let mock_server = MockServer::start().await;
    let api = api_with_mock(&mock_server.uri());

    mock_add_order(
        &mock_server,
        ResponseTemplate::new(500).set_body_string(fault_body("Order 1001 already exists")),
    )
    .await;
    mock_login(&mock_server, 1).await;
    mock_change_version(&mock_server, 200, 1).await;

    let result = api.submit_order(&create_test_order(), entry_date()).await;
    assert_eq!(result.outcome, SubmissionOutcome::UpdatedExisting);
}

#[tokio::test]
async fn rejected_order_skips_update() {
    let mock_server = MockServer::start().await;
    let api = api_with_mock(&mock_server.uri());

    mock_add_order(
        &mock_server,
        ResponseTemplate::new(500).set_body_string(fault_body("Offer OFF-A is inactive")),
    )
    .await;
    mock_login(&mock_server, 0).await;
    mock_change_version(&mock_server, 200, 0).await;

    let result = api.submit_order(&create_test_order(), entry_date()).await;
    assert_eq!(
        result.outcome,
        SubmissionOutcome::Failed {
            kind: FailureKind::Creation,
            message: "Offer OFF-A is inactive".to_string()
        }
    );
}

#[tokio::test]
async fn rejected_login_stops_before_update() {
    let mock_server = MockServer::start().await;
    let api = api_with_mock(&mock_server.uri());

    mock_add_order(&mock_server, ResponseTemplate::new(200)).await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&mock_server)
        .await;
    mock_change_version(&mock_server, 200, 0).await;

    let result = api.submit_order(&create_test_order(), entry_date()).await;
    assert_eq!(
        result.outcome,
        SubmissionOutcome::Failed {
            kind: FailureKind::InvalidCredentials,
            message: "Invalid Credentials".to_string()
        }
    );
}

#[tokio::test]
async fn failed_update_is_reported() {
    let mock_server = MockServer::start().await;
    let api = api_with_mock(&mock_server.uri());

    mock_add_order(&mock_server, ResponseTemplate::new(200)).await;
    mock_login(&mock_server, 1).await;
    mock_change_version(&mock_server, 400, 1).await;

    let result = api.submit_order(&create_test_order(), entry_date()).await;
    match result.outcome {
        SubmissionOutcome::Failed { kind, message } => {
            assert_eq!(kind, FailureKind::Update);
            assert!(message.contains("400"), "{message}");
            assert!(message.contains("update response"), "{message}");
        }
        other => panic!("expected update failure, got {other:?}"),
    }
}

#[tokio::test]
async fn version_mismatch_makes_no_calls() {
    let mock_server = MockServer::start().await;
    let api = api_with_mock(&mock_server.uri());

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut order = create_test_order();
    order.offers[1].version = "V3".to_string();

    let result = api.submit_order(&order, entry_date()).await;
    match result.outcome {
        SubmissionOutcome::Failed { kind, message } => {
            assert_eq!(kind, FailureKind::Validation);
            assert!(message.contains("1001"), "{message}");
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_soap_endpoint_is_transport_failure() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();
    drop(mock_server);
    let api = api_with_mock(&uri);

    let result = api.submit_order(&create_test_order(), entry_date()).await;
    assert!(matches!(
        result.outcome,
        SubmissionOutcome::Failed {
            kind: FailureKind::Transport,
            ..
        }
    ));
}

// ── submit_orders ────────────────────────────────────────────────────

#[tokio::test]
async fn submit_orders_continues_after_failure() {
    let mock_server = MockServer::start().await;
    let api = api_with_mock(&mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/oms.asmx"))
        .and(body_string_contains("<ID>1001</ID>"))
        .respond_with(ResponseTemplate::new(500).set_body_string(fault_body("Bad address")))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/oms.asmx"))
        .and(body_string_contains("<ID>1002</ID>"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;
    mock_login(&mock_server, 1).await;
    mock_change_version(&mock_server, 200, 1).await;

    let first = create_test_order();
    let mut second = create_test_order();
    second.order_id = "1002".to_string();

    let (summary, report) = api.submit_orders(&[first, second], entry_date()).await;

    assert_eq!(summary.results.len(), 2);
    assert_eq!(summary.results[0].order_id, "1001");
    assert_eq!(summary.results[1].order_id, "1002");
    assert_eq!(summary.success_count(), 1);
    assert_eq!(summary.failure_count(), 1);
    assert!(!summary.credentials_rejected);

    assert_eq!(report.error_for("1001"), Some("Bad address"));
    assert_eq!(report.error_for("1002"), None);
    assert_eq!(report.failed_offers().len(), 2);
    assert!(report.failed_offers().iter().all(|o| o.order_id == "1001"));
}

#[tokio::test]
async fn submit_orders_flags_rejected_credentials() {
    let mock_server = MockServer::start().await;
    let api = api_with_mock(&mock_server.uri());

    mock_add_order(&mock_server, ResponseTemplate::new(200)).await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let (summary, report) = api.submit_orders(&[create_test_order()], entry_date()).await;

    assert!(summary.credentials_rejected);
    assert_eq!(summary.failure_count(), 1);
    assert_eq!(report.error_for("1001"), Some("Invalid Credentials"));
}

#[tokio::test]
async fn submit_orders_empty_input() {
    let api = api_with_mock("http://127.0.0.1:9");
    let (summary, report) = api.submit_orders(&[], entry_date()).await;
    assert!(summary.results.is_empty());
    assert!(report.is_empty());
}
