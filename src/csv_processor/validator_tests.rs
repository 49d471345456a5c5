//! Unit tests for version validation.

use super::*;
use crate::models::OfferLine;

fn line(order_id: &str, offer_id: &str, version: &str) -> OrderLine {
    OrderLine {
        order_id: order_id.to_string(),
        offer_id: offer_id.to_string(),
        version: version.to_string(),
        quantity: 1,
        ..Default::default()
    }
}

#[test]
fn consistent_lines_pass() {
    let lines = vec![line("1", "A", "v1"), line("1", "B", "v1"), line("2", "A", "v2")];
    assert!(validate_versions(&lines).is_empty());
}

#[test]
fn empty_versions_are_ignored() {
    let lines = vec![line("1", "A", ""), line("1", "A", "v1"), line("1", "B", "")];
    assert!(validate_versions(&lines).is_empty());
}

#[test]
fn conflicting_versions_within_order_name_the_order() {
    let lines = vec![line("42", "A", "v1"), line("42", "B", "v2")];
    let errors = validate_versions(&lines);

    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("Order 42"));
    assert!(errors[0].contains("v1, v2"));
}

#[test]
fn conflicting_versions_within_offer_name_the_product() {
    let lines = vec![line("42", "A", "v1"), line("42", "A", "v3")];
    let errors = validate_versions(&lines);

    // reported once for the order and once for the offer
    assert_eq!(errors.len(), 2);
    assert!(errors[0].starts_with("Order 42 has multiple versions"));
    assert!(errors[1].contains("product A"));
    assert!(errors[1].contains("v1, v3"));
}

#[test]
fn versions_are_listed_once_in_first_seen_order() {
    let lines = vec![
        line("9", "A", "beta"),
        line("9", "B", "alpha"),
        line("9", "C", "beta"),
    ];
    let errors = validate_versions(&lines);
    assert!(errors[0].ends_with("beta, alpha"));
}

#[test]
fn separate_orders_may_use_different_versions() {
    let lines = vec![line("1", "A", "v1"), line("2", "A", "v2")];
    assert!(validate_versions(&lines).is_empty());
}

#[test]
fn consolidated_order_check_rejects_mixed_versions() {
    let order = ConsolidatedOrder {
        order_id: "5".to_string(),
        offers: vec![
            OfferLine {
                offer_id: "A".to_string(),
                version: "v1".to_string(),
                quantity: 1,
                reference: String::new(),
            },
            OfferLine {
                offer_id: "B".to_string(),
                version: "v2".to_string(),
                quantity: 1,
                reference: String::new(),
            },
        ],
        ..Default::default()
    };
    let err = validate_order_versions(&order).unwrap_err();
    assert!(err.contains("Order 5"));
}

#[test]
fn large_upload_reports_conflicts_in_first_seen_order() {
    let mut lines: Vec<OrderLine> = (0..40_000)
        .map(|i| line(&i.to_string(), "A", "v1"))
        .collect();
    lines.push(line("39999", "B", "v2"));
    lines.push(line("7", "A", "v3"));

    let errors = validate_versions(&lines);

    assert_eq!(
        errors,
        vec![
            "Order 7 has multiple versions: v1, v3".to_string(),
            "Order 39999 has multiple versions: v1, v2".to_string(),
            "Order 7, product A has multiple versions: v1, v3".to_string(),
        ]
    );
}
