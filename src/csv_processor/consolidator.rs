//! Groups raw order lines into one consolidated order per Order ID.

use std::cmp::Ordering;
use std::collections::HashMap;

use log::{debug, info};

use crate::error::{Result, UploadError};
use crate::models::{ConsolidatedOrder, OfferLine, OrderLine};

use super::validator::validate_versions;

/// Consolidates order lines after validating version consistency.
///
/// Lines are grouped by Order ID and, within an order, by Offer ID.
/// Quantities of a group are summed. Version and Reference # take the first
/// non-empty value of the group. Ship-to fields come from the first line of
/// the order, comments from its first line that has any. Offers keep their
/// first-seen order; orders are sorted by Order ID ascending.
///
/// Lines without an Offer ID are consolidated like any other offer.
///
/// # Errors
/// [`UploadError::InconsistentVersions`] with every violation found, one per
/// line of the message.
pub fn consolidate(lines: &[OrderLine]) -> Result<Vec<ConsolidatedOrder>> {
    let errors = validate_versions(lines);
    if !errors.is_empty() {
        return Err(UploadError::InconsistentVersions(errors.join("\n")));
    }

    let mut orders: Vec<ConsolidatedOrder> = Vec::new();
    let mut order_index: HashMap<&str, usize> = HashMap::new();
    let mut offer_index: HashMap<(&str, &str), usize> = HashMap::new();

    for line in lines {
        let order_pos = *order_index.entry(line.order_id.as_str()).or_insert_with(|| {
            orders.push(ConsolidatedOrder {
                order_id: line.order_id.clone(),
                ship_to: line.ship_to(),
                comments: String::new(),
                offers: Vec::new(),
            });
            orders.len() - 1
        });
        let order = &mut orders[order_pos];

        if order.comments.is_empty() && !line.comments.is_empty() {
            order.comments = line.comments.clone();
        }

        let offer_key = (line.order_id.as_str(), line.offer_id.as_str());
        let offer_pos = *offer_index.entry(offer_key).or_insert_with(|| {
            order.offers.push(OfferLine {
                offer_id: line.offer_id.clone(),
                ..Default::default()
            });
            order.offers.len() - 1
        });
        let offer = &mut order.offers[offer_pos];

        offer.quantity = offer.quantity.saturating_add(line.quantity);
        if offer.version.is_empty() {
            offer.version = line.version.clone();
        }
        if offer.reference.is_empty() {
            offer.reference = line.reference.clone();
        }
    }

    orders.sort_by(|a, b| compare_order_ids(&a.order_id, &b.order_id));

    for order in &orders {
        debug!(
            "Order {}: {} offers, version '{}'",
            order.order_id,
            order.offers.len(),
            order.version()
        );
    }
    info!(
        "Consolidated {} lines into {} orders",
        lines.len(),
        orders.len()
    );
    Ok(orders)
}

/// Integer IDs sort numerically and before all other IDs, which sort
/// lexicographically.
pub fn compare_order_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

#[cfg(test)]
#[path = "consolidator_tests.rs"]
mod tests;
