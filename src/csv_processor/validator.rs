//! Version consistency validation.
//!
//! Every order, and every offer within an order, must reference a single
//! product version. Empty versions are ignored. Violations abort the whole
//! upload before anything is submitted.

use std::collections::HashMap;
use std::hash::Hash;

use log::{info, warn};

use crate::models::{ConsolidatedOrder, OrderLine};

/// Distinct non-empty versions in first-seen order.
fn distinct_versions<'a>(versions: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut distinct: Vec<&str> = Vec::new();
    for version in versions.filter(|v| !v.is_empty()) {
        if !distinct.contains(&version) {
            distinct.push(version);
        }
    }
    distinct
}

/// Keys in first-seen order, each with the indices of the lines sharing it.
fn group_indices<K: Eq + Hash + Copy>(keys: impl Iterator<Item = K>) -> Vec<(K, Vec<usize>)> {
    let mut groups: Vec<(K, Vec<usize>)> = Vec::new();
    let mut positions: HashMap<K, usize> = HashMap::new();
    for (index, key) in keys.enumerate() {
        let pos = *positions.entry(key).or_insert_with(|| {
            groups.push((key, Vec::new()));
            groups.len() - 1
        });
        groups[pos].1.push(index);
    }
    groups
}

/// Checks raw lines for conflicting versions.
///
/// # Returns
/// One message per violation, order-level violations first. Empty if the
/// upload is consistent.
pub fn validate_versions(lines: &[OrderLine]) -> Vec<String> {
    info!("Validating versions across {} lines", lines.len());
    let mut errors = Vec::new();

    for (order_id, indices) in group_indices(lines.iter().map(|l| l.order_id.as_str())) {
        let versions = distinct_versions(indices.iter().map(|&i| lines[i].version.as_str()));
        if versions.len() > 1 {
            let message = format!(
                "Order {order_id} has multiple versions: {}",
                versions.join(", ")
            );
            warn!("{message}");
            errors.push(message);
        }
    }

    let offer_keys = lines
        .iter()
        .map(|l| (l.order_id.as_str(), l.offer_id.as_str()));
    for ((order_id, offer_id), indices) in group_indices(offer_keys) {
        let versions = distinct_versions(indices.iter().map(|&i| lines[i].version.as_str()));
        if versions.len() > 1 {
            let message = format!(
                "Order {order_id}, product {offer_id} has multiple versions: {}",
                versions.join(", ")
            );
            warn!("{message}");
            errors.push(message);
        }
    }

    if errors.is_empty() {
        info!("All lines passed version validation");
    } else {
        warn!("Version validation found {} problems", errors.len());
    }

    errors
}

/// Final per-order check run just before submission.
pub fn validate_order_versions(order: &ConsolidatedOrder) -> Result<(), String> {
    let versions = distinct_versions(order.offers.iter().map(|o| o.version.as_str()));
    if versions.len() > 1 {
        return Err(format!(
            "Order {} has multiple versions: {}",
            order.order_id,
            versions.join(", ")
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
