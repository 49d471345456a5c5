//! JSON body for the REST version/quantity update.

use serde::Serialize;

use crate::models::ConsolidatedOrder;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeVersionRequest {
    pub order_id: String,
    pub warehouse_id: String,
    pub hold: bool,
    pub products: Vec<ChangeVersionProduct>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeVersionProduct {
    pub product_id: String,
    pub quantity_to_ship: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Builds the update body for an order. Offers without an Offer ID are left
/// out, and `version` is only sent when the offer has one.
pub fn build_change_version_request(
    order: &ConsolidatedOrder,
    warehouse_id: &str,
) -> ChangeVersionRequest {
    let products = order
        .offers
        .iter()
        .filter(|offer| !offer.offer_id.is_empty())
        .map(|offer| ChangeVersionProduct {
            product_id: offer.offer_id.clone(),
            quantity_to_ship: offer.quantity,
            version: (!offer.version.is_empty()).then(|| offer.version.clone()),
        })
        .collect();

    ChangeVersionRequest {
        order_id: order.order_id.clone(),
        warehouse_id: warehouse_id.to_string(),
        hold: false,
        products,
    }
}

#[cfg(test)]
#[path = "change_version_tests.rs"]
mod tests;
