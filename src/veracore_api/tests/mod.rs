//! Unit tests for the VeraCore API module.

mod submission_tests;

use crate::config::VeraCoreConfig;
use crate::models::{ConsolidatedOrder, Credentials, OfferLine, ShipTo};
use crate::veracore_api::VeraCoreApi;

/// Creates a VeraCoreApi whose SOAP and REST endpoints live on the mock server.
pub(super) fn api_with_mock(mock_uri: &str) -> VeraCoreApi {
    let config = VeraCoreConfig {
        soap_url: format!("{mock_uri}/oms.asmx"),
        rest_url: mock_uri.to_string(),
        system_id: "SYS1".to_string(),
        warehouse_id: "MAIN".to_string(),
    };
    VeraCoreApi::new(&config, Credentials::new("webuser", "s3cret"))
}

pub(super) fn create_test_order() -> ConsolidatedOrder {
    ConsolidatedOrder {
        order_id: "1001".to_string(),
        ship_to: ShipTo {
            company_name: "Acme Retail".to_string(),
            address1: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            postal_code: "62701".to_string(),
            country: "US".to_string(),
            ..Default::default()
        },
        comments: "Leave at dock".to_string(),
        offers: vec![
            OfferLine {
                offer_id: "OFF-A".to_string(),
                version: "V2".to_string(),
                quantity: 3,
                reference: "PO-1".to_string(),
            },
            OfferLine {
                offer_id: "OFF-B".to_string(),
                version: "V2".to_string(),
                quantity: 1,
                reference: "PO-2".to_string(),
            },
        ],
    }
}
