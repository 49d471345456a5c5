//! Order line parsing for the upload CSV.
//!
//! Rows are deserialized by header name, so column order is irrelevant and
//! extra columns are ignored.

use log::{debug, info, warn};
use serde::Deserialize;

use crate::error::{Result, UploadError};
use crate::models::OrderLine;

/// A CSV record exactly as it appears in the file.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Order ID", default)]
    order_id: String,
    #[serde(rename = "Company Name", default)]
    company_name: String,
    #[serde(rename = "Address 1", default)]
    address1: String,
    #[serde(rename = "Address 2", default)]
    address2: String,
    #[serde(rename = "Address 3", default)]
    address3: String,
    #[serde(rename = "City", default)]
    city: String,
    #[serde(rename = "State", default)]
    state: String,
    #[serde(rename = "Postal Code", default)]
    postal_code: String,
    #[serde(rename = "Country", default)]
    country: String,
    #[serde(rename = "Offer ID", default)]
    offer_id: String,
    #[serde(rename = "Version", default)]
    version: String,
    #[serde(rename = "Quantity", default)]
    quantity: String,
    #[serde(rename = "Reference #", default)]
    reference: String,
    #[serde(rename = "Order Comments", default)]
    comments: String,
}

/// Parses every data row of an upload whose headers were already checked.
///
/// Rows without an Order ID cannot be grouped and are skipped.
pub fn parse_order_lines<R: std::io::Read>(reader: &mut csv::Reader<R>) -> Result<Vec<OrderLine>> {
    let mut lines = Vec::new();

    for (index, record) in reader.deserialize::<CsvRow>().enumerate() {
        // +2: 1-indexed and the header occupies the first line
        let line_num = index as u64 + 2;
        let row = record?;

        if row.order_id.is_empty() {
            warn!("Line {line_num}: skipping row without Order ID");
            continue;
        }

        let quantity = parse_quantity(&row.quantity).ok_or_else(|| {
            warn!("Line {line_num}: invalid quantity '{}'", row.quantity);
            UploadError::InvalidQuantity {
                line: line_num,
                value: row.quantity.clone(),
            }
        })?;

        debug!(
            "Line {line_num}: order {} offer '{}' version '{}' qty {quantity}",
            row.order_id, row.offer_id, row.version
        );

        lines.push(OrderLine {
            order_id: row.order_id,
            company_name: row.company_name,
            address1: row.address1,
            address2: row.address2,
            address3: row.address3,
            city: row.city,
            state: row.state,
            postal_code: row.postal_code,
            country: row.country,
            offer_id: row.offer_id,
            version: row.version,
            quantity,
            reference: row.reference,
            comments: row.comments,
        });
    }

    info!("Parsed {} order lines", lines.len());
    Ok(lines)
}

/// Parses a quantity cell.
///
/// Empty cells count as zero. Spreadsheet exports write whole numbers as
/// `5.0`, which is accepted; fractional or negative values are not.
pub fn parse_quantity(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0);
    }
    if let Ok(quantity) = trimmed.parse::<u32>() {
        return Some(quantity);
    }

    let value = trimmed.parse::<f64>().ok()?;
    if value.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&value) {
        Some(value as u32)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "order_parser_tests.rs"]
mod tests;
