//! Request payloads for the VeraCore APIs.
//!
//! - [`add_order`] - SOAP envelope for the AddOrder endpoint
//! - [`change_version`] - JSON body for the REST version/quantity update

pub mod add_order;
pub mod change_version;

pub use add_order::{build_add_order_envelope, redact_envelope};
pub use change_version::{build_change_version_request, ChangeVersionProduct, ChangeVersionRequest};

use crate::models::ConsolidatedOrder;

/// Maximum length, in characters, of the joined reference number field.
pub const REFERENCE_NUMBER_LIMIT: usize = 50;

/// Escapes text for use inside an XML element.
///
/// `&` is replaced first so the entities produced for `<` and `>` are not
/// escaped again.
pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Decodes the predefined XML entities and numeric character references in
/// one pass, so `&amp;lt;` becomes `&lt;`. Anything that is not a known
/// entity is kept as written.
pub fn unescape_xml(text: &str) -> String {
    let mut decoded = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        decoded.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let entity = tail
            .find(';')
            .filter(|&end| end <= 10)
            .and_then(|end| decode_entity(&tail[1..end]).map(|c| (c, end)));
        match entity {
            Some((c, end)) => {
                decoded.push(c);
                rest = &tail[end + 1..];
            }
            None => {
                decoded.push('&');
                rest = &tail[1..];
            }
        }
    }

    decoded.push_str(rest);
    decoded
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let number = name.strip_prefix('#')?;
            let hex = number.strip_prefix('x').or_else(|| number.strip_prefix('X'));
            let code = match hex {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Joins the order's reference numbers into the AddOrder reference field.
///
/// References are taken from the offers in order, skipping empty values and
/// duplicates, and joined with `,`. A reference is only appended whole, and
/// only while the result stays within [`REFERENCE_NUMBER_LIMIT`]
/// characters; once one does not fit, it and all later references are
/// dropped. A first reference that is longer than the limit on its own is
/// cut to the limit.
pub fn join_reference_numbers(order: &ConsolidatedOrder) -> String {
    let mut seen: Vec<&str> = Vec::new();
    for offer in &order.offers {
        let reference = offer.reference.as_str();
        if !reference.is_empty() && !seen.contains(&reference) {
            seen.push(reference);
        }
    }

    let mut joined = String::new();
    let mut joined_len = 0;
    for reference in seen {
        let reference_len = reference.chars().count();
        if joined.is_empty() {
            if reference_len > REFERENCE_NUMBER_LIMIT {
                return reference.chars().take(REFERENCE_NUMBER_LIMIT).collect();
            }
            joined.push_str(reference);
            joined_len = reference_len;
            continue;
        }

        if joined_len + 1 + reference_len > REFERENCE_NUMBER_LIMIT {
            log::debug!(
                "Order {}: reference '{reference}' exceeds the {REFERENCE_NUMBER_LIMIT} character limit, dropping remaining references",
                order.order_id
            );
            break;
        }
        joined.push(',');
        joined.push_str(reference);
        joined_len += 1 + reference_len;
    }

    joined
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
