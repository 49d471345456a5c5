//! SOAP envelope for the VeraCore AddOrder endpoint.

use chrono::NaiveDateTime;
use log::debug;

use crate::models::{ConsolidatedOrder, Credentials, OfferLine};

use super::{escape_xml, join_reference_numbers};

/// Namespace of the VeraCore order management service.
pub const OMS_NAMESPACE: &str = "http://omscom/";

/// Renders the AddOrder request for one consolidated order.
///
/// Offers without an Offer ID are left out of the `<Offers>` list.
pub fn build_add_order_envelope(
    order: &ConsolidatedOrder,
    credentials: &Credentials,
    entry_date: NaiveDateTime,
) -> String {
    let offers: String = order
        .offers
        .iter()
        .filter(|offer| {
            let keep = !offer.offer_id.is_empty();
            if !keep {
                debug!(
                    "Order {}: skipping offer without Offer ID (qty {})",
                    order.order_id, offer.quantity
                );
            }
            keep
        })
        .map(offer_ordered_xml)
        .collect();

    let ship_to = &order.ship_to;

    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xsd="http://www.w3.org/2001/XMLSchema">
  <soap:Header>
    <AuthenticationHeader xmlns="{ns}">
      <Username>{username}</Username>
      <Password>{password}</Password>
    </AuthenticationHeader>
  </soap:Header>
  <soap:Body>
    <AddOrder xmlns="{ns}">
      <order>
        <Header>
          <ID>{order_id}</ID>
          <EntryDate>{entry_date}</EntryDate>
          <Comments>{comments}</Comments>
          <ReferenceNumber>{reference}</ReferenceNumber>
        </Header>
        <Money></Money>
        <Payment></Payment>
        <OrderedBy>
          <CompanyName>{company}</CompanyName>
          <Address1>{address1}</Address1>
          <Address2>{address2}</Address2>
          <Address3>{address3}</Address3>
          <City>{city}</City>
          <State>{state}</State>
          <PostalCode>{postal_code}</PostalCode>
          <Country>{country}</Country>
        </OrderedBy>
        <ShipTo>
          <OrderShipTo>
            <Flag>OrderedBy</Flag>
            <Key>1</Key>
          </OrderShipTo>
        </ShipTo>
        <BillTo>
          <Flag>OrderedBy</Flag>
        </BillTo>
        <Offers>{offers}
        </Offers>
      </order>
    </AddOrder>
  </soap:Body>
</soap:Envelope>
"#,
        ns = OMS_NAMESPACE,
        username = escape_xml(&credentials.username),
        password = escape_xml(&credentials.password),
        order_id = escape_xml(&order.order_id),
        entry_date = entry_date.format("%Y-%m-%dT%H:%M:%S"),
        comments = escape_xml(&order.comments),
        reference = escape_xml(&join_reference_numbers(order)),
        company = escape_xml(&ship_to.company_name),
        address1 = escape_xml(&ship_to.address1),
        address2 = escape_xml(&ship_to.address2),
        address3 = escape_xml(&ship_to.address3),
        city = escape_xml(&ship_to.city),
        state = escape_xml(&ship_to.state),
        postal_code = escape_xml(&ship_to.postal_code),
        country = escape_xml(&ship_to.country),
        offers = offers,
    )
}

/// The envelope with the password element masked, for logging.
pub fn redact_envelope(envelope: &str) -> String {
    const OPEN: &str = "<Password>";
    const CLOSE: &str = "</Password>";

    match (envelope.find(OPEN), envelope.find(CLOSE)) {
        (Some(start), Some(end)) if start < end => format!(
            "{}{OPEN}***{}",
            &envelope[..start],
            &envelope[end..]
        ),
        _ => envelope.to_string(),
    }
}

fn offer_ordered_xml(offer: &OfferLine) -> String {
    format!(
        r#"
          <OfferOrdered>
            <Offer>
              <Header>
                <ID>{offer_id}</ID>
              </Header>
            </Offer>
            <Quantity>{quantity}</Quantity>
            <OrderShipTo>
              <Key>1</Key>
            </OrderShipTo>
          </OfferOrdered>"#,
        offer_id = escape_xml(&offer.offer_id),
        quantity = offer.quantity,
    )
}

#[cfg(test)]
#[path = "add_order_tests.rs"]
mod tests;
