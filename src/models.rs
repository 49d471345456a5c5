use serde::Deserialize;

/// Columns every upload must carry. Order is the order they are reported in
/// when missing; the CSV itself may arrange them freely.
pub const REQUIRED_HEADERS: [&str; 14] = [
    "Order ID",
    "Company Name",
    "Address 1",
    "Address 2",
    "Address 3",
    "City",
    "State",
    "Postal Code",
    "Country",
    "Offer ID",
    "Version",
    "Quantity",
    "Reference #",
    "Order Comments",
];

/// VeraCore web user used for both the SOAP and the REST API.
#[derive(Clone, Default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// One raw row of the uploaded CSV.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderLine {
    pub order_id: String,
    pub company_name: String,
    pub address1: String,
    pub address2: String,
    pub address3: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub offer_id: String,
    pub version: String,
    pub quantity: u32,
    pub reference: String,
    pub comments: String,
}

impl OrderLine {
    pub fn ship_to(&self) -> ShipTo {
        ShipTo {
            company_name: self.company_name.clone(),
            address1: self.address1.clone(),
            address2: self.address2.clone(),
            address3: self.address3.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            postal_code: self.postal_code.clone(),
            country: self.country.clone(),
        }
    }
}

/// Shipping and billing address of an order. VeraCore bills to the same
/// address it ships to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShipTo {
    pub company_name: String,
    pub address1: String,
    pub address2: String,
    pub address3: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

/// An offer after consolidation: quantities of all matching lines summed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferLine {
    pub offer_id: String,
    pub version: String,
    pub quantity: u32,
    pub reference: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsolidatedOrder {
    pub order_id: String,
    pub ship_to: ShipTo,
    pub comments: String,
    pub offers: Vec<OfferLine>,
}

impl ConsolidatedOrder {
    /// The version shared by the order's offers, or an empty string when no
    /// offer carries one.
    pub fn version(&self) -> &str {
        self.offers
            .iter()
            .map(|offer| offer.version.as_str())
            .find(|version| !version.is_empty())
            .unwrap_or("")
    }
}

/// Row of the "Summarized Order Upload" overview shown before submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSummaryRow {
    pub order_id: String,
    pub offer_id: String,
    pub version: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Validation,
    Creation,
    Update,
    InvalidCredentials,
    Transport,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Validation => "validation",
            FailureKind::Creation => "order creation",
            FailureKind::Update => "version update",
            FailureKind::InvalidCredentials => "credentials",
            FailureKind::Transport => "transport",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// AddOrder accepted the order and the version update succeeded.
    Created,
    /// AddOrder reported a duplicate; the existing order was updated instead.
    UpdatedExisting,
    /// Dry run, nothing was sent.
    Simulated,
    Failed { kind: FailureKind, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    pub order_id: String,
    pub company_name: String,
    pub outcome: SubmissionOutcome,
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        !matches!(self.outcome, SubmissionOutcome::Failed { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            SubmissionOutcome::Failed { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Outcome of a whole submission run.
#[derive(Debug, Clone, Default)]
pub struct SubmissionSummary {
    pub results: Vec<SubmissionResult>,
    /// Set when the REST login answered 403 for any order.
    pub credentials_rejected: bool,
}

impl SubmissionSummary {
    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.results.len() - self.success_count()
    }
}

/// Body of a successful REST login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "Token")]
    pub token: String,
}

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;
