//! Wire records for the purchases backend REST contract.
//!
//! The backend speaks camelCase JSON; every record here is a direct serde
//! mapping of the fields this client reads or writes. The backend owns the
//! authoritative shapes; nothing here is persisted locally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One investor's sanitized stake in a purchase, as sent to and returned by
/// the backend. Percentage and amount are numbers on the wire; the editable
/// string form lives in [`crate::core::store::AllocationRow`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationPayload {
    /// Stable foreign key into the backend's investor directory
    pub investor_id: String,
    /// Share of the purchase, 0-100
    pub percentage: f64,
    /// Funded amount in dollars
    pub amount: f64,
}

/// Pricing subtree of a lead; only the final purchase price matters here.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceAnalysis {
    /// Agreed purchase price in dollars; absent until pricing is decided
    #[serde(default)]
    pub purchased_final_price: Option<f64>,
}

/// A purchase lead as returned by `GET /purchases/leads/{id}` and by the
/// allocation PUT. Fields the client never touches are omitted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    /// Lead identifier
    pub id: String,
    #[serde(default)]
    pub price_analysis: PriceAnalysis,
    /// Canonical allocation list for this lead
    #[serde(default)]
    pub investor_allocations: Vec<AllocationPayload>,
    /// Server-side modification timestamp
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Lead {
    /// The purchase price used for amount derivation and overflow checks.
    /// Zero means "not priced yet" and disables the price-relative checks.
    #[must_use]
    pub fn purchase_price(&self) -> f64 {
        self.price_analysis.purchased_final_price.unwrap_or(0.0)
    }
}

/// Read-only reference record from `GET /purchases/investors`. Supplies the
/// configured percentage band used for range validation and the credit fields
/// shown in the funding-stat tiles.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorProfile {
    /// Investor identifier, matched against `AllocationPayload::investor_id`
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Lower bound of the investor's allowed percentage, if configured
    #[serde(default)]
    pub decided_percentage_min: Option<f64>,
    /// Upper bound of the investor's allowed percentage, if configured
    #[serde(default)]
    pub decided_percentage_max: Option<f64>,
    /// Total credit extended to this investor, in dollars
    #[serde(default)]
    pub credit_limit: Option<f64>,
    /// Credit currently tied up in open purchases, in dollars
    #[serde(default)]
    pub credit_utilized: Option<f64>,
}

impl InvestorProfile {
    /// The `[min, max]` percentage band for validation, defaulting to the
    /// full `[0, 100]` range when the investor has no configured band.
    #[must_use]
    pub fn percentage_range(&self) -> (f64, f64) {
        (
            self.decided_percentage_min.unwrap_or(0.0),
            self.decided_percentage_max.unwrap_or(100.0),
        )
    }
}

/// Body of `PUT /purchases/leads/{id}/investor`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PutAllocationsBody {
    pub investor_allocations: Vec<AllocationPayload>,
}

/// Error contract: any non-2xx response carries a human-readable `message`.
#[derive(Clone, Debug, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}
