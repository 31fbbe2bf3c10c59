//! Shared test utilities for `leadstake`.
//!
//! Common helpers for building investors, rows, leads, and mock-backed API
//! clients with sensible defaults.

use crate::{
    api::ApiClient,
    config::AppConfig,
    core::store::AllocationRow,
    models::{AllocationPayload, InvestorProfile, Lead, PriceAnalysis},
};

/// An investor with no configured percentage band (validates against
/// `[0, 100]`). Name is `"Investor {id}"`.
pub fn unbounded_investor(id: &str) -> InvestorProfile {
    InvestorProfile {
        id: id.to_string(),
        name: format!("Investor {id}"),
        ..Default::default()
    }
}

/// An investor with a configured `[min, max]` percentage band.
pub fn bounded_investor(id: &str, min: f64, max: f64) -> InvestorProfile {
    InvestorProfile {
        decided_percentage_min: Some(min),
        decided_percentage_max: Some(max),
        ..unbounded_investor(id)
    }
}

/// An unresolved row with the given editable field texts.
pub fn row(investor_id: &str, percentage: &str, amount: &str) -> AllocationRow {
    AllocationRow::Unresolved {
        investor_id: investor_id.to_string(),
        percentage: percentage.to_string(),
        amount: amount.to_string(),
    }
}

/// A resolved row carrying display fields.
pub fn resolved_row(investor_id: &str, percentage: &str, amount: &str, name: &str) -> AllocationRow {
    AllocationRow::Resolved {
        investor_id: investor_id.to_string(),
        percentage: percentage.to_string(),
        amount: amount.to_string(),
        name: name.to_string(),
        email: None,
    }
}

/// A sanitized server payload entry.
pub fn payload(investor_id: &str, percentage: f64, amount: f64) -> AllocationPayload {
    AllocationPayload {
        investor_id: investor_id.to_string(),
        percentage,
        amount,
    }
}

/// A lead record with the given price (zero means unpriced) and allocations
/// as `(investor_id, percentage, amount)` triples.
pub fn lead_with_allocations(id: &str, price: f64, allocations: &[(&str, f64, f64)]) -> Lead {
    Lead {
        id: id.to_string(),
        price_analysis: PriceAnalysis {
            purchased_final_price: (price > 0.0).then_some(price),
        },
        investor_allocations: allocations
            .iter()
            .map(|(inv, p, a)| payload(inv, *p, *a))
            .collect(),
        updated_at: None,
    }
}

/// The JSON form of [`lead_with_allocations`], for mock server responses.
pub fn lead_json(id: &str, price: f64, allocations: &[(&str, f64, f64)]) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "priceAnalysis": {
            "purchasedFinalPrice": (price > 0.0).then_some(price),
        },
        "investorAllocations": allocations
            .iter()
            .map(|(inv, p, a)| serde_json::json!({
                "investorId": inv,
                "percentage": p,
                "amount": a,
            }))
            .collect::<Vec<_>>(),
    })
}

/// An API client pointed at a mock server, with a short request timeout.
pub fn test_client(base_url: &str) -> ApiClient {
    let config = AppConfig {
        api_base_url: base_url.to_string(),
        debounce_delay_ms: 600,
        request_timeout_secs: 5,
    };
    ApiClient::new(&config).expect("test client builds")
}
