//! Funding-stat aggregates shown alongside the allocation rows.
//!
//! Computed best-effort from the editable strings: a half-typed field simply
//! contributes zero until it parses. Nothing here gates saving - these are
//! display numbers only.

use crate::{
    core::parse_decimal,
    core::store::AllocationRow,
    models::InvestorProfile,
};

/// Aggregate funding position for one lead.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FundingStats {
    /// Sum of all parseable row percentages
    pub allocated_percentage: f64,
    /// Sum of all parseable row amounts, in dollars
    pub allocated_amount: f64,
    /// Percentage still unallocated (never below zero)
    pub remaining_percentage: f64,
    /// Purchase price not yet covered (never below zero)
    pub remaining_amount: f64,
    /// Number of allocation rows
    pub investor_count: usize,
}

impl FundingStats {
    /// Computes the funding position from the current rows and price.
    #[must_use]
    pub fn compute(rows: &[AllocationRow], purchase_price: f64) -> Self {
        let allocated_percentage: f64 = rows
            .iter()
            .filter_map(|r| parse_decimal(r.percentage()))
            .sum();
        let allocated_amount: f64 = rows
            .iter()
            .filter_map(|r| parse_decimal(r.amount()))
            .sum();

        Self {
            allocated_percentage,
            allocated_amount,
            remaining_percentage: (100.0 - allocated_percentage).max(0.0),
            remaining_amount: (purchase_price - allocated_amount).max(0.0),
            investor_count: rows.len(),
        }
    }
}

/// Credit an investor can still commit: `credit_limit - credit_utilized`.
/// `None` when the directory record carries no limit.
#[must_use]
pub fn available_credit(investor: &InvestorProfile) -> Option<f64> {
    investor
        .credit_limit
        .map(|limit| limit - investor.credit_utilized.unwrap_or(0.0))
}
