//! Editable allocation rows - the canonical client-side list of investor
//! stakes on one purchase lead.
//!
//! Rows keep percentage and amount as decimal *strings* so partial input like
//! `"12."` survives mid-typing; nothing here enforces bounds. Cross-field
//! validation happens only when a save fires (see [`super::validator`]).

use crate::{
    core::{format_amount, format_percentage, parse_decimal, round_currency, sanitize_decimal},
    errors::{Error, Result},
    models::{AllocationPayload, InvestorProfile, Lead},
};

/// One editable allocation row. Tagged by how much the client knows about
/// the investor: rows hydrated straight from a lead payload are `Unresolved`;
/// once matched against the investor directory they carry the richer
/// `Resolved` shape, which the reconciler is careful never to discard.
#[derive(Clone, Debug, PartialEq)]
pub enum AllocationRow {
    /// Raw allocation from the server, investor not yet looked up
    Unresolved {
        investor_id: String,
        percentage: String,
        amount: String,
    },
    /// Allocation enriched with directory data for display
    Resolved {
        investor_id: String,
        percentage: String,
        amount: String,
        name: String,
        email: Option<String>,
    },
}

impl AllocationRow {
    /// Builds an unresolved row from a server payload entry.
    #[must_use]
    pub fn from_payload(entry: &AllocationPayload) -> Self {
        Self::Unresolved {
            investor_id: entry.investor_id.clone(),
            percentage: format_percentage(entry.percentage),
            amount: format_amount(entry.amount),
        }
    }

    #[must_use]
    pub fn investor_id(&self) -> &str {
        match self {
            Self::Unresolved { investor_id, .. } | Self::Resolved { investor_id, .. } => {
                investor_id
            }
        }
    }

    #[must_use]
    pub fn percentage(&self) -> &str {
        match self {
            Self::Unresolved { percentage, .. } | Self::Resolved { percentage, .. } => percentage,
        }
    }

    #[must_use]
    pub fn amount(&self) -> &str {
        match self {
            Self::Unresolved { amount, .. } | Self::Resolved { amount, .. } => amount,
        }
    }

    pub fn set_percentage(&mut self, value: String) {
        match self {
            Self::Unresolved { percentage, .. } | Self::Resolved { percentage, .. } => {
                *percentage = value;
            }
        }
    }

    pub fn set_amount(&mut self, value: String) {
        match self {
            Self::Unresolved { amount, .. } | Self::Resolved { amount, .. } => *amount = value,
        }
    }

    /// Upgrades an unresolved row with directory data. Resolved rows keep
    /// their existing display fields.
    pub fn resolve(&mut self, profile: &InvestorProfile) {
        if let Self::Unresolved {
            investor_id,
            percentage,
            amount,
        } = self
        {
            let resolved = Self::Resolved {
                investor_id: std::mem::take(investor_id),
                percentage: std::mem::take(percentage),
                amount: std::mem::take(amount),
                name: profile.name.clone(),
                email: profile.email.clone(),
            };
            *self = resolved;
        }
    }

    /// A row is complete when both fields parse to a positive number.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        parse_decimal(self.percentage()).is_some_and(|p| p > 0.0)
            && parse_decimal(self.amount()).is_some_and(|a| a > 0.0)
    }
}

/// Ordered, editable allocation list for one purchase lead.
#[derive(Clone, Debug, Default)]
pub struct AllocationStore {
    rows: Vec<AllocationRow>,
    purchase_price: f64,
}

impl AllocationStore {
    /// Hydrates a store from a server lead record.
    #[must_use]
    pub fn from_lead(lead: &Lead) -> Self {
        Self {
            rows: lead
                .investor_allocations
                .iter()
                .map(AllocationRow::from_payload)
                .collect(),
            purchase_price: lead.purchase_price(),
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[AllocationRow] {
        &self.rows
    }

    #[must_use]
    pub fn purchase_price(&self) -> f64 {
        self.purchase_price
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the list is safe to offer for saving. Every row must be
    /// complete; an empty list *is* complete, so removing the last investor
    /// still persists.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.rows.iter().all(AllocationRow::is_complete)
    }

    /// Replaces the percentage at `index` with the sanitized raw text.
    pub fn set_percentage(&mut self, index: usize, raw: &str) -> Result<()> {
        let row = self
            .rows
            .get_mut(index)
            .ok_or(Error::RowOutOfBounds { index })?;
        row.set_percentage(sanitize_decimal(raw));
        Ok(())
    }

    /// Replaces the amount at `index` with the sanitized raw text.
    pub fn set_amount(&mut self, index: usize, raw: &str) -> Result<()> {
        let row = self
            .rows
            .get_mut(index)
            .ok_or(Error::RowOutOfBounds { index })?;
        row.set_amount(sanitize_decimal(raw));
        Ok(())
    }

    /// Appends a row for `investor`. Defaults when the caller omits values:
    /// percentage = the investor's configured minimum, amount =
    /// `percentage/100 × purchase_price` rounded to two decimals.
    pub fn add(
        &mut self,
        investor: &InvestorProfile,
        percentage: Option<f64>,
        amount: Option<f64>,
    ) -> Result<()> {
        if self.rows.iter().any(|r| r.investor_id() == investor.id) {
            return Err(Error::DuplicateInvestor {
                investor_id: investor.id.clone(),
            });
        }

        let percentage = percentage.unwrap_or_else(|| investor.percentage_range().0);
        let amount = amount.unwrap_or_else(|| {
            if self.purchase_price > 0.0 {
                round_currency(percentage / 100.0 * self.purchase_price)
            } else {
                0.0
            }
        });

        self.rows.push(AllocationRow::Resolved {
            investor_id: investor.id.clone(),
            percentage: format_percentage(percentage),
            amount: format_amount(amount),
            name: investor.name.clone(),
            email: investor.email.clone(),
        });
        Ok(())
    }

    /// Removes the row for `investor_id`; returns whether a row was removed.
    pub fn remove(&mut self, investor_id: &str) -> bool {
        let before = self.rows.len();
        self.rows.retain(|r| r.investor_id() != investor_id);
        self.rows.len() != before
    }

    /// Replaces the row list wholesale; used by the reconciler after a save.
    pub fn replace_rows(&mut self, rows: Vec<AllocationRow>) {
        self.rows = rows;
    }

    /// Updates the cached purchase price from a fresh lead record.
    pub fn set_purchase_price(&mut self, price: f64) {
        self.purchase_price = price;
    }

    /// Upgrades every row the directory knows about to the resolved shape.
    pub fn resolve_all(&mut self, investors: &[InvestorProfile]) {
        for row in &mut self.rows {
            if let Some(profile) = investors.iter().find(|i| i.id == row.investor_id()) {
                row.resolve(profile);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{bounded_investor, lead_with_allocations, unbounded_investor};

    #[test]
    fn test_add_defaults_from_investor_minimum() {
        // purchasePrice = 100000, min = 10 -> {"10", "10000.00"}
        let lead = lead_with_allocations("lead-1", 100_000.0, &[]);
        let mut store = AllocationStore::from_lead(&lead);
        let investor = bounded_investor("inv-1", 10.0, 50.0);

        store.add(&investor, None, None).unwrap();

        assert_eq!(store.len(), 1);
        let row = &store.rows()[0];
        assert_eq!(row.percentage(), "10");
        assert_eq!(row.amount(), "10000.00");
        assert!(matches!(row, AllocationRow::Resolved { .. }));
    }

    #[test]
    fn test_add_without_price_defaults_amount_to_zero() {
        let lead = lead_with_allocations("lead-1", 0.0, &[]);
        let mut store = AllocationStore::from_lead(&lead);

        store
            .add(&bounded_investor("inv-1", 10.0, 50.0), None, None)
            .unwrap();

        assert_eq!(store.rows()[0].amount(), "0.00");
        assert!(!store.is_complete());
    }

    #[test]
    fn test_add_rejects_duplicate_investor() {
        let lead = lead_with_allocations("lead-1", 100_000.0, &[]);
        let mut store = AllocationStore::from_lead(&lead);
        let investor = unbounded_investor("inv-1");

        store.add(&investor, Some(20.0), Some(20_000.0)).unwrap();
        let err = store.add(&investor, Some(5.0), None).unwrap_err();

        assert!(matches!(err, Error::DuplicateInvestor { investor_id } if investor_id == "inv-1"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_set_percentage_sanitizes_raw_text() {
        let lead = lead_with_allocations("lead-1", 100_000.0, &[("inv-1", 10.0, 10_000.0)]);
        let mut store = AllocationStore::from_lead(&lead);

        store.set_percentage(0, "12.x").unwrap();
        assert_eq!(store.rows()[0].percentage(), "12.");

        store.set_amount(0, "$12,500.00").unwrap();
        assert_eq!(store.rows()[0].amount(), "12500.00");
    }

    #[test]
    fn test_set_percentage_out_of_bounds() {
        let mut store = AllocationStore::default();
        let err = store.set_percentage(3, "10").unwrap_err();
        assert!(matches!(err, Error::RowOutOfBounds { index: 3 }));
    }

    #[test]
    fn test_remove_filters_row() {
        let lead = lead_with_allocations(
            "lead-1",
            100_000.0,
            &[("inv-1", 10.0, 10_000.0), ("inv-2", 20.0, 20_000.0)],
        );
        let mut store = AllocationStore::from_lead(&lead);

        assert!(store.remove("inv-1"));
        assert!(!store.remove("inv-1"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.rows()[0].investor_id(), "inv-2");
    }

    #[test]
    fn test_empty_list_is_complete() {
        let store = AllocationStore::default();
        assert!(store.is_complete());
    }

    #[test]
    fn test_blank_amount_makes_list_incomplete() {
        let lead = lead_with_allocations("lead-1", 100_000.0, &[("inv-1", 10.0, 10_000.0)]);
        let mut store = AllocationStore::from_lead(&lead);
        assert!(store.is_complete());

        store.set_amount(0, "").unwrap();
        assert!(!store.is_complete());

        store.set_amount(0, "9000").unwrap();
        assert!(store.is_complete());
    }

    #[test]
    fn test_resolve_all_upgrades_known_rows() {
        let lead = lead_with_allocations(
            "lead-1",
            100_000.0,
            &[("inv-1", 10.0, 10_000.0), ("inv-9", 5.0, 5_000.0)],
        );
        let mut store = AllocationStore::from_lead(&lead);
        store.resolve_all(&[unbounded_investor("inv-1")]);

        assert!(matches!(store.rows()[0], AllocationRow::Resolved { .. }));
        assert!(matches!(store.rows()[1], AllocationRow::Unresolved { .. }));
        // Numeric fields survive the upgrade
        assert_eq!(store.rows()[0].percentage(), "10");
        assert_eq!(store.rows()[0].amount(), "10000.00");
    }
}
