//! Save-time validation of a complete allocation list.
//!
//! Runs only at the point a save actually fires, never per keystroke. The
//! checks here are advisory - the backend re-validates authoritatively - but
//! they keep obviously broken lists from ever leaving the client. On success
//! the sanitized numeric payload for the PUT is returned; on failure nothing
//! is mutated.

use crate::{
    core::{AGGREGATE_EPSILON, parse_decimal, round_currency},
    core::store::AllocationRow,
    errors::{Error, Result},
    models::{AllocationPayload, InvestorProfile},
};

/// Validates `rows` against the investor directory and the lead's purchase
/// price, returning the payload to persist.
///
/// Per row: percentage must parse positive and sit inside the investor's
/// configured `[min, max]` band (`[0, 100]` when unconfigured); a blank
/// amount is derived as `round2(percentage/100 × purchase_price)` when the
/// lead is priced, otherwise zero; an explicit amount must parse positive and
/// may not exceed the purchase price. Aggregates may exceed their bound by at
/// most [`AGGREGATE_EPSILON`] to tolerate floating-point drift.
///
/// A `purchase_price` of zero means the lead is not priced yet and disables
/// every price-relative check.
pub fn validate_allocations(
    rows: &[AllocationRow],
    investors: &[InvestorProfile],
    purchase_price: f64,
) -> Result<Vec<AllocationPayload>> {
    let mut payload = Vec::with_capacity(rows.len());
    let mut total_percentage = 0.0;
    let mut total_amount = 0.0;

    for row in rows {
        let percentage = parse_decimal(row.percentage())
            .filter(|p| *p > 0.0)
            .ok_or_else(|| Error::InvalidPercentage {
                raw: row.percentage().to_string(),
            })?;

        let (min, max) = investors
            .iter()
            .find(|i| i.id == row.investor_id())
            .map_or((0.0, 100.0), InvestorProfile::percentage_range);
        if percentage < min || percentage > max {
            return Err(Error::OutOfRange {
                investor_id: row.investor_id().to_string(),
                percentage,
                min,
                max,
            });
        }

        let amount = if row.amount().trim().is_empty() {
            if purchase_price > 0.0 {
                round_currency(percentage / 100.0 * purchase_price)
            } else {
                0.0
            }
        } else {
            parse_decimal(row.amount())
                .filter(|a| *a > 0.0)
                .ok_or_else(|| Error::InvalidAmount {
                    raw: row.amount().to_string(),
                })?
        };

        if purchase_price > 0.0 && amount > purchase_price {
            return Err(Error::AmountExceedsPrice {
                amount,
                price: purchase_price,
            });
        }

        total_percentage += percentage;
        total_amount += amount;
        payload.push(AllocationPayload {
            investor_id: row.investor_id().to_string(),
            percentage,
            amount,
        });
    }

    if total_percentage > 100.0 + AGGREGATE_EPSILON {
        return Err(Error::PercentageOverflow {
            total: total_percentage,
        });
    }
    if purchase_price > 0.0 && total_amount > purchase_price + AGGREGATE_EPSILON {
        return Err(Error::AmountOverflow {
            total: total_amount,
            price: purchase_price,
        });
    }

    Ok(payload)
}
