//! Merging the server's canonical allocation list back into local rows.
//!
//! After a successful save the backend returns the authoritative list. Rows
//! the client had already resolved against the investor directory must keep
//! their display fields - replacing them wholesale would flicker names and
//! emails back to blank until the next directory fetch.

use crate::{
    core::{format_amount, format_percentage},
    core::store::AllocationRow,
    models::AllocationPayload,
};

/// Merges `server` (authoritative, in server order) into `local`:
/// - present in both: keep the local shape, update only percentage/amount;
/// - new in the payload: adopt as an unresolved row;
/// - absent from the payload: dropped.
#[must_use]
pub fn merge_allocations(local: &[AllocationRow], server: &[AllocationPayload]) -> Vec<AllocationRow> {
    server
        .iter()
        .map(|entry| {
            match local.iter().find(|row| row.investor_id() == entry.investor_id) {
                Some(existing) => {
                    let mut merged = existing.clone();
                    merged.set_percentage(format_percentage(entry.percentage));
                    merged.set_amount(format_amount(entry.amount));
                    merged
                }
                None => AllocationRow::from_payload(entry),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{payload, resolved_row};

    #[test]
    fn test_merge_keeps_resolved_shape_and_updates_numbers() {
        let local = vec![resolved_row("inv-1", "10", "10000.00", "Ada Lovelace")];
        let server = vec![payload("inv-1", 12.5, 12_500.0)];

        let merged = merge_allocations(&local, &server);

        assert_eq!(merged.len(), 1);
        match &merged[0] {
            AllocationRow::Resolved {
                percentage,
                amount,
                name,
                ..
            } => {
                assert_eq!(percentage, "12.5");
                assert_eq!(amount, "12500.00");
                assert_eq!(name, "Ada Lovelace");
            }
            AllocationRow::Unresolved { .. } => panic!("resolved row lost its shape"),
        }
    }

    #[test]
    fn test_merge_adopts_new_server_rows_as_unresolved() {
        let local = vec![resolved_row("inv-1", "10", "10000.00", "Ada Lovelace")];
        let server = vec![
            payload("inv-1", 10.0, 10_000.0),
            payload("inv-2", 5.0, 5_000.0),
        ];

        let merged = merge_allocations(&local, &server);

        assert_eq!(merged.len(), 2);
        assert!(matches!(merged[1], AllocationRow::Unresolved { .. }));
        assert_eq!(merged[1].investor_id(), "inv-2");
    }

    #[test]
    fn test_merge_drops_rows_missing_from_payload() {
        let local = vec![
            resolved_row("inv-1", "10", "10000.00", "Ada Lovelace"),
            resolved_row("inv-2", "5", "5000.00", "Grace Hopper"),
        ];
        let server = vec![payload("inv-2", 5.0, 5_000.0)];

        let merged = merge_allocations(&local, &server);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].investor_id(), "inv-2");
    }

    #[test]
    fn test_merge_follows_server_order() {
        let local = vec![
            resolved_row("inv-1", "10", "10000.00", "Ada Lovelace"),
            resolved_row("inv-2", "5", "5000.00", "Grace Hopper"),
        ];
        let server = vec![
            payload("inv-2", 5.0, 5_000.0),
            payload("inv-1", 10.0, 10_000.0),
        ];

        let merged = merge_allocations(&local, &server);
        assert_eq!(merged[0].investor_id(), "inv-2");
        assert_eq!(merged[1].investor_id(), "inv-1");
    }

    #[test]
    fn test_merge_empty_payload_clears_local() {
        let local = vec![resolved_row("inv-1", "10", "10000.00", "Ada Lovelace")];
        assert!(merge_allocations(&local, &[]).is_empty());
    }
}
