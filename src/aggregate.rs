//! Aggregator - folds scanned entries into per-SKU running totals.

use crate::types::{SalesEntry, SalesTotals};

/// Fold one file's entries into the running totals.
///
/// Entries must arrive in the order the scanner produced them, files in
/// upload order, so the first-seen order behind ranking's tie-break is
/// reproducible. Totals use plain f64 addition; very large volumes can
/// accumulate floating-point rounding error (accepted non-goal).
pub fn fold(totals: &mut SalesTotals, entries: &[SalesEntry]) {
    for entry in entries {
        totals.add(&entry.sku, entry.amount);
    }
}
