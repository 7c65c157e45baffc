//! Ranker - deterministic descending-by-amount views over final totals.

use std::cmp::Ordering;

use crate::types::{RankedEntry, RankedView, SalesTotals};

/// Produce the full ranked view of a batch's totals.
///
/// Amount descending, numeric comparison. The sort is stable over the
/// totals' first-seen iteration order, so equal amounts keep the relative
/// order their SKUs were first encountered in — identical input always
/// produces an identical ranking. An empty mapping yields an empty view.
pub fn rank(totals: &SalesTotals) -> RankedView {
    let mut entries: Vec<RankedEntry> = totals
        .iter()
        .map(|(sku, amount)| RankedEntry {
            sku: sku.to_string(),
            amount,
        })
        .collect();

    // Amounts are always finite (the scanner guarantees it), so
    // partial_cmp only falls back on the tie path.
    entries.sort_by(|a, b| b.amount.partial_cmp(&a.amount).unwrap_or(Ordering::Equal));

    RankedView { entries }
}
