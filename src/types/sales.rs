use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

/// One validated (SKU, amount) pair extracted from a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesEntry {
    pub sku: String,
    pub amount: f64,
}

impl SalesEntry {
    pub fn new(sku: impl Into<String>, amount: f64) -> Self {
        Self {
            sku: sku.into(),
            amount,
        }
    }
}

/// Cumulative sales per SKU for one batch.
///
/// Iteration order is first-insertion order — the order SKUs were first seen
/// during extraction — which is what ranking uses to break ties. Rebuilt from
/// empty for every batch; nothing carries over between batches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesTotals {
    entries: Vec<(String, f64)>,
    index: HashMap<String, usize>,
}

impl SalesTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to the running total for `sku`, inserting at zero first
    /// if the SKU has not been seen in this batch.
    pub fn add(&mut self, sku: &str, amount: f64) {
        if let Some(&slot) = self.index.get(sku) {
            if let Some(entry) = self.entries.get_mut(slot) {
                entry.1 += amount;
            }
        } else {
            self.index.insert(sku.to_string(), self.entries.len());
            self.entries.push((sku.to_string(), amount));
        }
    }

    /// Current total for a SKU, if it has been seen.
    pub fn get(&self, sku: &str) -> Option<f64> {
        self.index
            .get(sku)
            .and_then(|&slot| self.entries.get(slot))
            .map(|(_, total)| *total)
    }

    /// (SKU, total) pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(sku, total)| (sku.as_str(), *total))
    }

    /// Number of distinct SKUs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for SalesTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (sku, total) in &self.entries {
            map.serialize_entry(sku, total)?;
        }
        map.end()
    }
}

/// One row of a ranked table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub sku: String,
    pub amount: f64,
}

/// SKUs ordered by total sales, highest first.
///
/// Derived fresh from a final [`SalesTotals`] and never mutated in place.
/// Ties keep first-seen order, so identical input always ranks identically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankedView {
    pub entries: Vec<RankedEntry>,
}

impl RankedView {
    /// Prefix of at most `n` entries. Assumes the view is already sorted;
    /// never re-sorts.
    pub fn top_n(&self, n: usize) -> RankedView {
        RankedView {
            entries: self.entries.iter().take(n).cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankedEntry> {
        self.entries.iter()
    }
}

/// Parallel label/value arrays in ranked order, the payload a chart renderer
/// consumes (bar or pie alike).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn from_view(view: &RankedView) -> Self {
        Self {
            labels: view.iter().map(|e| e.sku.clone()).collect(),
            values: view.iter().map(|e| e.amount).collect(),
        }
    }
}
