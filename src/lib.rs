//! skuroll - SKU sales consolidation from POS spreadsheet exports
//!
//! Reads one or more XLSX exports with an unstructured row/column layout,
//! extracts (SKU, sales) pairs, aggregates per-SKU totals across all files
//! and derives deterministic ranked views:
//! - Tolerant pairwise extraction (invalid pairs are skipped, never fatal)
//! - Stable, reproducible ranking with first-seen tie-break
//! - Chart-ready top-N label/value series
//! - Consolidated XLSX and CSV export
//!
//! # Usage
//!
//! ```no_run
//! use skuroll::{consolidate_paths, rank, ChartSeries};
//!
//! let totals = consolidate_paths(&["pos_jan.xlsx", "pos_feb.xlsx"])?;
//! let view = rank(&totals);
//! let top10 = view.top_n(10);
//! let series = ChartSeries::from_view(&top10);
//! # Ok::<(), skuroll::SkurollError>(())
//! ```

pub mod aggregate;
pub mod batch;
pub mod cell_ref;
pub mod error;
pub mod export;
pub mod parser;
pub mod rank;
pub mod scan;
pub mod types;

pub use batch::{consolidate_paths, extract};
pub use error::{Result, SkurollError};
pub use rank::rank;
pub use scan::scan;
pub use types::*;

/// Get the library version
#[must_use]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
