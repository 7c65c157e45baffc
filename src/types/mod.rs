//! Core data types shared across the crate.

mod cell;
mod sales;

pub use cell::{Cell, Row, Sheet};
pub use sales::{ChartSeries, RankedEntry, RankedView, SalesEntry, SalesTotals};
