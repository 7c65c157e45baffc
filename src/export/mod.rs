//! Export surfaces for the consolidated table.
//!
//! Both emit the same two-column table (`SKU`, `Sales`) a ranked view
//! describes: a complete single-sheet XLSX workbook, or CSV text.

mod csv;
mod workbook_writer;

pub use csv::write_csv;
pub use workbook_writer::write_workbook;
