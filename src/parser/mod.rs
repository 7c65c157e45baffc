//! Minimal XLSX reader.
//!
//! Extracts the first worksheet of a workbook as ordered rows of raw cells.
//! Styles, themes, merges and everything else a viewer would care about are
//! ignored — consolidation only needs values in their original positions.

mod relationships;
mod worksheet;

use std::io::Cursor;
use zip::ZipArchive;

use crate::error::Result;
use crate::types::Sheet;

use relationships::{first_sheet_path, parse_shared_strings, parse_workbook_relationships};
use worksheet::parse_sheet;

/// Parse XLSX bytes and return the workbook's first sheet.
///
/// # Errors
/// Returns an error if the archive or its XML parts are unreadable, or if
/// the workbook declares no sheets.
pub fn parse_first_sheet(data: &[u8]) -> Result<Sheet> {
    let cursor = Cursor::new(data);
    let mut archive = ZipArchive::new(cursor)?;

    // Relationships first to resolve the sheet's actual part path.
    let relationships = parse_workbook_relationships(&mut archive);
    let sheet_path = first_sheet_path(&mut archive, &relationships)?;
    let shared_strings = parse_shared_strings(&mut archive);

    parse_sheet(&mut archive, &sheet_path, &shared_strings)
}
