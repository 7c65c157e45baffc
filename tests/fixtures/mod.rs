//! Test fixtures for generating valid XLSX files in memory.
//!
//! Provides a small builder for creating POS-export-shaped workbooks
//! programmatically, so the consolidation pipeline can be tested against
//! real archive bytes with known contents.
//!
//! # Example
//!
//! ```rust
//! use fixtures::{CellValue, XlsxBuilder};
//!
//! let xlsx = XlsxBuilder::new()
//!     .sheet("Sheet1")
//!     .row(vec!["SKU1".into(), 10.0.into(), "SKU2".into(), 5.0.into()])
//!     .build();
//!
//! let sheet = skuroll::parser::parse_first_sheet(&xlsx).unwrap();
//! ```
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation
)]

use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::ZipWriter;

// ============================================================================
// Cell Value
// ============================================================================

/// Represents a cell value that can be added to a sheet row.
#[derive(Debug, Clone)]
pub enum CellValue {
    /// A string value stored in the shared string table.
    String(String),
    /// A numeric value.
    Number(f64),
    /// A boolean value.
    Boolean(bool),
    /// An error value (e.g., "#DIV/0!").
    Error(String),
    /// An inline string (not shared).
    InlineString(String),
    /// An empty cell: a `<c/>` element with no value.
    Empty,
    /// No cell element at all at this position (a hole in the row).
    Missing,
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(f64::from(n))
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

// ============================================================================
// Sheet Builder
// ============================================================================

/// Builder for a single worksheet: ordered rows of cell values.
#[derive(Debug, Clone, Default)]
pub struct SheetBuilder {
    pub name: String,
    pub rows: Vec<Vec<CellValue>>,
}

impl SheetBuilder {
    /// Create a new sheet builder with the given name.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rows: Vec::new(),
        }
    }
}

// ============================================================================
// Workbook Builder
// ============================================================================

/// Builder for a complete XLSX file.
#[derive(Debug, Clone, Default)]
pub struct XlsxBuilder {
    sheets: Vec<SheetBuilder>,
}

impl XlsxBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new sheet. Subsequent `row` calls land on it.
    #[must_use]
    pub fn sheet(mut self, name: &str) -> Self {
        self.sheets.push(SheetBuilder::new(name));
        self
    }

    /// Append a row of cell values to the current sheet.
    #[must_use]
    pub fn row(mut self, cells: Vec<CellValue>) -> Self {
        if self.sheets.is_empty() {
            self.sheets.push(SheetBuilder::new("Sheet1"));
        }
        if let Some(sheet) = self.sheets.last_mut() {
            sheet.rows.push(cells);
        }
        self
    }

    /// Assemble the workbook into XLSX bytes.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        let mut shared_strings: Vec<String> = Vec::new();

        let sheet_xmls: Vec<String> = self
            .sheets
            .iter()
            .map(|sheet| generate_sheet_xml(sheet, &mut shared_strings))
            .collect();

        let cursor = Cursor::new(Vec::new());
        let mut zip = ZipWriter::new(cursor);
        let options = FileOptions::default();

        let _ = zip.start_file("[Content_Types].xml", options);
        let _ = zip.write_all(generate_content_types(self.sheets.len(), !shared_strings.is_empty()).as_bytes());

        let _ = zip.start_file("_rels/.rels", options);
        let _ = zip.write_all(generate_root_rels().as_bytes());

        let _ = zip.start_file("xl/_rels/workbook.xml.rels", options);
        let _ = zip.write_all(
            generate_workbook_rels(self.sheets.len(), !shared_strings.is_empty()).as_bytes(),
        );

        let _ = zip.start_file("xl/workbook.xml", options);
        let _ = zip.write_all(generate_workbook_xml(&self.sheets).as_bytes());

        if !shared_strings.is_empty() {
            let _ = zip.start_file("xl/sharedStrings.xml", options);
            let _ = zip.write_all(generate_shared_strings(&shared_strings).as_bytes());
        }

        for (idx, xml) in sheet_xmls.iter().enumerate() {
            let path = format!("xl/worksheets/sheet{}.xml", idx + 1);
            let _ = zip.start_file(&path, options);
            let _ = zip.write_all(xml.as_bytes());
        }

        zip.finish().expect("zip finish").into_inner()
    }
}

/// Assemble a single-sheet workbook around hand-written worksheet markup,
/// for shapes the row builder cannot express.
#[must_use]
pub fn xlsx_with_sheet_xml(sheet_xml: &str) -> Vec<u8> {
    let cursor = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(cursor);
    let options = FileOptions::default();

    let _ = zip.start_file("[Content_Types].xml", options);
    let _ = zip.write_all(generate_content_types(1, false).as_bytes());

    let _ = zip.start_file("_rels/.rels", options);
    let _ = zip.write_all(generate_root_rels().as_bytes());

    let _ = zip.start_file("xl/_rels/workbook.xml.rels", options);
    let _ = zip.write_all(generate_workbook_rels(1, false).as_bytes());

    let _ = zip.start_file("xl/workbook.xml", options);
    let _ = zip.write_all(generate_workbook_xml(&[SheetBuilder::new("Sheet1")]).as_bytes());

    let _ = zip.start_file("xl/worksheets/sheet1.xml", options);
    let _ = zip.write_all(sheet_xml.as_bytes());

    zip.finish().expect("zip finish").into_inner()
}

// ============================================================================
// Part generators
// ============================================================================

fn generate_content_types(sheet_count: usize, has_shared: bool) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#);
    xml.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
    xml.push_str(r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#);
    for idx in 0..sheet_count {
        xml.push_str(&format!(
            r#"<Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
            idx + 1
        ));
    }
    if has_shared {
        xml.push_str(r#"<Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>"#);
    }
    xml.push_str("</Types>");
    xml
}

fn generate_root_rels() -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    xml.push_str(r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>"#);
    xml.push_str("</Relationships>");
    xml
}

fn generate_workbook_rels(sheet_count: usize, has_shared: bool) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for idx in 0..sheet_count {
        xml.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
            idx + 1,
            idx + 1
        ));
    }
    if has_shared {
        xml.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/>"#,
            sheet_count + 1
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

fn generate_workbook_xml(sheets: &[SheetBuilder]) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#);
    xml.push_str("<sheets>");
    for (idx, sheet) in sheets.iter().enumerate() {
        xml.push_str(&format!(
            r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
            xml_escape(&sheet.name),
            idx + 1,
            idx + 1
        ));
    }
    xml.push_str("</sheets>");
    xml.push_str("</workbook>");
    xml
}

fn generate_shared_strings(strings: &[String]) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(&format!(
        r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{}" uniqueCount="{}">"#,
        strings.len(),
        strings.len()
    ));
    for s in strings {
        xml.push_str(&format!("<si><t>{}</t></si>", xml_escape(s)));
    }
    xml.push_str("</sst>");
    xml
}

fn generate_sheet_xml(sheet: &SheetBuilder, shared_strings: &mut Vec<String>) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    );
    xml.push_str("<sheetData>");

    for (row_idx, row) in sheet.rows.iter().enumerate() {
        xml.push_str(&format!("<row r=\"{}\">", row_idx + 1));
        for (col_idx, value) in row.iter().enumerate() {
            let cell_ref = format!("{}{}", col_letter(col_idx), row_idx + 1);
            match value {
                CellValue::String(s) => {
                    let sst_idx = intern(shared_strings, s);
                    xml.push_str(&format!("<c r=\"{cell_ref}\" t=\"s\"><v>{sst_idx}</v></c>"));
                }
                CellValue::InlineString(s) => {
                    xml.push_str(&format!(
                        "<c r=\"{cell_ref}\" t=\"inlineStr\"><is><t>{}</t></is></c>",
                        xml_escape(s)
                    ));
                }
                CellValue::Number(n) => {
                    xml.push_str(&format!("<c r=\"{cell_ref}\"><v>{n}</v></c>"));
                }
                CellValue::Boolean(b) => {
                    let v = if *b { 1 } else { 0 };
                    xml.push_str(&format!("<c r=\"{cell_ref}\" t=\"b\"><v>{v}</v></c>"));
                }
                CellValue::Error(e) => {
                    xml.push_str(&format!(
                        "<c r=\"{cell_ref}\" t=\"e\"><v>{}</v></c>",
                        xml_escape(e)
                    ));
                }
                CellValue::Empty => {
                    xml.push_str(&format!("<c r=\"{cell_ref}\"/>"));
                }
                CellValue::Missing => {}
            }
        }
        xml.push_str("</row>");
    }

    xml.push_str("</sheetData>");
    xml.push_str("</worksheet>");
    xml
}

fn intern(shared_strings: &mut Vec<String>, s: &str) -> usize {
    if let Some(idx) = shared_strings.iter().position(|existing| existing == s) {
        idx
    } else {
        shared_strings.push(s.to_string());
        shared_strings.len() - 1
    }
}

fn col_letter(col: usize) -> String {
    let mut result = String::new();
    let mut n = col;
    loop {
        let rem = n % 26;
        result.insert(0, char::from(b'A' + rem as u8));
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
