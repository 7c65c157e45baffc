//! Generates a complete consolidated workbook from a ranked view.
//!
//! The workbook is assembled in memory with inline strings (no shared
//! string table to build) and the minimal part set Excel requires.

use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::cell_ref::col_to_letter;
use crate::error::Result;
use crate::types::RankedView;

const SHEET_NAME: &str = "Consolidated";

/// Serialize a ranked view to XLSX bytes: a single sheet with the header
/// row `SKU`, `Sales` followed by one row per entry, in view order.
pub fn write_workbook(view: &RankedView) -> Result<Vec<u8>> {
    let cursor = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(cursor);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(content_types_xml().as_bytes())?;

    zip.start_file("_rels/.rels", options)?;
    zip.write_all(root_rels_xml().as_bytes())?;

    zip.start_file("xl/_rels/workbook.xml.rels", options)?;
    zip.write_all(workbook_rels_xml().as_bytes())?;

    zip.start_file("xl/workbook.xml", options)?;
    zip.write_all(workbook_xml().as_bytes())?;

    zip.start_file("xl/styles.xml", options)?;
    zip.write_all(styles_xml().as_bytes())?;

    zip.start_file("xl/worksheets/sheet1.xml", options)?;
    zip.write_all(sheet_xml(view).as_bytes())?;

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

fn content_types_xml() -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#);
    xml.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
    xml.push_str(r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#);
    xml.push_str(r#"<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#);
    xml.push_str(r#"<Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#);
    xml.push_str("</Types>");
    xml
}

fn root_rels_xml() -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    xml.push_str(r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>"#);
    xml.push_str("</Relationships>");
    xml
}

fn workbook_rels_xml() -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    xml.push_str(r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>"#);
    xml.push_str(r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#);
    xml.push_str("</Relationships>");
    xml
}

fn workbook_xml() -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#);
    xml.push_str("<sheets>");
    xml.push_str(&format!(
        r#"<sheet name="{SHEET_NAME}" sheetId="1" r:id="rId1"/>"#
    ));
    xml.push_str("</sheets>");
    xml.push_str("</workbook>");
    xml
}

fn styles_xml() -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(
        r#"<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    );
    xml.push_str(r#"<fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts>"#);
    xml.push_str(r#"<fills count="1"><fill><patternFill patternType="none"/></fill></fills>"#);
    xml.push_str(r#"<borders count="1"><border/></borders>"#);
    xml.push_str(r#"<cellStyleXfs count="1"><xf/></cellStyleXfs>"#);
    xml.push_str(r#"<cellXfs count="1"><xf xfId="0"/></cellXfs>"#);
    xml.push_str("</styleSheet>");
    xml
}

fn sheet_xml(view: &RankedView) -> String {
    let mut out = String::with_capacity(4096);
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    out.push('\n');
    out.push_str(
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    );
    out.push('\n');

    let row_count = view.len() + 1;
    out.push_str(&format!("<dimension ref=\"A1:B{row_count}\"/>\n"));

    out.push_str("<sheetData>\n");

    // Header row: exactly two labeled columns.
    out.push_str("<row r=\"1\">");
    write_string_cell(&mut out, 0, 0, "SKU");
    write_string_cell(&mut out, 0, 1, "Sales");
    out.push_str("</row>\n");

    for (idx, entry) in view.iter().enumerate() {
        let row = idx + 1;
        out.push_str(&format!("<row r=\"{}\">", row + 1));
        write_string_cell(&mut out, row, 0, &entry.sku);
        write_number_cell(&mut out, row, 1, entry.amount);
        out.push_str("</row>\n");
    }

    out.push_str("</sheetData>\n");
    out.push_str("</worksheet>");
    out
}

/// Write a single inline-string `<c>` element.
fn write_string_cell(out: &mut String, row: usize, col: usize, value: &str) {
    let cell_ref = cell_ref_for(row, col);
    out.push_str(&format!("<c r=\"{cell_ref}\" t=\"inlineStr\"><is><t>"));
    out.push_str(&xml_escape(value));
    out.push_str("</t></is></c>");
}

/// Write a single numeric `<c>` element.
fn write_number_cell(out: &mut String, row: usize, col: usize, value: f64) {
    let cell_ref = cell_ref_for(row, col);
    out.push_str(&format!("<c r=\"{cell_ref}\"><v>{value}</v></c>"));
}

fn cell_ref_for(row: usize, col: usize) -> String {
    let col = u32::try_from(col).unwrap_or(u32::MAX);
    format!("{}{}", col_to_letter(col), row + 1)
}

/// Minimal XML escaping for attribute/text content.
fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
