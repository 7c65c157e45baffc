//! Row Scanner - extracts (SKU, amount) candidate pairs from raw rows.
//!
//! POS exports concatenate an arbitrary number of (SKU, sales) column-pairs
//! side by side in the same row, so each row is walked two cells at a time:
//! even offset = SKU candidate, the next cell = amount candidate. Extraction
//! is deliberately best-effort — an invalid pair is skipped without
//! disturbing the rest of the row or the file. Do not tighten the
//! validation here without re-checking real export samples; stricter rules
//! silently change totals.

use crate::types::{Cell, SalesEntry, Sheet};

/// Extract every valid (SKU, amount) pair from a sheet, in
/// row-then-column-pair order.
///
/// Never fails: malformed cells only ever cost their own pair. A row with an
/// odd cell count leaves its final cell unpaired and ignored; rows with
/// fewer than two cells contribute nothing. Duplicate SKUs pass through
/// untouched — merging them is the aggregator's job.
pub fn scan(sheet: &Sheet) -> Vec<SalesEntry> {
    let mut entries = Vec::new();

    for row in &sheet.rows {
        for pair in row.chunks_exact(2) {
            if let [sku_cell, amount_cell] = pair {
                let Some(sku) = normalize_sku(sku_cell) else {
                    continue;
                };
                let Some(amount) = cell_amount(amount_cell) else {
                    continue;
                };
                entries.push(SalesEntry::new(sku, amount));
            }
        }
    }

    entries
}

/// Canonical SKU key: cell text, trimmed, non-empty.
fn normalize_sku(cell: &Cell) -> Option<String> {
    let text = cell.as_text()?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

/// Amount from an arbitrary cell: numbers pass through, text goes through
/// the tolerant parse, everything else is invalid. Booleans fail the same
/// way "true"/"false" fail the numeric parse.
fn cell_amount(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Number(n) if n.is_finite() => Some(*n),
        Cell::Text(s) => parse_amount(s),
        _ => None,
    }
}

/// Tolerant numeric parse for sales amounts.
///
/// Accepts leading/trailing whitespace and takes the longest leading numeric
/// prefix of the text ("10.5 units" parses as 10.5, "abc" does not parse).
/// A valid prefix is sign? digits? ('.' digits?)? exponent?, with at least
/// one digit in the mantissa; an incomplete exponent ("1e", "2e+") is
/// dropped rather than invalidating the number. Results must be finite.
pub fn parse_amount(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let bytes = trimmed.as_bytes();
    let mut pos = 0;
    let mut mantissa_digits = false;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        pos += 1;
    }
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
        mantissa_digits = true;
    }
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
            pos += 1;
            mantissa_digits = true;
        }
    }
    if !mantissa_digits {
        return None;
    }

    if matches!(bytes.get(pos), Some(b'e') | Some(b'E')) {
        let mut exp_pos = pos + 1;
        if matches!(bytes.get(exp_pos), Some(b'+') | Some(b'-')) {
            exp_pos += 1;
        }
        let mut exp_digits = false;
        while bytes.get(exp_pos).is_some_and(u8::is_ascii_digit) {
            exp_pos += 1;
            exp_digits = true;
        }
        if exp_digits {
            pos = exp_pos;
        }
    }

    let prefix = trimmed.get(..pos)?;
    match prefix.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(n),
        _ => None,
    }
}
