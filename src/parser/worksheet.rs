//! Worksheet parsing - turns sheet XML into ordered rows of raw cells.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{BufReader, Read, Seek};
use zip::ZipArchive;

use crate::cell_ref::{col_to_letter, parse_cell_ref_bytes};
use crate::error::{Result, SkurollError};
use crate::types::{Cell, Sheet};

// Excel's hard sheet limits. References past these never come from a real
// workbook, and gap-filling must not materialize them.
const MAX_ROWS: u32 = 1_048_576;
const MAX_COLS: u32 = 16_384;

/// Cell type tag from the `t` attribute of a `<c>` element.
#[derive(Copy, Clone)]
enum CellTypeTag {
    Shared,
    Inline,
    Str,
    Bool,
    Error,
    Default,
}

fn parse_cell_type_tag(value: &[u8]) -> CellTypeTag {
    match value {
        b"s" => CellTypeTag::Shared,
        b"b" => CellTypeTag::Bool,
        b"e" => CellTypeTag::Error,
        b"str" => CellTypeTag::Str,
        b"inlineStr" => CellTypeTag::Inline,
        _ => CellTypeTag::Default,
    }
}

fn parse_u32_bytes(value: &[u8]) -> Option<u32> {
    let mut num: u32 = 0;
    let mut seen = false;
    for &b in value {
        if !b.is_ascii_digit() {
            return None;
        }
        seen = true;
        num = num.saturating_mul(10).saturating_add(u32::from(b - b'0'));
    }
    seen.then_some(num)
}

/// Place a cell at (row, col), padding intermediate positions with
/// `Cell::Empty` so sparse rows keep their column geometry. Pair scanning
/// depends on that: a hole must not shift later cells left.
fn place_cell(rows: &mut Vec<Vec<Cell>>, row: u32, col: u32, cell: Cell) {
    let row = row as usize;
    let col = col as usize;
    while rows.len() <= row {
        rows.push(Vec::new());
    }
    if let Some(cells) = rows.get_mut(row) {
        while cells.len() < col {
            cells.push(Cell::Empty);
        }
        if cells.len() == col {
            cells.push(cell);
        } else if let Some(slot) = cells.get_mut(col) {
            *slot = cell;
        }
    }
}

fn resolve_cell(value: Option<&str>, tag: CellTypeTag, shared_strings: &[String]) -> Cell {
    match tag {
        CellTypeTag::Shared => {
            let idx = value.and_then(|v| parse_u32_bytes(v.as_bytes()));
            match idx.and_then(|i| shared_strings.get(i as usize)) {
                Some(s) => Cell::Text(s.clone()),
                None => Cell::Empty,
            }
        }
        CellTypeTag::Inline | CellTypeTag::Str => match value {
            Some(s) => Cell::Text(s.to_string()),
            None => Cell::Empty,
        },
        CellTypeTag::Bool => match value {
            Some("1") | Some("true") | Some("TRUE") => Cell::Boolean(true),
            Some(_) => Cell::Boolean(false),
            None => Cell::Empty,
        },
        // Error cells can never validate as SKU or amount; collapse them so
        // pairing positions stay aligned.
        CellTypeTag::Error => Cell::Empty,
        CellTypeTag::Default => match value {
            Some(s) => match s.trim().parse::<f64>() {
                Ok(n) => Cell::Number(n),
                Err(_) => Cell::Text(s.to_string()),
            },
            None => Cell::Empty,
        },
    }
}

/// Parse one worksheet part into ordered rows of raw cells.
pub(super) fn parse_sheet<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: &str,
    shared_strings: &[String],
) -> Result<Sheet> {
    let file = archive.by_name(path)?;

    let reader = BufReader::new(file);
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(false);

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    let mut buf = Vec::new();
    let mut cell_buf = Vec::new();
    let mut text_buf = Vec::new();
    let mut current_row: u32 = 0;
    let mut next_row: u32 = 0;
    let mut next_col: u32 = 0;

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(ref event @ (Event::Start(_) | Event::Empty(_))) => {
                let (Event::Start(ref e) | Event::Empty(ref e)) = event else {
                    continue;
                };
                let is_start_event = matches!(event, Event::Start(_));

                match e.local_name().as_ref() {
                    b"row" => {
                        // "r" is optional; rows without it follow the
                        // previous one.
                        let mut row_attr = None;
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"r" {
                                row_attr = parse_u32_bytes(&attr.value);
                            }
                        }
                        current_row = match row_attr {
                            Some(r) => r.saturating_sub(1),
                            None => next_row,
                        };
                        if current_row >= MAX_ROWS {
                            return Err(SkurollError::Parse(format!(
                                "row index {} exceeds the sheet limit",
                                current_row.saturating_add(1)
                            )));
                        }
                        next_row = current_row.saturating_add(1);
                        next_col = 0;
                    }

                    b"c" => {
                        let mut col = next_col;
                        let mut row = current_row;
                        let mut cell_type = CellTypeTag::Default;

                        for attr in e.attributes().flatten() {
                            match attr.key.as_ref() {
                                b"r" => {
                                    if let Some((c, r)) = parse_cell_ref_bytes(&attr.value) {
                                        col = c;
                                        row = r;
                                    }
                                }
                                b"t" => {
                                    cell_type = parse_cell_type_tag(&attr.value);
                                }
                                _ => {}
                            }
                        }
                        if row >= MAX_ROWS || col >= MAX_COLS {
                            return Err(SkurollError::Parse(format!(
                                "cell reference out of range: {}{}",
                                col_to_letter(col),
                                row.saturating_add(1)
                            )));
                        }
                        next_col = col.saturating_add(1);

                        // Read cell value from child elements. Only Start
                        // events have children; self-closing cells like
                        // <c r="A1"/> stay empty.
                        let mut value: Option<String> = None;
                        if is_start_event {
                            loop {
                                cell_buf.clear();
                                match xml.read_event_into(&mut cell_buf) {
                                    Ok(Event::Start(ref inner)) => {
                                        let inner_name = inner.local_name();
                                        let inner_name = inner_name.as_ref();

                                        if inner_name == b"v" || inner_name == b"t" {
                                            text_buf.clear();
                                            if let Ok(Event::Text(text)) =
                                                xml.read_event_into(&mut text_buf)
                                            {
                                                value =
                                                    text.unescape().ok().map(|s| s.to_string());
                                            }
                                        } else if inner_name == b"is" {
                                            value = read_inline_string(&mut xml);
                                        }
                                    }
                                    Ok(Event::End(ref inner)) => {
                                        if inner.local_name().as_ref() == b"c" {
                                            break;
                                        }
                                    }
                                    Ok(Event::Eof) | Err(_) => break,
                                    _ => {}
                                }
                            }
                        }

                        let cell = resolve_cell(value.as_deref(), cell_type, shared_strings);
                        place_cell(&mut rows, row, col, cell);
                    }

                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        buf.clear();
    }

    Ok(Sheet::new(rows))
}

/// Read the text of an `<is><t>...</t></is>` inline string container.
fn read_inline_string<R: std::io::BufRead>(xml: &mut Reader<R>) -> Option<String> {
    let mut buf = Vec::new();
    let mut value: Option<String> = None;
    let mut in_t = false;

    loop {
        buf.clear();
        match xml.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if e.local_name().as_ref() == b"t" {
                    in_t = true;
                }
            }
            Ok(Event::Text(ref text)) if in_t => {
                if let Ok(s) = text.unescape() {
                    let combined = match value.take() {
                        Some(mut existing) => {
                            existing.push_str(&s);
                            existing
                        }
                        None => s.to_string(),
                    };
                    value = Some(combined);
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"t" => in_t = false,
                b"is" => break,
                _ => {}
            },
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
    }

    value
}
