//! CSV rendering of the consolidated table.

use crate::types::RankedView;

/// Render a ranked view as CSV text with the `SKU,Sales` header row.
///
/// Fields containing a comma, quote or newline are quoted; embedded quotes
/// are doubled.
pub fn write_csv(view: &RankedView) -> String {
    let mut out = String::with_capacity(64 + view.len() * 24);
    out.push_str("SKU,Sales\n");
    for entry in view.iter() {
        out.push_str(&escape_field(&entry.sku));
        out.push(',');
        out.push_str(&entry.amount.to_string());
        out.push('\n');
    }
    out
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        let mut quoted = String::with_capacity(field.len() + 2);
        quoted.push('"');
        for c in field.chars() {
            if c == '"' {
                quoted.push('"');
            }
            quoted.push(c);
        }
        quoted.push('"');
        quoted
    } else {
        field.to_string()
    }
}
