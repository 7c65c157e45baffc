use serde::{Deserialize, Serialize};

/// A raw scalar value as produced by the spreadsheet reader.
///
/// `Empty` covers both blank cells and the gaps between populated cells in a
/// sparse row, so column positions survive into pair scanning. Error cells
/// (`t="e"`) also map to `Empty` — they can never form a valid SKU or amount
/// and collapsing them keeps pairing aligned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Boolean(bool),
}

impl Cell {
    /// Render the cell as display text, or `None` for empty cells.
    ///
    /// Numbers format the way JavaScript's `toString` does for the common
    /// cases: integral values print without a decimal point.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => Some(s.clone()),
            Cell::Number(n) => Some(format_number(*n)),
            Cell::Boolean(b) => Some(if *b { "true".into() } else { "false".into() }),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{n:.0}")
    } else {
        n.to_string()
    }
}

/// An ordered sequence of cells; row-to-row length may vary.
pub type Row = Vec<Cell>;

/// The first worksheet of one uploaded file, rows in original order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub rows: Vec<Row>,
}

impl Sheet {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
