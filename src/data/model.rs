use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// CellValue – a single decoded cell
// ---------------------------------------------------------------------------

/// A primitive cell value as produced by the decoders.
///
/// "Absent" is not a variant: a missing cell is simply a missing entry
/// (`None` in decoded rows, a missing key in [`Row::cells`]).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            // `{}` on f64 prints 30.0 as "30", which is what users typed.
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

// ---------------------------------------------------------------------------
// Column / Row
// ---------------------------------------------------------------------------

/// One column of the loaded table. `key` is the 0-based source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub key: String,
    pub title: String,
}

/// One data row: synthetic `id` plus the present cells keyed by column key.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: usize,
    pub cells: BTreeMap<String, CellValue>,
}

impl Row {
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.get(key)
    }

    /// Display text of the cell under `key`, `None` when the cell is absent.
    pub fn text(&self, key: &str) -> Option<String> {
        self.cells.get(key).map(|v| v.to_string())
    }
}

/// An ordered subset of a table's rows.
pub type RowView<'a> = Vec<&'a Row>;

// ---------------------------------------------------------------------------
// Table – the complete loaded sheet
// ---------------------------------------------------------------------------

/// Column schema plus row set derived from one decoded worksheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl Table {
    /// Build the table model from a header row and the data rows below it.
    ///
    /// Cells positioned beyond the header have no column and are dropped.
    pub fn build(header: &[Option<CellValue>], data_rows: Vec<Vec<Option<CellValue>>>) -> Self {
        let columns: Vec<Column> = header
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let title = cell
                    .as_ref()
                    .map(|c| c.to_string())
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| format!("Column {}", i + 1));
                Column {
                    key: i.to_string(),
                    title,
                }
            })
            .collect();

        let mut dropped = 0usize;
        let rows: Vec<Row> = data_rows
            .into_iter()
            .enumerate()
            .map(|(id, cells)| {
                let mut row = Row {
                    id,
                    cells: BTreeMap::new(),
                };
                for (i, cell) in cells.into_iter().enumerate() {
                    let Some(value) = cell else { continue };
                    match columns.get(i) {
                        Some(col) => {
                            row.cells.insert(col.key.clone(), value);
                        }
                        None => dropped += 1,
                    }
                }
                row
            })
            .collect();

        if dropped > 0 {
            log::debug!("Dropped {dropped} cells beyond the {} header columns", columns.len());
        }

        Table { columns, rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// All rows, in order, as a view.
    pub fn view(&self) -> RowView<'_> {
        self.rows.iter().collect()
    }
}
