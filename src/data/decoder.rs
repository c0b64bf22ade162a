use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use super::error::DecodeError;
use super::model::{CellValue, Table};

// ---------------------------------------------------------------------------
// Decoded sheet – header row plus data rows, before the table model is built
// ---------------------------------------------------------------------------

/// Raw cell grid of one worksheet. Row 0 of the sheet is always the header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedSheet {
    pub header: Vec<Option<CellValue>>,
    pub rows: Vec<Vec<Option<CellValue>>>,
}

impl DecodedSheet {
    fn from_lines(mut lines: Vec<Vec<Option<CellValue>>>) -> Self {
        if lines.is_empty() {
            return Self::default();
        }
        let rows = lines.split_off(1);
        let header = lines.pop().unwrap_or_default();
        DecodedSheet { header, rows }
    }

    pub fn into_table(self) -> Table {
        Table::build(&self.header, self.rows)
    }
}

// ---------------------------------------------------------------------------
// Spreadsheet containers (xlsx / xlsm / xlsb / xls / ods)
// ---------------------------------------------------------------------------

/// Decode the first worksheet of a spreadsheet container.
///
/// Positions are relative to the worksheet's used range, empty cells are
/// `None` and trailing empty cells are trimmed from every row. Blank rows
/// inside the used range survive as empty rows.
pub fn decode(bytes: &[u8]) -> Result<DecodedSheet, DecodeError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(DecodeError::NoWorksheets)?;

    let range = workbook
        .worksheet_range(&name)
        .map_err(|source| DecodeError::Worksheet {
            name: name.clone(),
            source,
        })?;

    let (height, width) = range.get_size();
    log::debug!("Decoding worksheet '{name}' ({height}x{width})");

    let lines = range
        .rows()
        .map(|cells| trimmed(cells.iter().map(convert_cell).collect()))
        .collect();

    Ok(DecodedSheet::from_lines(lines))
}

fn convert_cell(cell: &Data) -> Option<CellValue> {
    match cell {
        // An empty string carries no value; the encoder uses one to hold a
        // trailing blank row inside the used range.
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(CellValue::Text(s.clone())),
        Data::Float(n) => Some(CellValue::Number(*n)),
        Data::Int(n) => Some(CellValue::Number(*n as f64)),
        Data::Bool(b) => Some(CellValue::Bool(*b)),
        // Dates stay as their serial number; no date formatting is applied.
        Data::DateTime(dt) => Some(CellValue::Number(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(CellValue::Text(s.clone())),
        Data::Error(e) => Some(CellValue::Text(e.to_string())),
    }
}

fn trimmed(mut row: Vec<Option<CellValue>>) -> Vec<Option<CellValue>> {
    while matches!(row.last(), Some(None)) {
        row.pop();
    }
    row
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Decode comma-separated text. Ragged lines are allowed; field types are
/// guessed the way spreadsheet readers do for CSV.
pub fn decode_csv(bytes: &[u8]) -> Result<DecodedSheet, DecodeError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut lines = Vec::new();
    for record in reader.records() {
        let record = record?;
        lines.push(trimmed(record.iter().map(guess_cell).collect()));
    }

    Ok(DecodedSheet::from_lines(lines))
}

fn guess_cell(s: &str) -> Option<CellValue> {
    if s.is_empty() {
        return None;
    }
    // "inf" / "NaN" parse as f64 but are words, not numbers.
    if s.bytes().any(|b| b.is_ascii_digit()) {
        if let Ok(i) = s.parse::<i64>() {
            return Some(CellValue::Number(i as f64));
        }
        if let Ok(f) = s.parse::<f64>() {
            return Some(CellValue::Number(f));
        }
    }
    if s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false") {
        return Some(CellValue::Bool(s.eq_ignore_ascii_case("true")));
    }
    Some(CellValue::Text(s.to_string()))
}
