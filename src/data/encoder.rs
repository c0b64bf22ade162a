use rust_xlsxwriter::{Workbook, XlsxError};
use serde_json::{Map, Value as JsonValue};

use super::error::EncodeError;
use super::model::{CellValue, Column, Row, Table};

// ---------------------------------------------------------------------------
// Export options
// ---------------------------------------------------------------------------

/// How columns that share a title are written out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TitlePolicy {
    /// One output column per distinct title, placed at its first occurrence
    /// and holding the value of the last column with that title.
    #[default]
    LastWins,
    /// Later duplicates are renamed `"<title> (<position>)"` (1-based).
    Suffix,
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub sheet_name: String,
    pub file_name: String,
    pub title_policy: TitlePolicy,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            sheet_name: "Sheet1".to_string(),
            file_name: "exported_data.xlsx".to_string(),
            title_policy: TitlePolicy::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Record layout: table columns → output columns keyed by title
// ---------------------------------------------------------------------------

struct Layout {
    /// Output header, one entry per output column.
    titles: Vec<String>,
    /// For each table column, the output column it writes to.
    slots: Vec<usize>,
}

impl Layout {
    fn new(columns: &[Column], policy: TitlePolicy) -> Self {
        let mut titles: Vec<String> = Vec::with_capacity(columns.len());
        let mut slots = Vec::with_capacity(columns.len());
        let mut collapsed = 0usize;

        for (i, col) in columns.iter().enumerate() {
            let existing = titles.iter().position(|t| *t == col.title);
            match (existing, policy) {
                (Some(slot), TitlePolicy::LastWins) => {
                    collapsed += 1;
                    slots.push(slot);
                }
                (Some(_), TitlePolicy::Suffix) => {
                    titles.push(format!("{} ({})", col.title, i + 1));
                    slots.push(titles.len() - 1);
                }
                (None, _) => {
                    titles.push(col.title.clone());
                    slots.push(titles.len() - 1);
                }
            }
        }

        if collapsed > 0 {
            log::warn!("{collapsed} columns share a title with an earlier column; keeping the last value per title");
        }

        Layout { titles, slots }
    }

    /// One output record per row. A later column overwrites an earlier one in
    /// the same slot even when its own cell is absent.
    fn records<'a>(
        &'a self,
        columns: &'a [Column],
        rows: &'a [&'a Row],
    ) -> impl Iterator<Item = Vec<Option<&'a CellValue>>> + 'a {
        rows.iter().map(move |row| {
            let mut record = vec![None; self.titles.len()];
            for (col, &slot) in columns.iter().zip(&self.slots) {
                record[slot] = row.get(&col.key);
            }
            record
        })
    }
}

// ---------------------------------------------------------------------------
// xlsx
// ---------------------------------------------------------------------------

/// Formula written into column 0 of a trailing record that has no cells.
/// It evaluates to an empty string, which the decoder reads back as absent.
const BLANK_ROW_MARKER: &str = r#"="""#;

/// Serialize `rows` as a single-worksheet xlsx file: a header row of titles,
/// then one row per record. Absent cells are left blank.
///
/// Blank rows after the last written cell fall outside the worksheet's used
/// range, so a blank final record carries an `=""` formula to keep the
/// row count intact.
pub fn encode(
    columns: &[Column],
    rows: &[&Row],
    options: &ExportOptions,
) -> Result<Vec<u8>, EncodeError> {
    let layout = Layout::new(columns, options.title_policy);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&options.sheet_name)?;
    // Cached result of the marker formula; the default "0" would decode as a number.
    worksheet.set_formula_result_default("");

    for (c, title) in layout.titles.iter().enumerate() {
        worksheet.write_string(0, to_col(c)?, title)?;
    }

    for (r, record) in layout.records(columns, rows).enumerate() {
        let row = to_row(r + 1)?;
        let last = r + 1 == rows.len();
        if last && !layout.titles.is_empty() && record.iter().all(Option::is_none) {
            worksheet.write_formula(row, 0, BLANK_ROW_MARKER)?;
            continue;
        }
        for (c, value) in record.into_iter().enumerate() {
            let col = to_col(c)?;
            match value {
                None => {}
                Some(CellValue::Text(s)) => {
                    worksheet.write_string(row, col, s)?;
                }
                Some(CellValue::Number(n)) => {
                    worksheet.write_number(row, col, *n)?;
                }
                Some(CellValue::Bool(b)) => {
                    worksheet.write_boolean(row, col, *b)?;
                }
            }
        }
    }

    let bytes = workbook.save_to_buffer()?;
    log::info!(
        "Encoded {} rows x {} columns into sheet '{}' ({} bytes)",
        rows.len(),
        layout.titles.len(),
        options.sheet_name,
        bytes.len()
    );
    Ok(bytes)
}

// rust_xlsxwriter addresses cells with 0-based u32 rows and u16 columns.
fn to_row(r: usize) -> Result<u32, XlsxError> {
    u32::try_from(r).map_err(|_| XlsxError::RowColumnLimitError)
}

fn to_col(c: usize) -> Result<u16, XlsxError> {
    u16::try_from(c).map_err(|_| XlsxError::RowColumnLimitError)
}

/// Export with the default options (sheet `Sheet1`, last-wins titles).
pub fn export_table(table: &Table, rows: &[&Row]) -> Result<Vec<u8>, EncodeError> {
    encode(&table.columns, rows, &ExportOptions::default())
}

// ---------------------------------------------------------------------------
// CSV / JSON
// ---------------------------------------------------------------------------

/// Comma-separated output with the same header layout as [`encode`].
pub fn encode_csv(
    columns: &[Column],
    rows: &[&Row],
    options: &ExportOptions,
) -> Result<Vec<u8>, EncodeError> {
    let layout = Layout::new(columns, options.title_policy);
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(&layout.titles)?;
    for record in layout.records(columns, rows) {
        writer.write_record(
            record
                .iter()
                .map(|v| v.map(|v| v.to_string()).unwrap_or_default()),
        )?;
    }

    writer.into_inner().map_err(|e| EncodeError::Io(e.into_error()))
}

/// JSON array of title → value records. Absent cells are omitted.
pub fn encode_json(
    columns: &[Column],
    rows: &[&Row],
    options: &ExportOptions,
) -> Result<Vec<u8>, EncodeError> {
    let layout = Layout::new(columns, options.title_policy);

    let mut records = Vec::with_capacity(rows.len());
    for record in layout.records(columns, rows) {
        let mut obj = Map::new();
        for (title, value) in layout.titles.iter().zip(record) {
            if let Some(v) = value {
                obj.insert(title.clone(), serde_json::to_value(v)?);
            }
        }
        records.push(JsonValue::Object(obj));
    }

    Ok(serde_json::to_vec_pretty(&records)?)
}
