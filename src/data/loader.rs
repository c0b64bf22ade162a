use std::path::Path;

use anyhow::{bail, Context, Result};

use super::decoder::{decode, decode_csv};
use super::encoder::{encode, encode_csv, encode_json, ExportOptions};
use super::error::DecodeError;
use super::model::{Row, Table};

// ---------------------------------------------------------------------------
// Format dispatch by extension
// ---------------------------------------------------------------------------

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

/// Readable input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Spreadsheet,
    Csv,
}

impl SourceFormat {
    pub const EXTENSIONS: &'static [&'static str] = &["xlsx", "xlsm", "xlsb", "xls", "ods", "csv"];

    pub fn from_path(path: &Path) -> Result<Self> {
        match extension(path).as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(SourceFormat::Spreadsheet),
            "csv" => Ok(SourceFormat::Csv),
            other => bail!("Unsupported file extension: .{other}"),
        }
    }
}

/// Writable output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match extension(path).as_str() {
            "xlsx" => Ok(ExportFormat::Xlsx),
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => bail!("Cannot export to .{other} (use .xlsx, .csv or .json)"),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Decode spreadsheet bytes and build the table in one step.
pub fn load_table(bytes: &[u8]) -> Result<Table, DecodeError> {
    Ok(decode(bytes)?.into_table())
}

/// Load a table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xlsb` / `.xls` / `.ods` – first worksheet only
/// * `.csv` – comma separated, first line is the header
pub fn load_file(path: &Path) -> Result<Table> {
    let format = SourceFormat::from_path(path)?;
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;

    let sheet = match format {
        SourceFormat::Spreadsheet => decode(&bytes),
        SourceFormat::Csv => decode_csv(&bytes),
    }
    .with_context(|| format!("decoding {}", path.display()))?;

    Ok(sheet.into_table())
}

/// Write `rows` of `table` to a file, picking the encoder by extension.
pub fn save_file(path: &Path, table: &Table, rows: &[&Row], options: &ExportOptions) -> Result<()> {
    let bytes = match ExportFormat::from_path(path)? {
        ExportFormat::Xlsx => encode(&table.columns, rows, options),
        ExportFormat::Csv => encode_csv(&table.columns, rows, options),
        ExportFormat::Json => encode_json(&table.columns, rows, options),
    }
    .with_context(|| format!("encoding {}", path.display()))?;

    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::data::model::CellValue;

    fn sample() -> Table {
        Table::build(
            &[Some("Name".into()), Some("Age".into())],
            vec![
                vec![Some("Alice".into()), Some(CellValue::Number(30.0))],
                vec![Some("Bob".into()), Some(CellValue::Number(25.0))],
            ],
        )
    }

    #[test]
    fn dispatches_on_extension_ignoring_case() {
        assert_eq!(
            SourceFormat::from_path(&PathBuf::from("a/b.XLSX")).unwrap(),
            SourceFormat::Spreadsheet
        );
        assert_eq!(SourceFormat::from_path(&PathBuf::from("b.csv")).unwrap(), SourceFormat::Csv);
        assert!(SourceFormat::from_path(&PathBuf::from("b.parquet")).is_err());
        assert!(SourceFormat::from_path(&PathBuf::from("noext")).is_err());
        assert_eq!(ExportFormat::from_path(&PathBuf::from("out.json")).unwrap(), ExportFormat::Json);
        assert!(ExportFormat::from_path(&PathBuf::from("out.ods")).is_err());
    }

    #[test]
    fn saves_and_loads_xlsx_and_csv() {
        let dir = tempfile::tempdir().unwrap();
        let table = sample();

        for name in ["out.xlsx", "out.csv"] {
            let path = dir.path().join(name);
            save_file(&path, &table, &table.view(), &ExportOptions::default()).unwrap();
            assert_eq!(load_file(&path).unwrap(), table, "{name}");
        }
    }

    #[test]
    fn saves_json_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let table = sample();

        save_file(&path, &table, &table.view()[..1], &ExportOptions::default()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"Alice\""));
        assert!(!text.contains("Bob"));
    }

    #[test]
    fn reports_corrupt_files_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"PK but not really").unwrap();

        let err = load_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("broken.xlsx"));
        assert!(err.downcast_ref::<DecodeError>().is_some());
    }

    #[test]
    fn load_table_rejects_garbage() {
        assert!(matches!(load_table(b"hello"), Err(DecodeError::Container(_))));
    }
}
