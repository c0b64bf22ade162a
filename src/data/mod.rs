/// Data layer: core types, decoding, filtering and export.
///
/// Architecture:
/// ```text
///  .xlsx / .xls / .ods / .csv
///        │
///        ▼
///   ┌──────────┐
///   │ decoder  │  bytes → header row + data rows
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table   │  columns (key, title) + rows (id, key → cell)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  query + column candidates → visible rows
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ encoder  │  visible rows → .xlsx / .csv / .json bytes
///   └──────────┘
/// ```

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;

pub use decoder::{decode, decode_csv, DecodedSheet};
pub use encoder::{encode, encode_csv, encode_json, export_table, ExportOptions, TitlePolicy};
pub use error::{DecodeError, EncodeError};
pub use filter::{apply_column_filter, apply_query, filtered_indices, FilterState};
pub use loader::{load_file, load_table, save_file, ExportFormat, SourceFormat};
pub use model::{CellValue, Column, Row, RowView, Table};
