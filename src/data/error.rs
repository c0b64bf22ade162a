use thiserror::Error;

/// Failure to turn file bytes into a decoded sheet.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("not a recognizable spreadsheet: {0}")]
    Container(#[from] calamine::Error),

    #[error("spreadsheet contains no worksheets")]
    NoWorksheets,

    #[error("failed to read worksheet '{name}': {source}")]
    Worksheet {
        name: String,
        #[source]
        source: calamine::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Failure to serialize a table view.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("xlsx writer failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("CSV writer failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error while encoding: {0}")]
    Io(#[from] std::io::Error),
}
