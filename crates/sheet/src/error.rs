use thiserror::Error;

/// Errors that can occur while building, reading or writing a table
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Column not found: {name}")]
    ColumnNotFound { name: String },

    #[error("Row index out of bounds: {index} (table has {count} rows)")]
    RowIndexOutOfBounds { index: usize, count: usize },

    #[error("Input appears empty: {0}")]
    EmptyInput(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialize error: {0}")]
    Serialize(String),

    #[error("Excel error: {0}")]
    Xlsx(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SheetError>;
