/// Error types for loading performance data
use thiserror::Error;

/// Main error type for loading operations
#[derive(Error, Debug)]
pub enum DataError {
    /// Input file could not be opened or read
    #[error("Failed to read input file: {0}")]
    Io(#[from] std::io::Error),

    /// Spreadsheet container could not be decoded
    #[error("Failed to read spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// File extension is not a known spreadsheet or CSV format
    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    /// Workbook contains no worksheet to read
    #[error("Workbook has no worksheets")]
    NoWorksheet,

    /// Header row lacks one of the required columns
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    /// Date cell could not be interpreted as a calendar date
    #[error("Invalid date at row {row}: {value:?}")]
    InvalidDate { row: usize, value: String },

    /// Numeric cell is empty, non-numeric or not finite
    #[error("Invalid {column} value at row {row}: {value:?}")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    /// Input has a header but no data rows
    #[error("Dataset contains no rows")]
    Empty,
}

/// Type alias for Results using DataError
pub type Result<T> = std::result::Result<T, DataError>;
