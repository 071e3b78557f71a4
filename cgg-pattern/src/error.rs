/// Error types for the pattern library
use thiserror::Error;

/// Main error type for pattern generation and export
#[derive(Error, Debug)]
pub enum PatternError {
    /// Year outside the supported four-digit Gregorian range
    #[error("Invalid year: {0} (expected {min}..={max})", min = crate::calendar::MIN_YEAR, max = crate::calendar::MAX_YEAR)]
    InvalidYearInput(i32),

    /// No years were requested
    #[error("At least one year must be selected")]
    EmptyYearSet,

    /// Export was asked for a pattern that holds no years
    #[error("Pattern contains no years")]
    EmptyPattern,

    /// Day series that does not cover its year exactly
    #[error("Invalid series for {year}: {reason}")]
    InvalidYearSeries { year: i32, reason: String },

    /// CSV row with more than a date and a count
    #[error("Unexpected CSV row at line {line}: {fields} fields")]
    UnexpectedFields { line: u64, fields: usize },

    /// A requested year has no composed grid
    #[error("No grid was composed for year {0}")]
    MissingYearGrid(i32),

    /// Date parsing failed
    #[error("Failed to parse date: {0}")]
    DateParse(String),

    /// Count was not a non-negative integer
    #[error("Invalid contribution count: {0}")]
    InvalidCount(String),

    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// Failed to parse JSON data
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Transcript text does not have the shape of a pattern grid
    #[error("Malformed transcript at line {line}: {reason}")]
    MalformedTranscript { line: usize, reason: String },
}

/// Type alias for Results using PatternError
pub type Result<T> = std::result::Result<T, PatternError>;
