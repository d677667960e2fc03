use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("no raw extracts staged for {date}")]
    NoDataForDate { date: NaiveDate },

    #[error("source request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("missing required config field: {field}")]
    MissingConfigError { field: String },

    #[error("pipeline failure: {message}")]
    ProcessingError { message: String },
}

impl EtlError {
    /// Missing input for a date is skippable; everything else fails the run.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, EtlError::NoDataForDate { .. })
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
