use budgetbook_domain::InvalidPeriod;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Amount must be greater than zero, got {0}")]
    InvalidAmount(f64),
    #[error("Category is required")]
    MissingCategory,
    #[error("Date {0} is outside the accepted range")]
    InvalidDate(NaiveDate),
    #[error("Invalid period: {0}")]
    InvalidPeriod(#[from] InvalidPeriod),
    #[error("Failed to write `{key}`: {reason}")]
    StorageWriteFailed { key: String, reason: String },
    #[error("Failed to read `{key}`: {reason}")]
    StorageReadFailed { key: String, reason: String },
    #[error("Refusing to overwrite the stored ledger: {0}")]
    CorruptLedger(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
}

impl CoreError {
    pub fn write_failed(key: &str, reason: impl ToString) -> Self {
        Self::StorageWriteFailed {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn read_failed(key: &str, reason: impl ToString) -> Self {
        Self::StorageReadFailed {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}
