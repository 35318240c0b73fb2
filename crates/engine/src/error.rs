//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`MissingInput`] thrown when both raw record collections are absent.
//! - [`MalformedDate`] thrown when a record date cannot be normalized.
//!
//!  [`MissingInput`]: EngineError::MissingInput
//!  [`MalformedDate`]: EngineError::MalformedDate
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Missing input: {0}")]
    MissingInput(String),
    #[error("Malformed date: {0}")]
    MalformedDate(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid range: {0}")]
    InvalidRange(String),
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),
    #[error("Export failed: {0}")]
    Export(String),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::MissingInput(a), Self::MissingInput(b)) => a == b,
            (Self::MalformedDate(a), Self::MalformedDate(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidRange(a), Self::InvalidRange(b)) => a == b,
            (Self::UnknownTimezone(a), Self::UnknownTimezone(b)) => a == b,
            (Self::Export(a), Self::Export(b)) => a == b,
            (Self::Csv(a), Self::Csv(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
