//! Core error types for the Estatefolio analytics engine.
//!
//! The engine favors total functions: "no data" situations resolve to zero or
//! empty values. The variants here are reserved for caller defects (contract
//! violations) and for failures of the surrounding plumbing (config, export).

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the analytics engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Contract violation: {0}")]
    Contract(#[from] ContractViolation),

    #[error("Invalid configuration value: {0}")]
    Config(String),

    #[error("Export failed: {0}")]
    Export(String),
}

/// Caller defects. These are never coerced into a default value.
#[derive(Error, Debug, PartialEq)]
pub enum ContractViolation {
    #[error("Funding record '{record_id}' has negative {field}: {value}")]
    NegativeFunding {
        record_id: String,
        field: &'static str,
        value: String,
    },

    #[error("Unknown range token '{0}'")]
    UnknownRangeToken(String),

    #[error("Unknown financial event type '{0}'")]
    UnknownEventType(String),

    #[error("Unknown financial event status '{0}'")]
    UnknownEventStatus(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Export(err.to_string())
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
