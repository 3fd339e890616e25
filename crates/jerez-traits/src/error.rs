//! Error types for the Jerez engine.
//!
//! This module defines the error types used throughout the Jerez ecosystem.
//! Only hard failures are represented here: missing metric values, alignment
//! misses and other per-ticker data gaps are ordinary `Option::None` values,
//! never errors.

use thiserror::Error;

/// The main error type for Jerez operations.
#[derive(Debug, Error)]
pub enum JerezError {
    /// Invalid run configuration (unknown metric, empty year range, empty
    /// universe). Surfaced before any computation starts.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A feed record that fails to parse as the expected structure.
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// Error when a metric name is not present in the registry.
    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    /// Error reading the input feed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error deserializing JSON input.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for JerezError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for JerezError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for Jerez operations.
///
/// This is a convenience type that uses [`JerezError`] as the error type.
pub type Result<T> = std::result::Result<T, JerezError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = JerezError::Config("end year before start year".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: end year before start year"
        );

        let err = JerezError::UnknownMetric("ebitda_slope".to_string());
        assert_eq!(err.to_string(), "Unknown metric: ebitda_slope");
    }

    #[test]
    fn test_error_from_string() {
        let err: JerezError = "fail".into();
        assert!(matches!(err, JerezError::Other(_)));
    }

    #[test]
    fn test_result_type() {
        let ok_result: Result<i32> = Ok(42);
        assert!(ok_result.is_ok());

        let err_result: Result<i32> = Err(JerezError::UnknownMetric("ZZZZ".to_string()));
        assert!(err_result.is_err());
    }
}
