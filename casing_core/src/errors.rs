//! # Error Types
//!
//! Structured error types for casing_core. Validation failures name the
//! offending field(s) so a caller can point the engineer at the exact entry
//! in the casing program that needs fixing.
//!
//! Design factors never produce errors: a zero load yields `f64::INFINITY`
//! (see [`crate::units::design_factor`]).
//!
//! ## Example
//!
//! ```rust
//! use casing_core::errors::{CalcError, CalcResult};
//!
//! fn validate_tol(tol: f64) -> CalcResult<()> {
//!     if tol < 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "tol",
//!             tol.to_string(),
//!             "Top of liner cannot be negative",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_tol(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for casing_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for assembly, calculation and file operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, negative depth, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// One or more required section fields are missing
    #[error("Missing required parameters for section: {}", fields.join(", "))]
    MissingFields { fields: Vec<String> },

    /// Calculation could not be run (e.g. no sections staged)
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingFields error from a list of field names
    pub fn missing_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CalcError::MissingFields {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// True for errors caused by bad input rather than the environment
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. } | CalcError::MissingFields { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingFields { .. } => "MISSING_FIELDS",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("max_md_depth", "-5.0", "Depth must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_missing_fields_message_lists_every_field() {
        let error = CalcError::missing_fields(["tvd", "grade"]);
        assert_eq!(
            error.to_string(),
            "Missing required parameters for section: tvd, grade"
        );
        assert!(error.is_validation());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_fields(["od"]).error_code(), "MISSING_FIELDS");
        assert_eq!(
            CalcError::calculation_failed("casing", "empty").error_code(),
            "CALCULATION_FAILED"
        );
        assert!(!CalcError::serialization("bad").is_validation());
    }

    #[test]
    fn test_unknown_error_kind_is_rejected() {
        let json = r#"{"type":"Internal","details":{"message":"boom"}}"#;
        assert!(serde_json::from_str::<CalcError>(json).is_err());

        let err = CalcError::file_error("read", "/tmp/well.csg", "denied");
        let roundtrip: CalcError = serde_json::from_str(&serde_json::to_string(&err).unwrap()).unwrap();
        assert_eq!(roundtrip.error_code(), "FILE_ERROR");
    }
}
