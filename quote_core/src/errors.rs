//! # Error Types
//!
//! Structured error types for quote_core. Each variant carries enough context
//! for a caller (a UI, a script, or another service) to tell *which* input or
//! file caused the problem without parsing the message text.
//!
//! Note that the calculator itself never returns these for ordinary
//! "insufficient input" cases - [`crate::calculations::quote::calculate`]
//! returns `None`. The diagnostic twin
//! [`crate::calculations::quote::try_calculate`] explains the `None` with
//! [`QuoteError::NotComputable`].
//!
//! ## Example
//!
//! ```rust
//! use quote_core::errors::{QuoteError, QuoteResult};
//!
//! fn validate_quantity(quantity: u32) -> QuoteResult<()> {
//!     if quantity == 0 {
//!         return Err(QuoteError::invalid_input(
//!             "quantity",
//!             quantity.to_string(),
//!             "Quantity must be at least one part",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for quote_core operations
pub type QuoteResult<T> = Result<T, QuoteError>;

/// Structured error type for quoting operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum QuoteError {
    /// An input value is invalid (out of range, duplicated key, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// The inputs do not admit a cost breakdown
    #[error("Quote not computable: {reason}")]
    NotComputable { reason: String },

    /// Material not found in the catalog
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// No analysis job is registered under this identifier
    #[error("Analysis job not found: {job_id}")]
    JobNotFound { job_id: String },

    /// The geometry analysis collaborator reported a failure
    #[error("Geometry analysis failed for '{file_name}': {reason}")]
    AnalysisFailed { file_name: String, reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
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

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl QuoteError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        QuoteError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a NotComputable error
    pub fn not_computable(reason: impl Into<String>) -> Self {
        QuoteError::NotComputable {
            reason: reason.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        QuoteError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create a JobNotFound error
    pub fn job_not_found(job_id: impl ToString) -> Self {
        QuoteError::JobNotFound {
            job_id: job_id.to_string(),
        }
    }

    /// Create an AnalysisFailed error
    pub fn analysis_failed(file_name: impl Into<String>, reason: impl Into<String>) -> Self {
        QuoteError::AnalysisFailed {
            file_name: file_name.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        QuoteError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>, locked_at: impl Into<String>) -> Self {
        QuoteError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        QuoteError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            QuoteError::FileLocked { .. } | QuoteError::AnalysisFailed { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            QuoteError::InvalidInput { .. } => "INVALID_INPUT",
            QuoteError::NotComputable { .. } => "NOT_COMPUTABLE",
            QuoteError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            QuoteError::JobNotFound { .. } => "JOB_NOT_FOUND",
            QuoteError::AnalysisFailed { .. } => "ANALYSIS_FAILED",
            QuoteError::FileError { .. } => "FILE_ERROR",
            QuoteError::FileLocked { .. } => "FILE_LOCKED",
            QuoteError::SerializationError { .. } => "SERIALIZATION_ERROR",
            QuoteError::VersionMismatch { .. } => "VERSION_MISMATCH",
            QuoteError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for QuoteError {
    fn from(e: serde_json::Error) -> Self {
        QuoteError::serialization(e.to_string())
    }
}

impl From<toml::de::Error> for QuoteError {
    fn from(e: toml::de::Error) -> Self {
        QuoteError::serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = QuoteError::invalid_input("quantity", "0", "Quantity must be at least one part");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: QuoteError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(QuoteError::not_computable("volume").error_code(), "NOT_COMPUTABLE");
        assert_eq!(QuoteError::material_not_found("PEEK").error_code(), "MATERIAL_NOT_FOUND");
        assert_eq!(QuoteError::job_not_found(42).error_code(), "JOB_NOT_FOUND");
    }

    #[test]
    fn test_recoverable() {
        assert!(QuoteError::file_locked("h.json", "someone", "now").is_recoverable());
        assert!(QuoteError::analysis_failed("part.step", "timeout").is_recoverable());
        assert!(!QuoteError::not_computable("quantity is zero").is_recoverable());
    }

    #[test]
    fn test_display_messages() {
        let err = QuoteError::analysis_failed("bracket.stl", "service unavailable");
        assert_eq!(
            err.to_string(),
            "Geometry analysis failed for 'bracket.stl': service unavailable"
        );
    }
}
