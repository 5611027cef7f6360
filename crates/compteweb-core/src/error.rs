//! Error types for compteweb-core
//!
//! Reads and writes against the GraphQL endpoint fail with one flat kind
//! each. The endpoint message is carried verbatim; network failures, HTTP
//! statuses, GraphQL `errors` arrays and undecodable payloads are not told
//! apart. Input rejected before any call is issued is a validation error.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A read did not resolve
    QueryFailed,
    /// A write was rejected or unreachable
    MutationFailed,
    /// Input rejected before any request was sent
    ValidationFailed,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::QueryFailed => write!(f, "QUERY_FAILED"),
            ErrorCode::MutationFailed => write!(f, "MUTATION_FAILED"),
            ErrorCode::ValidationFailed => write!(f, "VALIDATION_FAILED"),
        }
    }
}

/// Main error type for compteweb-core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("{message}")]
    QueryFailed { operation: String, message: String },

    #[error("{message}")]
    MutationFailed { operation: String, message: String },

    #[error("Invalid {field}: {message}")]
    ValidationFailed { field: String, message: String },
}

impl CoreError {
    pub fn query(operation: &str, message: impl Into<String>) -> Self {
        CoreError::QueryFailed {
            operation: operation.to_string(),
            message: message.into(),
        }
    }

    pub fn mutation(operation: &str, message: impl Into<String>) -> Self {
        CoreError::MutationFailed {
            operation: operation.to_string(),
            message: message.into(),
        }
    }

    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        CoreError::ValidationFailed {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::QueryFailed { .. } => ErrorCode::QueryFailed,
            CoreError::MutationFailed { .. } => ErrorCode::MutationFailed,
            CoreError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
        }
    }

    /// GraphQL operation name, or the form field for validation errors
    pub fn source_name(&self) -> &str {
        match self {
            CoreError::QueryFailed { operation, .. } => operation,
            CoreError::MutationFailed { operation, .. } => operation,
            CoreError::ValidationFailed { field, .. } => field,
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::QueryFailed.to_string(), "QUERY_FAILED");
        assert_eq!(ErrorCode::MutationFailed.to_string(), "MUTATION_FAILED");
        assert_eq!(ErrorCode::ValidationFailed.to_string(), "VALIDATION_FAILED");
    }

    #[test]
    fn test_message_is_endpoint_text() {
        let error = CoreError::query("compteById", "Compte introuvable");
        assert_eq!(error.to_string(), "Compte introuvable");
        assert_eq!(error.code(), ErrorCode::QueryFailed);
        assert_eq!(error.source_name(), "compteById");
    }

    #[test]
    fn test_validation_message() {
        let error = CoreError::validation("montant", "must be a number");
        assert_eq!(error.to_string(), "Invalid montant: must be a number");
        assert_eq!(error.code(), ErrorCode::ValidationFailed);
    }
}
