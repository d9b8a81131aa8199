//! Error types for signup core operations.
//!
//! Every store operation reports failures through [`SignupError`]; the
//! sign-up workflow reduces them to fixed user-facing messages, and the CLI
//! maps them to exit codes.

use thiserror::Error;

/// Result type alias for signup operations.
pub type Result<T> = std::result::Result<T, SignupError>;

/// Core error type for store and sign-up operations.
#[derive(Debug, Error)]
pub enum SignupError {
    /// Malformed caller input, detected before any backend call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Backend request failed (I/O, SQLite, lock poisoning, decode)
    #[error("Store error: {0}")]
    Store(String),

    /// A collection query failed; carries the triggering parameters
    #[error("Failed to query {collection} where {field} {operator} {value}: {reason}")]
    Query {
        collection: String,
        field: String,
        operator: String,
        value: String,
        reason: String,
    },

    /// Referenced record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Identifier already taken in the collection
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Password hashing or hash parsing failed
    #[error("Credential error: {0}")]
    Credential(String),
}

impl SignupError {
    /// True for failures raised by input validation rather than the backend.
    pub fn is_validation(&self) -> bool {
        matches!(self, SignupError::Validation(_))
    }
}

impl From<rusqlite::Error> for SignupError {
    fn from(err: rusqlite::Error) -> Self {
        SignupError::Store(format!("SQLite error: {}", err))
    }
}

impl From<std::io::Error> for SignupError {
    fn from(err: std::io::Error) -> Self {
        SignupError::Store(err.to_string())
    }
}

impl From<serde_json::Error> for SignupError {
    fn from(err: serde_json::Error) -> Self {
        SignupError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_mentions_parameters() {
        let err = SignupError::Query {
            collection: "users".to_string(),
            field: "email".to_string(),
            operator: "==".to_string(),
            value: "\"a@b.com\"".to_string(),
            reason: "connection reset".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("users"));
        assert!(text.contains("email == \"a@b.com\""));
        assert!(text.contains("connection reset"));
    }

    #[test]
    fn test_is_validation() {
        assert!(SignupError::Validation("x".to_string()).is_validation());
        assert!(!SignupError::Store("x".to_string()).is_validation());
    }
}
