//! Error types for the expense tracker
//!
//! One error enum covers the whole library. Collaborator failures that the
//! user should see carry a short human-readable message; the underlying cause
//! is logged where the failure is caught.

use thiserror::Error;

use crate::session::SessionError;

/// The main error type for expense tracker operations
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Missing or unusable session; the user has to sign in again
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A read against the persistence backend failed
    #[error("{0}")]
    Lookup(String),

    /// A write against the persistence backend failed
    #[error("{0}")]
    Write(String),

    /// Raw repository failure (lock poisoning, unreadable files)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Form-level validation of user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found (or not owned by the requesting user)
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A blocking budget precondition, such as no goal for the month
    #[error("{0}")]
    Budget(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl TrackerError {
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    pub fn goal_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget goal",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error requires the user to sign in again
    pub fn is_session(&self) -> bool {
        matches!(self, Self::Session(_))
    }

    /// Check if a backend read failed
    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::Lookup(_))
    }
}

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for TrackerError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

impl From<serde_yaml::Error> for TrackerError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for expense tracker operations
pub type TrackerResult<T> = Result<T, TrackerError>;
