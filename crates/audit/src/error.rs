//! # Audit Errors
//!
//! Error types for the audit trail, wrapping IO and serialization errors.

use thiserror::Error;

/// Audit trail errors
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Audit IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Event serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// Result type alias for AuditError
pub type AuditResult<T> = Result<T, AuditError>;

impl AuditError {
    pub fn is_io_error(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
