//! # Error Module
//!
//! The engine's error taxonomy. Every operation either fully commits or
//! fails with exactly one of these kinds; nothing is retried internally.

use crate::stream::StreamId;
use thiserror::Error;

/// Engine errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    // === Creation validation ===
    #[error("Invalid participants: {0}")]
    InvalidParticipants(String),

    #[error("Duration must be positive")]
    InvalidDuration,

    #[error("Amount must be positive")]
    InvalidAmount,

    // === Lookup ===
    #[error("Stream not found: {0}")]
    NotFound(StreamId),

    // === Authorization ===
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    // === Lifecycle ===
    #[error("Stream {0} is not active")]
    StreamNotActive(StreamId),

    #[error("Stream {0} is already paused")]
    AlreadyPaused(StreamId),

    #[error("Stream {0} is not paused")]
    NotPaused(StreamId),

    #[error("Stream {0} has expired")]
    StreamExpired(StreamId),

    // === Withdrawal ===
    #[error("Nothing to withdraw from stream {0}")]
    NothingToWithdraw(StreamId),

    // === Engine ===
    #[error("Engine is paused")]
    EnginePaused,

    // === External collaborator ===
    #[error("Encryption gateway error: {0}")]
    EncryptionGateway(String),
}

/// Result type alias with EngineError
pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    /// Check whether this is a creation-time validation failure
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidParticipants(_)
                | EngineError::InvalidDuration
                | EngineError::InvalidAmount
        )
    }

    /// Check whether this is a lifecycle precondition violation
    pub fn is_lifecycle_error(&self) -> bool {
        matches!(
            self,
            EngineError::StreamNotActive(_)
                | EngineError::AlreadyPaused(_)
                | EngineError::NotPaused(_)
                | EngineError::StreamExpired(_)
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, EngineError::NotFound(_))
    }

    pub fn is_authorization_error(&self) -> bool {
        matches!(self, EngineError::NotAuthorized(_))
    }

    /// `NothingToWithdraw` is a zero-amount outcome, not a hard failure;
    /// callers must still distinguish it from a successful payout.
    pub fn is_nothing_to_withdraw(&self) -> bool {
        matches!(self, EngineError::NothingToWithdraw(_))
    }
}
