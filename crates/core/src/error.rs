//! Recoverable domain failures.

use thiserror::Error;

/// Result of a domain operation.
pub type DomainResult<T> = Result<T, DomainError>;

/// A request the domain refused.
///
/// Deterministic business failures only (validation,
/// missing records, state conflicts). Storage failures belong to the store layer.
/// Every variant is recoverable: the operation that produced it mutated nothing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. bad dates, negative price).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Accepting the request would break a domain invariant.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was malformed (e.g. blank).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A referenced record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request conflicts with current state (e.g. overlapping stay,
    /// cancelling a cancelled booking).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}
