//! Domain error model.

use thiserror::Error;

/// Result type used across the access layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Access decisions themselves never fail with `Forbidden`: scopes narrow
/// queries and policies answer `false`. Only route binding raises
/// `Forbidden`, because it is the one place that must tell "exists" apart
/// from "does not exist".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// No record matches the identifier under any scope.
    #[error("not found")]
    NotFound,

    /// The record exists but lies outside the actor's visibility scope.
    #[error("forbidden")]
    Forbidden,

    /// No authenticated actor is attached to the request.
    #[error("unauthenticated")]
    Unauthenticated,

    /// Programmer/integration error (missing record, unregistered override, ...).
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn forbidden() -> Self {
        Self::Forbidden
    }

    /// `true` for errors that indicate a defect rather than a user-facing outcome.
    pub fn is_defect(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
