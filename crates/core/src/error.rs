//! Domain error model.

use thiserror::Error;

/// Result type used across the invoice engine.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Formatting never produces one of these: unparseable numbers and dates
/// degrade to zero/empty text instead. Rendering has no error path at all.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Caller-supplied invoice data is unusable (missing invoice number,
    /// negative quantity or price, malformed item record).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A configuration value failed validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }
}
