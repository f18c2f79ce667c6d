//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Coarse error taxonomy shared by every crate in the workspace.
///
/// Boundary layers (HTTP) pick a status code from the class alone; they never
/// need to match on individual variants.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Missing or malformed caller input. Always recoverable.
    Validation,
    /// Bad credentials or an unusable session token.
    Auth,
    /// The process is misconfigured (e.g. no signing secret).
    Configuration,
    /// State disagreed with itself; the operation was aborted.
    Consistency,
}

impl ErrorClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorClass::Validation => "validation_error",
            ErrorClass::Auth => "auth_error",
            ErrorClass::Configuration => "configuration_error",
            ErrorClass::Consistency => "consistency_error",
        }
    }
}

impl core::fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain-level error.
///
/// Keep this focused on deterministic failures of the primitives in this
/// crate. Service crates wrap it in their own error enums.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. blank).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Arithmetic left the representable range.
    #[error("arithmetic overflow: {0}")]
    Overflow(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn overflow(msg: impl Into<String>) -> Self {
        Self::Overflow(msg.into())
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            DomainError::Validation(_) | DomainError::InvalidId(_) => ErrorClass::Validation,
            DomainError::Overflow(_) => ErrorClass::Consistency,
        }
    }
}
