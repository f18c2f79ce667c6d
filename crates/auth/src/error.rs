use thiserror::Error;

use tellerdesk_core::{DomainError, ErrorClass};

/// Failures of sign-in, token issuance and token verification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The signing secret is unset or unusable.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("username and password are required")]
    MissingCredentials,

    #[error("username or password is wrong")]
    InvalidCredentials,

    /// The token could not be decoded into session claims.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    #[error("token has expired")]
    ExpiredToken,

    #[error("token signature does not match")]
    Signature,

    /// The token was issued for an identity that is no longer current.
    #[error("token identity does not match the current account holder")]
    IdentityMismatch,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl AuthError {
    pub fn class(&self) -> ErrorClass {
        match self {
            AuthError::Configuration(_) => ErrorClass::Configuration,
            AuthError::MissingCredentials => ErrorClass::Validation,
            AuthError::InvalidCredentials
            | AuthError::MalformedToken(_)
            | AuthError::ExpiredToken
            | AuthError::Signature
            | AuthError::IdentityMismatch => ErrorClass::Auth,
            AuthError::Domain(e) => e.class(),
        }
    }
}
