use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use tellerdesk_core::UserId;

use crate::error::AuthError;
use crate::identity::UserRecord;

/// Claims carried inside a session token.
///
/// `iat`/`exp` are Unix seconds, the registered JWT claim names, so any
/// standard JWT tooling can inspect a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub id: UserId,
    pub name: String,
    pub username: String,

    /// Issued-at timestamp.
    pub iat: i64,

    /// Expiration timestamp.
    pub exp: i64,
}

impl SessionClaims {
    /// Shape claims for `record`, valid from `issued_at` until `expires_at`.
    pub fn for_record(record: &UserRecord, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            username: record.username.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.iat, 0).single()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}

/// Deterministically validate the claim time window.
///
/// Note: this validates the *claims* only; signature checking happens while
/// decoding in [`crate::CredentialService::verify`]. A token is still valid
/// at exactly `exp` and expired one second later.
pub fn validate_claims(claims: &SessionClaims, now: DateTime<Utc>) -> Result<(), AuthError> {
    if claims.exp <= claims.iat {
        return Err(AuthError::MalformedToken(
            "invalid time window (exp <= iat)".to_string(),
        ));
    }
    if now.timestamp() > claims.exp {
        return Err(AuthError::ExpiredToken);
    }
    Ok(())
}
