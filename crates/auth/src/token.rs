//! Session token issuance and verification (HS256 JWT).
//!
//! The service is stateless: no registry of issued tokens exists, so a token
//! stays usable until it expires.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;

use crate::claims::{SessionClaims, validate_claims};
use crate::error::AuthError;
use crate::identity::{Identity, UserRecord, project};

/// Lifetime of every issued session token.
pub const SESSION_TTL_HOURS: i64 = 24;

// ─────────────────────────────────────────────────────────────────────────────
// Session token
// ─────────────────────────────────────────────────────────────────────────────

/// Opaque signed session credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl core::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Credential service
// ─────────────────────────────────────────────────────────────────────────────

/// Signs and verifies session tokens with a shared server secret.
#[derive(Clone)]
pub struct CredentialService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl core::fmt::Debug for CredentialService {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CredentialService")
            .field("algorithm", &Algorithm::HS256)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl CredentialService {
    /// Build a service for `secret`. An empty secret is a configuration
    /// error, so no service can exist that would issue unsigned tokens.
    pub fn new(secret: &str) -> Result<Self, AuthError> {
        if secret.trim().is_empty() {
            return Err(AuthError::Configuration(
                "token signing secret is not set".to_string(),
            ));
        }

        // Expiry is checked against the caller's `now`, not the system clock.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        validation.leeway = 0;

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl: Duration::hours(SESSION_TTL_HOURS),
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `record`, keeping only `id`, `name` and `username`.
    pub fn issue(&self, record: &UserRecord, now: DateTime<Utc>) -> Result<SessionToken, AuthError> {
        let claims = SessionClaims::for_record(record, now, now + self.ttl);

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Configuration(format!("failed to sign token: {e}")))?;

        tracing::debug!(user_id = %record.id, exp = claims.exp, "session token issued");
        Ok(SessionToken(token))
    }

    /// Verify `token` against the current account holder at time `now`.
    ///
    /// Returns the projection of `current`, not of the claims, so callers
    /// always see the live name/username.
    pub fn verify(
        &self,
        token: &str,
        current: &UserRecord,
        now: DateTime<Utc>,
    ) -> Result<Identity, AuthError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::MalformedToken("token is empty".to_string()));
        }

        let claims = jsonwebtoken::decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map_err(decode_error)?
            .claims;

        validate_claims(&claims, now)?;

        if claims.id != current.id {
            tracing::warn!(token_id = %claims.id, current_id = %current.id, "token identity mismatch");
            return Err(AuthError::IdentityMismatch);
        }

        Ok(project(current))
    }
}

fn decode_error(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => AuthError::Signature,
        ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
        _ => AuthError::MalformedToken(err.to_string()),
    }
}
