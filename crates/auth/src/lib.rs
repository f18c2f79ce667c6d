//! `tellerdesk-auth` — account-holder identity and session credentials.
//!
//! This crate is intentionally decoupled from HTTP and storage: every
//! operation takes the current time and the current identity record as
//! arguments.

pub mod claims;
pub mod directory;
pub mod error;
pub mod identity;
pub mod token;

pub use claims::{SessionClaims, validate_claims};
pub use directory::{MAX_LIMIT_MINOR, UserDirectory, max_limit};
pub use error::AuthError;
pub use identity::{Identity, Profile, ProfileUpdate, UserDetails, UserRecord, project};
pub use token::{CredentialService, SESSION_TTL_HOURS, SessionToken};
