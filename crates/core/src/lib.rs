//! `tellerdesk-core` — shared domain primitives (no infrastructure concerns).
//!
//! Money, identifiers and the error model used by both the credential and
//! ledger services.

pub mod error;
pub mod id;
pub mod money;

pub use error::{DomainError, DomainResult, ErrorClass};
pub use id::{AccountNumber, UserId};
pub use money::Money;
