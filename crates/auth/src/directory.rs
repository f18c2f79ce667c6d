//! Owned, injectable container for the single account-holder record.

use std::sync::RwLock;

use tellerdesk_core::{DomainError, Money};

use crate::error::AuthError;
use crate::identity::{ProfileUpdate, UserRecord};

/// Upper bound on the spending limit, in minor units (`1_000_000_000.00`).
pub const MAX_LIMIT_MINOR: i64 = 100_000_000_000;

pub fn max_limit() -> Money {
    Money::from_minor_units(MAX_LIMIT_MINOR)
}

/// Holds the current account holder.
///
/// One instance is built at startup and shared by handle; tests build their
/// own so state never leaks between them.
#[derive(Debug)]
pub struct UserDirectory {
    record: RwLock<UserRecord>,
}

impl UserDirectory {
    pub fn new(record: UserRecord) -> Self {
        Self {
            record: RwLock::new(record),
        }
    }

    /// Snapshot of the current record.
    pub fn current(&self) -> UserRecord {
        match self.record.read() {
            Ok(guard) => guard.clone(),
            // A panicked writer cannot leave a half-written record: every
            // write below is a single assignment.
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Check a username/password pair against the current record.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<UserRecord, AuthError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let record = self.current();
        if record.username != username || record.password != password {
            tracing::info!(username, "sign-in rejected");
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(user_id = %record.id, "sign-in accepted");
        Ok(record)
    }

    /// Replace the spending limit. The limit is informational and is not
    /// checked against the balance.
    pub fn update_limit(&self, new_limit: Money) -> Result<UserRecord, AuthError> {
        if new_limit.is_negative() {
            return Err(DomainError::validation("limit must not be negative").into());
        }
        if new_limit > max_limit() {
            return Err(DomainError::validation(format!(
                "limit {new_limit} exceeds the maximum of {}",
                max_limit()
            ))
            .into());
        }

        let mut guard = self.record.write().unwrap_or_else(|p| p.into_inner());
        guard.limit = new_limit;
        tracing::info!(user_id = %guard.id, limit = %new_limit, "spending limit updated");
        Ok(guard.clone())
    }

    /// Merge profile edits into the record. Identity keys, credentials and
    /// the limit are out of reach of this path.
    pub fn update_profile(&self, update: ProfileUpdate) -> Result<UserRecord, AuthError> {
        if update.is_empty() {
            return Err(DomainError::validation("no profile fields to update").into());
        }
        if update.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(DomainError::validation("name must not be blank").into());
        }

        let mut guard = self.record.write().unwrap_or_else(|p| p.into_inner());
        let ProfileUpdate {
            name,
            email,
            phone,
            address,
            customer_type,
        } = update;
        if let Some(name) = name {
            guard.name = name;
        }
        let profile = &mut guard.profile;
        if let Some(email) = email {
            profile.email = email;
        }
        if let Some(phone) = phone {
            profile.phone = phone;
        }
        if let Some(address) = address {
            profile.address = address;
        }
        if let Some(customer_type) = customer_type {
            profile.customer_type = customer_type;
        }
        tracing::info!(user_id = %guard.id, "profile updated");
        Ok(guard.clone())
    }

    /// Swap in a different account holder. Tokens issued for the previous
    /// record stop verifying.
    pub fn replace(&self, record: UserRecord) {
        let mut guard = self.record.write().unwrap_or_else(|p| p.into_inner());
        *guard = record;
    }
}
