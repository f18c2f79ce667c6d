use chrono::Utc;
use thiserror::Error;

use tellerdesk_auth::{AuthError, CredentialService, Identity, SessionToken, UserDirectory};
use tellerdesk_core::DomainError;
use tellerdesk_ledger::{Ledger, LedgerError};

use crate::app::seed;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("invalid seed data: {0}")]
    Seed(#[from] DomainError),
}

/// Everything a request handler can reach.
///
/// Built once at startup and shared by `Arc`; tests build their own.
#[derive(Debug)]
pub struct AppServices {
    pub directory: UserDirectory,
    pub credentials: CredentialService,
    pub ledger: Ledger,
}

impl AppServices {
    pub fn new(directory: UserDirectory, credentials: CredentialService, ledger: Ledger) -> Self {
        Self {
            directory,
            credentials,
            ledger,
        }
    }

    /// Services over the built-in seed data, signing with `jwt_secret`.
    pub fn seeded(jwt_secret: &str) -> Result<Self, SetupError> {
        let credentials = CredentialService::new(jwt_secret)?;
        let directory = UserDirectory::new(seed::account_holder()?);
        let ledger = Ledger::new(seed::accounts()?)?;
        Ok(Self::new(directory, credentials, ledger))
    }

    /// Check credentials and issue a session token.
    pub fn sign_in(&self, username: &str, password: &str) -> Result<(Identity, SessionToken), AuthError> {
        let record = self.directory.authenticate(username, password)?;
        let token = self.credentials.issue(&record, Utc::now())?;
        Ok((record.identity(), token))
    }

    /// Verify a token against the current account holder.
    pub fn verify_token(&self, token: &str) -> Result<Identity, AuthError> {
        let current = self.directory.current();
        self.credentials.verify(token, &current, Utc::now())
    }
}
