use thiserror::Error;

use tellerdesk_core::ErrorClass;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Amount is non-numeric, non-positive, too precise or too large.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("cheque deposits require a cheque number")]
    MissingChequeNumber,

    #[error("invalid page request: {0}")]
    InvalidPage(String),

    /// The ledger was constructed from an unusable account set.
    #[error("ledger setup: {0}")]
    Setup(String),

    /// Balance and log disagree, or a lock was poisoned. The mutation that
    /// observed this was aborted without writing anything.
    #[error("ledger consistency violated: {0}")]
    Consistency(String),
}

impl LedgerError {
    pub fn invalid_amount(msg: impl Into<String>) -> Self {
        Self::InvalidAmount(msg.into())
    }

    pub fn consistency(msg: impl Into<String>) -> Self {
        Self::Consistency(msg.into())
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            LedgerError::InvalidAmount(_)
            | LedgerError::MissingChequeNumber
            | LedgerError::InvalidPage(_) => ErrorClass::Validation,
            LedgerError::Setup(_) => ErrorClass::Configuration,
            LedgerError::Consistency(_) => ErrorClass::Consistency,
        }
    }
}
