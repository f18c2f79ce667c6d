//! Single-account ledger: balances plus a prepend-ordered transaction log.
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns.

pub mod account;
pub mod error;
pub mod ledger;
pub mod page;
pub mod transaction;

pub use account::{Account, AccountType};
pub use error::LedgerError;
pub use ledger::{DepositKind, Ledger, LedgerReceipt, MAX_TRANSACTION_AMOUNT_MINOR, max_transaction_amount, parse_amount};
pub use page::{Page, PageRequest};
pub use transaction::{Direction, TransId, TransactionRecord};
