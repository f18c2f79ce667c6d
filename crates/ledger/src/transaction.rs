use serde::{Deserialize, Serialize};

use tellerdesk_core::Money;

/// Insertion counter of a transaction: the Nth record ever written has id N.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransId(u64);

impl TransId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl core::fmt::Display for TransId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Side of a transaction from the account holder's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "Cr")]
    Credit,
    #[serde(rename = "Dr")]
    Debit,
}

/// One immutable entry of the transaction log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub trans_id: TransId,
    pub trans_remarks: String,
    #[serde(rename = "type")]
    pub direction: Direction,
    /// Always positive; the direction carries the sign.
    pub amount: Money,
    /// Account balance immediately after this transaction was applied.
    pub balance: Money,
    /// Absent on withdrawals, empty on cash deposits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cheque_number: Option<String>,
}

impl TransactionRecord {
    /// Amount with the direction's sign applied.
    pub fn signed_amount(&self) -> Money {
        match self.direction {
            Direction::Credit => self.amount,
            Direction::Debit => self.amount.negated(),
        }
    }
}
