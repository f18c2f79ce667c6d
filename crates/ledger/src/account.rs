use serde::{Deserialize, Serialize};

use tellerdesk_core::{AccountNumber, Money};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    Current,
    Savings,
}

impl core::fmt::Display for AccountType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AccountType::Current => write!(f, "Current"),
            AccountType::Savings => write!(f, "Savings"),
        }
    }
}

/// A bank account and its current balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub account_number: AccountNumber,
    pub account_type: AccountType,
    /// Signed; withdrawals are not overdraft-checked.
    pub balance: Money,
}

impl Account {
    pub fn new(account_number: AccountNumber, account_type: AccountType, balance: Money) -> Self {
        Self {
            account_number,
            account_type,
            balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_wire_field_names() {
        let acct = Account::new(
            AccountNumber::new("0001122").unwrap(),
            AccountType::Savings,
            Money::from_minor_units(500_000),
        );
        let json = serde_json::to_value(&acct).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "account_number": "0001122",
                "account_type": "Savings",
                "balance": "5000.00",
            })
        );
    }
}
