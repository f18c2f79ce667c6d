//! Start-of-process state: one account holder, one Current and one Savings
//! account. Everything is volatile and lives as long as the process.

use tellerdesk_auth::{Profile, UserRecord};
use tellerdesk_core::{AccountNumber, DomainError, Money, UserId};
use tellerdesk_ledger::{Account, AccountType};

pub fn account_holder() -> Result<UserRecord, DomainError> {
    Ok(UserRecord::new(
        UserId::new("1101")?,
        "user",
        "user",
        "Bhanupriya",
        Money::from_minor_units(500_000),
    )
    .with_profile(Profile {
        email: "priya4893@gmail.com".to_string(),
        phone: "+91 8870668105".to_string(),
        address: "Test data".to_string(),
        customer_type: "Retail".to_string(),
    }))
}

pub fn accounts() -> Result<Vec<Account>, DomainError> {
    Ok(vec![
        Account::new(AccountNumber::new("0001234")?, AccountType::Current, Money::zero()),
        Account::new(
            AccountNumber::new("0001122")?,
            AccountType::Savings,
            Money::from_minor_units(500_000),
        ),
    ])
}
