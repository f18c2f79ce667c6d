use std::collections::VecDeque;
use std::sync::{RwLock, RwLockReadGuard};

use serde::{Deserialize, Serialize};

use tellerdesk_core::Money;

use crate::account::{Account, AccountType};
use crate::error::LedgerError;
use crate::page::{Page, PageRequest};
use crate::transaction::{Direction, TransId, TransactionRecord};

/// Largest amount a single withdrawal or deposit may move, in minor units
/// (`1_000_000_000.00`).
pub const MAX_TRANSACTION_AMOUNT_MINOR: i64 = 100_000_000_000;

pub fn max_transaction_amount() -> Money {
    Money::from_minor_units(MAX_TRANSACTION_AMOUNT_MINOR)
}

/// Coerce caller input into a transaction amount.
pub fn parse_amount(raw: &str) -> Result<Money, LedgerError> {
    Money::parse(raw).map_err(|e| LedgerError::invalid_amount(e.to_string()))
}

/// Where deposited funds come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepositKind {
    Cash,
    Cheque,
}

/// Outcome of a successful mutation: the savings account after the change
/// and the record that was prepended for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerReceipt {
    pub account: Account,
    pub transaction: TransactionRecord,
}

#[derive(Debug)]
struct LedgerState {
    accounts: Vec<Account>,
    /// Index of the single Savings account in `accounts`.
    savings: usize,
    /// Newest record first.
    log: VecDeque<TransactionRecord>,
    last_trans_id: TransId,
}

impl LedgerState {
    fn savings(&self) -> &Account {
        &self.accounts[self.savings]
    }

    /// The head of the log must describe the balance we are about to build on.
    fn check_head(&self) -> Result<(), LedgerError> {
        match self.log.front() {
            None if self.last_trans_id.get() != 0 => Err(LedgerError::consistency(format!(
                "empty log but transaction counter is {}",
                self.last_trans_id
            ))),
            None => Ok(()),
            Some(head) if head.trans_id != self.last_trans_id => Err(LedgerError::consistency(format!(
                "log head is transaction {} but counter is {}",
                head.trans_id, self.last_trans_id
            ))),
            Some(head) if head.balance != self.savings().balance => Err(LedgerError::consistency(format!(
                "log head balance {} differs from account balance {}",
                head.balance,
                self.savings().balance
            ))),
            Some(_) => Ok(()),
        }
    }
}

/// Account balances plus the transaction log that explains the savings
/// balance.
///
/// # Invariants
/// - Mutations (withdraw/deposit) hold the write lock from reading the
///   balance until the new record is prepended, so no update is lost.
/// - Readers hold the read lock and see a balance together with its log
///   entry, never one without the other.
/// - The Nth record ever inserted has `trans_id == N`; the newest record is
///   at index 0.
/// - Each record's `balance` equals the savings balance right after it was
///   applied.
#[derive(Debug)]
pub struct Ledger {
    state: RwLock<LedgerState>,
}

impl Ledger {
    /// Build a ledger over `accounts`, exactly one of which must be Savings.
    /// The transaction log starts empty.
    pub fn new(accounts: Vec<Account>) -> Result<Self, LedgerError> {
        let mut savings = accounts
            .iter()
            .enumerate()
            .filter(|(_, a)| a.account_type == AccountType::Savings)
            .map(|(idx, _)| idx);

        let idx = savings
            .next()
            .ok_or_else(|| LedgerError::Setup("no Savings account".to_string()))?;
        if savings.next().is_some() {
            return Err(LedgerError::Setup("more than one Savings account".to_string()));
        }

        Ok(Self {
            state: RwLock::new(LedgerState {
                accounts,
                savings: idx,
                log: VecDeque::new(),
                last_trans_id: TransId::new(0),
            }),
        })
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, LedgerState>, LedgerError> {
        self.state
            .read()
            .map_err(|_| LedgerError::consistency("ledger lock poisoned"))
    }

    /// All accounts in construction order.
    pub fn accounts(&self) -> Result<Vec<Account>, LedgerError> {
        Ok(self.read()?.accounts.clone())
    }

    pub fn savings_account(&self) -> Result<Account, LedgerError> {
        Ok(self.read()?.savings().clone())
    }

    /// Full log snapshot, newest first.
    pub fn transactions(&self) -> Result<Vec<TransactionRecord>, LedgerError> {
        Ok(self.read()?.log.iter().cloned().collect())
    }

    /// Records `[(page-1)*items, page*items)` of the log, newest first.
    ///
    /// A page past the end is empty, not an error. `total_count` is always
    /// the full log length.
    pub fn read_page(&self, request: PageRequest) -> Result<Page, LedgerError> {
        let state = self.read()?;
        let total_count = state.log.len();

        let items = match request.offset() {
            Some(offset) if offset < total_count => state
                .log
                .iter()
                .skip(offset)
                .take(request.items())
                .cloned()
                .collect(),
            _ => Vec::new(),
        };

        Ok(Page { items, total_count })
    }

    /// Debit the savings account. No overdraft check: the balance may go
    /// negative.
    pub fn withdraw(&self, amount: Money, remarks: &str) -> Result<LedgerReceipt, LedgerError> {
        validate_amount(amount)?;
        self.apply(Direction::Debit, amount, remarks, None)
    }

    /// Credit the savings account.
    ///
    /// Cheque deposits need a non-blank cheque number; cash deposits record
    /// an empty one.
    pub fn deposit(
        &self,
        amount: Money,
        remarks: &str,
        kind: DepositKind,
        cheque_number: Option<&str>,
    ) -> Result<LedgerReceipt, LedgerError> {
        validate_amount(amount)?;

        let cheque_number = match kind {
            DepositKind::Cash => String::new(),
            DepositKind::Cheque => cheque_number
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .ok_or(LedgerError::MissingChequeNumber)?
                .to_string(),
        };

        self.apply(Direction::Credit, amount, remarks, Some(cheque_number))
    }

    fn apply(
        &self,
        direction: Direction,
        amount: Money,
        remarks: &str,
        cheque_number: Option<String>,
    ) -> Result<LedgerReceipt, LedgerError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| LedgerError::consistency("ledger lock poisoned"))?;

        state.check_head()?;

        // Everything fallible happens before the first write.
        let current = state.savings().balance;
        let new_balance = match direction {
            Direction::Credit => current.checked_add(amount),
            Direction::Debit => current.checked_sub(amount),
        }
        .map_err(|e| LedgerError::consistency(e.to_string()))?;
        let trans_id = state
            .last_trans_id
            .next()
            .ok_or_else(|| LedgerError::consistency("transaction counter exhausted"))?;

        let record = TransactionRecord {
            trans_id,
            trans_remarks: remarks.to_string(),
            direction,
            amount,
            balance: new_balance,
            cheque_number,
        };

        let savings = state.savings;
        state.accounts[savings].balance = new_balance;
        state.log.push_front(record.clone());
        state.last_trans_id = trans_id;

        tracing::info!(
            trans_id = %trans_id,
            direction = ?direction,
            amount = %amount,
            balance = %new_balance,
            "ledger transaction applied"
        );
        if new_balance.is_negative() {
            tracing::warn!(balance = %new_balance, "savings balance is negative");
        }

        Ok(LedgerReceipt {
            account: state.savings().clone(),
            transaction: record,
        })
    }
}

fn validate_amount(amount: Money) -> Result<(), LedgerError> {
    if !amount.is_positive() {
        return Err(LedgerError::invalid_amount(format!("{amount} is not positive")));
    }
    if amount > max_transaction_amount() {
        return Err(LedgerError::invalid_amount(format!(
            "{amount} exceeds the per-transaction maximum of {}",
            max_transaction_amount()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::Arc;
    use tellerdesk_core::AccountNumber;

    fn seeded(savings_minor: i64) -> Ledger {
        Ledger::new(vec![
            Account::new(
                AccountNumber::new("0001234").unwrap(),
                AccountType::Current,
                Money::zero(),
            ),
            Account::new(
                AccountNumber::new("0001122").unwrap(),
                AccountType::Savings,
                Money::from_minor_units(savings_minor),
            ),
        ])
        .unwrap()
    }

    fn money(s: &str) -> Money {
        Money::parse(s).unwrap()
    }

    #[test]
    fn deposit_then_withdraw_scenario() {
        let ledger = seeded(500_000);

        let r1 = ledger
            .deposit(money("500"), "cash", DepositKind::Cash, None)
            .unwrap();
        assert_eq!(r1.account.balance.to_string(), "5500.00");
        assert_eq!(r1.transaction.trans_id, TransId::new(1));
        assert_eq!(r1.transaction.direction, Direction::Credit);
        assert_eq!(r1.transaction.amount, money("500"));
        assert_eq!(r1.transaction.cheque_number.as_deref(), Some(""));

        let r2 = ledger.withdraw(money("200"), "atm").unwrap();
        assert_eq!(r2.account.balance.to_string(), "5300.00");

        let log = ledger.transactions().unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].trans_id, TransId::new(2));
        assert_eq!(log[0].direction, Direction::Debit);
        assert_eq!(log[0].amount, money("200"));
        assert_eq!(log[0].balance, money("5300.00"));
        assert_eq!(log[0].cheque_number, None);
        assert_eq!(log[1], r1.transaction);
    }

    #[test]
    fn cheque_deposit_requires_number() {
        let ledger = seeded(500_000);

        assert_eq!(
            ledger.deposit(money("100"), "cheque-123", DepositKind::Cheque, None),
            Err(LedgerError::MissingChequeNumber)
        );
        assert_eq!(
            ledger.deposit(money("100"), "cheque-123", DepositKind::Cheque, Some("  ")),
            Err(LedgerError::MissingChequeNumber)
        );
        assert!(ledger.transactions().unwrap().is_empty());
        assert_eq!(ledger.savings_account().unwrap().balance, money("5000"));

        let ok = ledger
            .deposit(money("100"), "cheque-123", DepositKind::Cheque, Some(" 000123 "))
            .unwrap();
        assert_eq!(ok.transaction.cheque_number.as_deref(), Some("000123"));
        assert_eq!(ok.account.balance, money("5100"));
    }

    #[test]
    fn cash_deposit_ignores_supplied_cheque_number() {
        let ledger = seeded(0);
        let r = ledger
            .deposit(money("1"), "cash", DepositKind::Cash, Some("999"))
            .unwrap();
        assert_eq!(r.transaction.cheque_number.as_deref(), Some(""));
    }

    #[test]
    fn invalid_amounts_are_rejected_without_side_effects() {
        let ledger = seeded(500_000);

        for bad in [Money::zero(), money("-5"), money("1000000000.01")] {
            assert!(matches!(ledger.withdraw(bad, "x"), Err(LedgerError::InvalidAmount(_))));
            assert!(matches!(
                ledger.deposit(bad, "x", DepositKind::Cash, None),
                Err(LedgerError::InvalidAmount(_))
            ));
        }

        assert!(ledger.withdraw(max_transaction_amount(), "max").is_ok());
        assert_eq!(ledger.transactions().unwrap().len(), 1);
    }

    #[test]
    fn parse_amount_maps_to_invalid_amount() {
        assert_eq!(parse_amount("12.5").unwrap(), money("12.50"));
        assert!(matches!(parse_amount("twelve"), Err(LedgerError::InvalidAmount(_))));
        assert!(matches!(parse_amount("0.001"), Err(LedgerError::InvalidAmount(_))));
    }

    #[test]
    fn withdraw_may_overdraw() {
        let ledger = seeded(10_000);
        let r = ledger.withdraw(money("150.50"), "rent").unwrap();
        assert_eq!(r.account.balance.to_string(), "-50.50");
        assert_eq!(r.transaction.balance, r.account.balance);
    }

    #[test]
    fn only_savings_account_is_mutated() {
        let ledger = seeded(500_000);
        ledger.withdraw(money("1"), "x").unwrap();

        let accounts = ledger.accounts().unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].account_type, AccountType::Current);
        assert_eq!(accounts[0].balance, Money::zero());
        assert_eq!(accounts[1].balance, money("4999"));
    }

    #[test]
    fn setup_requires_exactly_one_savings_account() {
        let current = Account::new(
            AccountNumber::new("1").unwrap(),
            AccountType::Current,
            Money::zero(),
        );
        let savings = Account::new(
            AccountNumber::new("2").unwrap(),
            AccountType::Savings,
            Money::zero(),
        );

        assert!(matches!(Ledger::new(vec![current.clone()]), Err(LedgerError::Setup(_))));
        assert!(matches!(
            Ledger::new(vec![savings.clone(), savings.clone()]),
            Err(LedgerError::Setup(_))
        ));
        assert!(Ledger::new(vec![current, savings]).is_ok());
    }

    #[test]
    fn pages_slice_newest_first() {
        let ledger = seeded(0);
        for i in 1..=7 {
            ledger
                .deposit(Money::from_minor_units(i * 100), "cash", DepositKind::Cash, None)
                .unwrap();
        }

        let first = ledger.read_page(PageRequest::new(1, 3).unwrap()).unwrap();
        assert_eq!(first.total_count, 7);
        let ids: Vec<u64> = first.items.iter().map(|r| r.trans_id.get()).collect();
        assert_eq!(ids, vec![7, 6, 5]);

        let last = ledger.read_page(PageRequest::new(3, 3).unwrap()).unwrap();
        let ids: Vec<u64> = last.items.iter().map(|r| r.trans_id.get()).collect();
        assert_eq!(ids, vec![1]);

        let beyond = ledger.read_page(PageRequest::new(4, 3).unwrap()).unwrap();
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total_count, 7);

        let huge = ledger.read_page(PageRequest::new(usize::MAX, usize::MAX).unwrap()).unwrap();
        assert!(huge.items.is_empty());
        assert_eq!(huge.total_count, 7);
    }

    #[test]
    fn divergent_head_aborts_mutation() {
        let ledger = seeded(500_000);
        ledger.withdraw(money("1"), "x").unwrap();

        {
            let mut state = ledger.state.write().unwrap();
            let idx = state.savings;
            state.accounts[idx].balance = money("1");
        }

        let err = ledger.withdraw(money("1"), "y").unwrap_err();
        assert!(matches!(err, LedgerError::Consistency(_)));
        assert_eq!(err.class(), tellerdesk_core::ErrorClass::Consistency);
        assert_eq!(ledger.transactions().unwrap().len(), 1);
        assert_eq!(ledger.savings_account().unwrap().balance, money("1"));
    }

    #[test]
    fn poisoned_lock_surfaces_as_consistency_error() {
        let ledger = Arc::new(seeded(500_000));
        ledger.withdraw(money("1"), "x").unwrap();

        let writer = Arc::clone(&ledger);
        let joined = std::thread::spawn(move || {
            let _guard = writer.state.write().unwrap();
            panic!("writer died mid-mutation");
        })
        .join();
        assert!(joined.is_err());

        let err = ledger.withdraw(money("1"), "y").unwrap_err();
        assert!(matches!(err, LedgerError::Consistency(_)));
        assert!(matches!(
            ledger.read_page(PageRequest::new(1, 10).unwrap()),
            Err(LedgerError::Consistency(_))
        ));
        assert!(matches!(ledger.savings_account(), Err(LedgerError::Consistency(_))));
    }

    #[test]
    fn concurrent_mutations_lose_no_updates() {
        let ledger = Arc::new(seeded(500_000));
        let threads = 8;
        let per_thread = 200;

        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let ledger = Arc::clone(&ledger);
                std::thread::spawn(move || {
                    for i in 0..per_thread {
                        if (t + i) % 3 == 0 {
                            ledger.withdraw(Money::from_minor_units(50), "w").unwrap();
                        } else {
                            ledger
                                .deposit(Money::from_minor_units(100), "d", DepositKind::Cash, None)
                                .unwrap();
                        }
                        // Readers must never see a half-applied mutation.
                        let page = ledger.read_page(PageRequest::new(1, 1).unwrap()).unwrap();
                        let head = &page.items[0];
                        assert_eq!(head.trans_id.get() as usize, page.total_count);
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        let log = ledger.transactions().unwrap();
        let n = threads * per_thread;
        assert_eq!(log.len(), n);

        let mut expected = Money::from_minor_units(500_000);
        for (k, rec) in log.iter().rev().enumerate() {
            assert_eq!(rec.trans_id.get(), (k + 1) as u64);
            expected = expected.checked_add(rec.signed_amount()).unwrap();
            assert_eq!(rec.balance, expected);
        }
        assert_eq!(ledger.savings_account().unwrap().balance, expected);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Withdraw(i64),
        Cash(i64),
        Cheque(i64),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (1i64..1_000_000).prop_map(Op::Withdraw),
            (1i64..1_000_000).prop_map(Op::Cash),
            (1i64..1_000_000).prop_map(Op::Cheque),
        ]
    }

    fn run(ledger: &Ledger, ops: &[Op]) {
        for op in ops {
            match op {
                Op::Withdraw(m) => ledger.withdraw(Money::from_minor_units(*m), "w").map(|_| ()),
                Op::Cash(m) => ledger
                    .deposit(Money::from_minor_units(*m), "c", DepositKind::Cash, None)
                    .map(|_| ()),
                Op::Cheque(m) => ledger
                    .deposit(Money::from_minor_units(*m), "q", DepositKind::Cheque, Some("42"))
                    .map(|_| ()),
            }
            .unwrap();
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: after N mutations the log holds N records with ids 1..=N
        /// and every record's balance is the running total up to it.
        #[test]
        fn ids_are_dense_and_balances_are_running_totals(
            initial in -1_000_000i64..1_000_000,
            ops in prop::collection::vec(op_strategy(), 0..40),
        ) {
            let ledger = seeded(initial);
            run(&ledger, &ops);

            let log = ledger.transactions().unwrap();
            prop_assert_eq!(log.len(), ops.len());

            let mut running = Money::from_minor_units(initial);
            for (k, rec) in log.iter().rev().enumerate() {
                prop_assert_eq!(rec.trans_id.get(), (k + 1) as u64);
                running = running.checked_add(rec.signed_amount()).unwrap();
                prop_assert_eq!(rec.balance, running);
            }
            prop_assert_eq!(ledger.savings_account().unwrap().balance, running);
        }

        /// Property: read_page equals slicing the full log.
        #[test]
        fn read_page_matches_slice(
            ops in prop::collection::vec(op_strategy(), 0..30),
            page in 1usize..12,
            items in 1usize..8,
        ) {
            let ledger = seeded(0);
            run(&ledger, &ops);

            let full = ledger.transactions().unwrap();
            let start = ((page - 1) * items).min(full.len());
            let end = (page * items).min(full.len());

            let got = ledger.read_page(PageRequest::new(page, items).unwrap()).unwrap();
            prop_assert_eq!(got.total_count, full.len());
            prop_assert_eq!(&got.items[..], &full[start..end]);
        }
    }
}
