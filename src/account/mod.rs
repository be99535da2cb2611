pub(crate) mod policy;

use std::fmt;
use chrono::NaiveDate;
use log::{debug, info};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use crate::common::AccountError;
use crate::transaction::Transaction;
use crate::util::format_amount;
pub(crate) use policy::{AccountKind, CheckingPolicy, Policies, SavingsPolicy};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct Account {
    number: u32,
    kind: AccountKind,

    /// Append-only, in the order transactions were accepted.
    transactions: Vec<Transaction>,
}

impl Account {
    fn new(number: u32, kind: AccountKind) -> Account {
        debug!("Created account: {number}");
        Account {
            number,
            kind,
            transactions: vec![],
        }
    }

    /// Open an account with its initial deposit. The deposit must not overdraw the empty account
    /// but does not count toward transaction limits.
    pub(crate) fn open(number: u32, kind: AccountKind, amount: Decimal, date: Option<NaiveDate>) -> Result<Account, AccountError> {
        let mut account = Account::new(number, kind);
        account.append(Transaction::initial_deposit(amount, date))?;
        Ok(account)
    }

    pub(crate) fn number(&self) -> u32 {
        self.number
    }

    pub(crate) fn kind(&self) -> &AccountKind {
        &self.kind
    }

    pub(crate) fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Sum of all transaction amounts. Recomputed on every call so it can never drift from the
    /// transaction history.
    pub(crate) fn balance(&self) -> Decimal {
        // Every accepted transaction kept the running total in range, so this never saturates
        self.transactions.iter().fold(Decimal::ZERO, |total, t| total.saturating_add(t.amount()))
    }

    /// The transaction with the latest date. When several share that date the last one added wins.
    pub(crate) fn latest_transaction(&self) -> Option<&Transaction> {
        // Iterator::max returns the last of equal elements
        self.transactions.iter().max()
    }

    /// Add a transaction to this account. Non-exempt transactions must pass the balance, limit
    /// and date checks, in that order. Nothing is appended when a check fails.
    pub(crate) fn add_transaction(&mut self, amount: Decimal, date: Option<NaiveDate>, exempt: bool) -> Result<&Transaction, AccountError> {
        self.append(Transaction::new(amount, date, exempt))
    }

    fn append(&mut self, t: Transaction) -> Result<&Transaction, AccountError> {
        self.balance().checked_add(t.amount()).ok_or(AccountError::AmountOutOfRange)?;
        if !t.is_exempt() {
            self.check_balance(&t)?;
            self.check_limits(&t)?;
            self.check_date(&t)?;
        }

        debug!("Created transaction: {}, {}", self.number, t.amount());
        self.transactions.push(t);
        Ok(&self.transactions[self.transactions.len() - 1])
    }

    fn check_balance(&self, t: &Transaction) -> Result<(), AccountError> {
        if t.check_balance(self.balance()) {
            Ok(())
        } else {
            Err(AccountError::Overdrawn)
        }
    }

    fn check_limits(&self, t: &Transaction) -> Result<(), AccountError> {
        match &self.kind {
            AccountKind::Savings(policy) => {
                let counted = || self.transactions.iter().filter(|existing| !existing.is_exempt() && !existing.is_initial_deposit());
                let today = counted().filter(|existing| existing.same_day(t)).count();
                let this_month = counted().filter(|existing| existing.same_month(t)).count();

                if today >= policy.daily_limit || this_month >= policy.monthly_limit {
                    Err(AccountError::LimitExceeded)
                } else {
                    Ok(())
                }
            }
            AccountKind::Checking(_) => Ok(()),
        }
    }

    fn check_date(&self, t: &Transaction) -> Result<(), AccountError> {
        match self.latest_transaction() {
            Some(latest) if t < latest => Err(AccountError::OutOfSequence(latest.date())),
            _ => Ok(()),
        }
    }

    /// Apply the monthly interest and, for checking accounts, the low balance fee. Both are exempt
    /// transactions dated on the last day of the latest transaction's month. Only one cycle is
    /// allowed per calendar month.
    ///
    /// Returns the transactions that were added.
    pub(crate) fn assess_interest_and_fees(&mut self) -> Result<Vec<Transaction>, AccountError> {
        let latest = self.latest_transaction().ok_or(AccountError::NoTransactions)?;

        if let Some(previous) = self.transactions.iter().find(|t| t.is_exempt() && t.same_month(latest)) {
            return Err(AccountError::OutOfSequence(previous.date()));
        }

        let month_end = latest.last_day_of_month().ok_or(AccountError::DateOutOfRange(latest.date()))?;
        let first_new = self.transactions.len();

        // Work out the whole cycle first so an overflow leaves the account untouched
        let balance = self.balance();
        let interest = balance.checked_mul(self.kind.interest_rate()).ok_or(AccountError::AmountOutOfRange)?;
        let after_interest = balance.checked_add(interest).ok_or(AccountError::AmountOutOfRange)?;
        let fee = match self.kind {
            AccountKind::Checking(policy) if after_interest < policy.balance_threshold => {
                after_interest.checked_add(policy.low_balance_fee).ok_or(AccountError::AmountOutOfRange)?;
                Some(policy.low_balance_fee)
            }
            _ => None,
        };

        self.add_transaction(interest, Some(month_end), true)?;
        if let Some(fee) = fee {
            self.add_transaction(fee, Some(month_end), true)?;
        }

        info!("Triggered interest and fees for account {} on {}", self.number, month_end);
        Ok(self.transactions[first_new..].to_vec())
    }
}

impl fmt::Display for Account {
    /// e.g. `Savings#000000001,<tab>balance: $50.00`
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}#{:09},\tbalance: ${}", self.kind, self.number, format_amount(self.balance()))
    }
}
