#[cfg(test)]
mod tests;

use chrono::NaiveDate;
use log::info;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use crate::account::{Account, AccountKind, Policies};
use crate::common::AccountError;

/// Holds every account. Account numbers are dense, starting at 1, in the order accounts were
/// opened.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub(crate) struct Bank {
    accounts: Vec<Account>,

    /// Parameters for newly opened accounts. Comes from configuration, not from the store.
    #[serde(skip_serializing, skip_deserializing)]
    policies: Policies,
}

impl Bank {
    pub(crate) fn new(policies: Policies) -> Bank {
        Bank {
            accounts: vec![],
            policies,
        }
    }

    pub(crate) fn set_policies(&mut self, policies: Policies) {
        self.policies = policies;
    }

    /// Open a `savings` or `checking` account with an initial deposit. Returns `Ok(None)` for any
    /// other account type.
    ///
    /// The deposit goes through the same checks as any transaction. If it is refused no account
    /// is opened.
    pub(crate) fn add_account(&mut self, acct_type: &str, amount: Decimal, date: Option<NaiveDate>) -> Result<Option<&Account>, AccountError> {
        let kind = match AccountKind::from_tag(acct_type, &self.policies) {
            Some(kind) => kind,
            None => return Ok(None),
        };

        let account = Account::open(self.next_account_number(), kind, amount, date)?;

        info!("Opened account {account}");
        self.accounts.push(account);
        Ok(self.accounts.last())
    }

    fn next_account_number(&self) -> u32 {
        self.accounts.len() as u32 + 1
    }

    pub(crate) fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub(crate) fn get_account(&self, number: u32) -> Option<&Account> {
        self.accounts.iter().find(|a| a.number() == number)
    }

    pub(crate) fn get_account_mut(&mut self, number: u32) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.number() == number)
    }
}
