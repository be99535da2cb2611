use std::io::Write;
use log::{info, warn};
use crate::account::{Account, AccountKind, Policies};
use crate::bank::Bank;
use crate::common::AccountError;
use crate::db::Store;
use crate::parser::{Statement, COMMANDS};

mod export;
mod list;

pub(crate) const NO_SELECTION: &str = "This command requires that you first select an account.";
pub(crate) const UNEXPECTED_FAILURE: &str = "Sorry! Something unexpected happened. If this problem persists please contact our support team for assistance.";

/// Whether the shell should keep reading commands.
#[derive(Debug, PartialEq)]
pub(crate) enum Flow {
    Continue,
    Quit,
}

/// The loaded bank, the store it is committed to and the currently selected account.
pub(crate) struct Session<S: Store> {
    bank: Bank,
    store: S,
    selected: Option<u32>,
}

impl<S: Store> Session<S> {
    /// Load the bank from the store. An empty store gets a new bank, committed right away.
    pub(crate) fn open(mut store: S, policies: Policies) -> anyhow::Result<Session<S>> {
        let bank = match store.load()? {
            Some(mut bank) => {
                bank.set_policies(policies);
                bank
            }
            None => {
                info!("No saved bank found, starting a new one");
                let bank = Bank::new(policies);
                store.commit(&bank)?;
                bank
            }
        };

        Ok(Session { bank, store, selected: None })
    }

    pub(crate) fn bank(&self) -> &Bank {
        &self.bank
    }

    pub(crate) fn selected_account(&self) -> Option<&Account> {
        self.selected.and_then(|number| self.bank.get_account(number))
    }

    pub(crate) fn prompt(&self) -> String {
        match self.selected_account() {
            Some(account) => format!("{}#{:09}> ", account.kind(), account.number()),
            None => "> ".to_string(),
        }
    }

    /// Run a statement, writing everything meant for the user to `out`.
    ///
    /// Rejected operations are reported to `out` and leave the session as it was. `Err` is
    /// reserved for failures the user can't fix, such as a failed commit.
    pub(crate) fn execute(&mut self, statement: Statement, out: &mut impl Write) -> anyhow::Result<Flow> {
        match statement {
            Statement::Open(acct_type, amount, date) => {
                let opened = self.stage(|bank| {
                    Ok(bank.add_account(&acct_type, amount, date)?.map(|account| account.to_string()))
                })?;
                match opened {
                    Ok(Some(account)) => writeln!(out, "Opened {account}")?,
                    Ok(None) => writeln!(out, "{acct_type} is not a valid account type. Choose {} or {}.", AccountKind::SAVINGS, AccountKind::CHECKING)?,
                    Err(e) => writeln!(out, "{}", transaction_error_message(&e))?,
                }
            }
            Statement::Summary => {
                for account in self.bank.accounts() {
                    writeln!(out, "{account}")?;
                }
            }
            Statement::Select(number) => {
                self.selected = self.bank.get_account(number).map(Account::number);
                match self.selected_account() {
                    Some(account) => writeln!(out, "Selected {account}")?,
                    None => writeln!(out, "There is no account #{number:09}. No account is selected.")?,
                }
            }
            Statement::List => {
                if let Some(account) = self.require_selected(out)? {
                    writeln!(out, "{}", list::transactions_table(account))?;
                }
            }
            Statement::Add(amount, date) => {
                if let Some(number) = self.require_selected(out)?.map(Account::number) {
                    let added = self.stage(|bank| match bank.get_account_mut(number) {
                        Some(account) => Ok(Some(account.add_transaction(amount, date, false)?.to_string())),
                        None => Ok(None),
                    })?;
                    match added {
                        Ok(Some(t)) => writeln!(out, "Added {t}")?,
                        Ok(None) => writeln!(out, "{NO_SELECTION}")?,
                        Err(e) => writeln!(out, "{}", transaction_error_message(&e))?,
                    }
                }
            }
            Statement::Interest => {
                if let Some(number) = self.require_selected(out)?.map(Account::number) {
                    let applied = self.stage(|bank| match bank.get_account_mut(number) {
                        Some(account) => account.assess_interest_and_fees(),
                        None => Ok(vec![]),
                    })?;
                    match applied {
                        Ok(transactions) => {
                            for t in transactions {
                                writeln!(out, "Added {t}")?;
                            }
                        }
                        Err(e) => writeln!(out, "{}", interest_error_message(&e))?,
                    }
                }
            }
            Statement::Export(file_path) => {
                if let Some(account) = self.require_selected(out)? {
                    match export::export_transactions(account, &file_path) {
                        Ok(count) => writeln!(out, "Exported {count} transactions to {}", file_path.display())?,
                        Err(e) => {
                            warn!("Export failed: {e:#}");
                            writeln!(out, "Unable to export to {}", file_path.display())?;
                        }
                    }
                }
            }
            Statement::Help => {
                for (_, usage) in COMMANDS {
                    writeln!(out, "  {usage}")?;
                }
            }
            Statement::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    /// The selected account, or `None` after telling the user to select one.
    fn require_selected(&self, out: &mut impl Write) -> anyhow::Result<Option<&Account>> {
        let account = self.selected_account();
        if account.is_none() {
            writeln!(out, "{NO_SELECTION}")?;
        }
        Ok(account)
    }

    /// Apply `op` to a copy of the bank and commit the copy. The live bank is only replaced once
    /// both succeed, so a rejected operation or a failed commit changes nothing.
    fn stage<T>(&mut self, op: impl FnOnce(&mut Bank) -> Result<T, AccountError>) -> anyhow::Result<Result<T, AccountError>> {
        let mut staged = self.bank.clone();
        let outcome = match op(&mut staged) {
            Ok(outcome) => outcome,
            Err(e) => return Ok(Err(e)),
        };

        self.store.commit(&staged)?;
        self.bank = staged;
        Ok(Ok(outcome))
    }
}

fn transaction_error_message(e: &AccountError) -> String {
    match e {
        AccountError::Overdrawn => "This transaction could not be completed due to an insufficient account balance.".to_string(),
        AccountError::LimitExceeded => "This transaction could not be completed because the account has reached a transaction limit.".to_string(),
        AccountError::OutOfSequence(date) => format!("New transactions must be from {} onward.", date.format("%Y-%m-%d")),
        AccountError::NoTransactions => "This account has no transactions yet.".to_string(),
        AccountError::DateOutOfRange(date) => format!("{} is outside the supported date range.", date.format("%Y-%m-%d")),
        AccountError::AmountOutOfRange => "This transaction could not be completed because the amount is too large.".to_string(),
    }
}

fn interest_error_message(e: &AccountError) -> String {
    match e {
        AccountError::OutOfSequence(date) => format!("Cannot apply interest and fees again in the month of {}.", date.format("%B")),
        e => transaction_error_message(e),
    }
}
