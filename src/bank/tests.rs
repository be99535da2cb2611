use chrono::NaiveDate;
use rust_decimal_macros::dec;
use crate::account::{AccountKind, Policies};
use crate::bank::Bank;
use crate::common::AccountError;

fn on(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

#[test]
fn test_account_numbers_are_sequential() {
    let mut bank = Bank::default();
    bank.add_account("savings", dec!(10), on(2024, 1, 1)).unwrap();
    bank.add_account("checking", dec!(20), on(2024, 1, 1)).unwrap();
    bank.add_account("savings", dec!(30), on(2024, 1, 1)).unwrap();

    let numbers: Vec<u32> = bank.accounts().iter().map(|a| a.number()).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert!(matches!(bank.get_account(2).unwrap().kind(), AccountKind::Checking(_)));
}

#[test]
fn test_unknown_account_type() {
    let mut bank = Bank::default();
    let result = bank.add_account("brokerage", dec!(10), on(2024, 1, 1)).unwrap();
    assert!(result.is_none());
    assert!(bank.accounts().is_empty());

    // Unknown types don't consume an account number
    let account = bank.add_account("checking", dec!(10), on(2024, 1, 1)).unwrap().unwrap();
    assert_eq!(account.number(), 1);
}

#[test]
fn test_negative_initial_deposit() {
    let mut bank = Bank::default();
    let result = bank.add_account("savings", dec!(-1), on(2024, 1, 1));
    assert_eq!(result.unwrap_err(), AccountError::Overdrawn);
    assert!(bank.accounts().is_empty());

    let account = bank.add_account("savings", dec!(0), on(2024, 1, 1)).unwrap().unwrap();
    assert_eq!(account.number(), 1);
}

#[test]
fn test_get_account() {
    let mut bank = Bank::default();
    bank.add_account("savings", dec!(10), on(2024, 1, 1)).unwrap();

    assert!(bank.get_account(1).is_some());
    assert!(bank.get_account(0).is_none());
    assert!(bank.get_account(2).is_none());
}

#[test]
fn test_savings_daily_limit_scenario() {
    let mut bank = Bank::default();
    bank.add_account("savings", dec!(100.00), on(2024, 1, 15)).unwrap();
    let account = bank.get_account_mut(1).unwrap();
    assert_eq!(account.balance(), dec!(100.00));

    account.add_transaction(dec!(50.00), on(2024, 1, 15), false).unwrap();
    assert_eq!(account.balance(), dec!(150.00));

    account.add_transaction(dec!(50.00), on(2024, 1, 15), false).unwrap();
    assert_eq!(account.balance(), dec!(200.00));

    let result = account.add_transaction(dec!(50.00), on(2024, 1, 15), false);
    assert_eq!(result.unwrap_err(), AccountError::LimitExceeded);
    assert_eq!(account.balance(), dec!(200.00));
    assert_eq!(account.transactions().len(), 3);
}

#[test]
fn test_savings_monthly_limit_after_opening() {
    let mut bank = Bank::default();
    bank.add_account("savings", dec!(100.00), on(2024, 3, 1)).unwrap();
    let account = bank.get_account_mut(1).unwrap();

    for day in 2..=6 {
        account.add_transaction(dec!(-1), on(2024, 3, day), false).unwrap();
    }

    let result = account.add_transaction(dec!(-1), on(2024, 3, 7), false);
    assert_eq!(result.unwrap_err(), AccountError::LimitExceeded);
    assert_eq!(account.balance(), dec!(95.00));
}

#[test]
fn test_policies_apply_to_new_accounts() {
    let mut policies = Policies::default();
    policies.savings.daily_limit = 1;

    let mut bank = Bank::new(policies);
    bank.add_account("savings", dec!(100), on(2024, 1, 15)).unwrap();

    let account = bank.get_account_mut(1).unwrap();
    // The opening deposit isn't counted, so one more deposit fits in the day
    account.add_transaction(dec!(1), on(2024, 1, 15), false).unwrap();
    let result = account.add_transaction(dec!(1), on(2024, 1, 15), false);
    assert_eq!(result.unwrap_err(), AccountError::LimitExceeded);
    assert_eq!(account.balance(), dec!(101));
}

#[test]
fn test_monthly_limit_policy_applies_to_new_accounts() {
    let mut policies = Policies::default();
    policies.savings.monthly_limit = 2;

    let mut bank = Bank::new(policies);
    bank.add_account("savings", dec!(100), on(2024, 5, 1)).unwrap();

    let account = bank.get_account_mut(1).unwrap();
    account.add_transaction(dec!(1), on(2024, 5, 2), false).unwrap();
    account.add_transaction(dec!(1), on(2024, 5, 3), false).unwrap();
    let result = account.add_transaction(dec!(1), on(2024, 5, 4), false);
    assert_eq!(result.unwrap_err(), AccountError::LimitExceeded);
}

#[test]
fn test_accounts_keep_their_policy() {
    let mut bank = Bank::default();
    bank.add_account("checking", dec!(500), on(2024, 1, 1)).unwrap();

    let mut policies = Policies::default();
    policies.checking.balance_threshold = dec!(1000);
    bank.set_policies(policies);
    bank.add_account("checking", dec!(500), on(2024, 1, 1)).unwrap();

    assert_eq!(bank.get_account_mut(1).unwrap().assess_interest_and_fees().unwrap().len(), 1);
    assert_eq!(bank.get_account_mut(2).unwrap().assess_interest_and_fees().unwrap().len(), 2);
}
