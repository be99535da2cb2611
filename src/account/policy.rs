use std::fmt;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Savings accounts earn more interest but limit how often money can move.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub(crate) struct SavingsPolicy {
    pub(crate) interest_rate: Decimal,
    /// Max non-exempt transactions per calendar day
    pub(crate) daily_limit: usize,
    /// Max non-exempt transactions per calendar month
    pub(crate) monthly_limit: usize,
}

impl Default for SavingsPolicy {
    fn default() -> Self {
        SavingsPolicy {
            interest_rate: dec!(0.029),
            daily_limit: 2,
            monthly_limit: 5,
        }
    }
}

/// Checking accounts have no transaction limits but charge a fee when the balance runs low.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub(crate) struct CheckingPolicy {
    pub(crate) interest_rate: Decimal,
    pub(crate) balance_threshold: Decimal,
    /// Signed amount of the fee transaction, so normally negative.
    pub(crate) low_balance_fee: Decimal,
}

impl Default for CheckingPolicy {
    fn default() -> Self {
        CheckingPolicy {
            interest_rate: dec!(0.0012),
            balance_threshold: dec!(100),
            low_balance_fee: dec!(-10),
        }
    }
}

/// Account variant together with the parameters it was opened with.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub(crate) enum AccountKind {
    Savings(SavingsPolicy),
    Checking(CheckingPolicy),
}

impl AccountKind {
    pub(crate) const SAVINGS: &'static str = "savings";
    pub(crate) const CHECKING: &'static str = "checking";

    /// Resolve a type tag as typed by the user. Unknown tags yield `None`.
    pub(crate) fn from_tag(tag: &str, policies: &Policies) -> Option<AccountKind> {
        match tag.trim().to_ascii_lowercase().as_str() {
            AccountKind::SAVINGS => Some(AccountKind::Savings(policies.savings)),
            AccountKind::CHECKING => Some(AccountKind::Checking(policies.checking)),
            _ => None,
        }
    }

    pub(crate) fn interest_rate(&self) -> Decimal {
        match self {
            AccountKind::Savings(policy) => policy.interest_rate,
            AccountKind::Checking(policy) => policy.interest_rate,
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AccountKind::Savings(_) => write!(f, "Savings"),
            AccountKind::Checking(_) => write!(f, "Checking"),
        }
    }
}

/// Parameters given to newly opened accounts.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct Policies {
    #[serde(default)]
    pub(crate) savings: SavingsPolicy,
    #[serde(default)]
    pub(crate) checking: CheckingPolicy,
}
