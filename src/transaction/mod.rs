use std::cmp::Ordering;
use std::fmt;
use chrono::{Datelike, Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use crate::util::{format_amount, last_day_of_month};

/// A monetary event on an account. Positive amounts are deposits, negative amounts withdrawals.
///
/// Ordering and equality only look at `date`: two transactions on the same day compare equal even
/// when their amounts differ.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct Transaction {
    amount: Decimal,
    date: NaiveDate,

    /// Exempt transactions skip balance, limit and date checks. Used for interest and fees.
    exempt: bool,

    /// The deposit an account was opened with. Checked like any other transaction but not
    /// counted toward transaction limits.
    initial: bool,
}

impl Transaction {
    /// Date defaults to today when not given.
    pub(crate) fn new(amount: Decimal, date: Option<NaiveDate>, exempt: bool) -> Transaction {
        Transaction {
            amount,
            date: date.unwrap_or_else(|| Local::now().date_naive()),
            exempt,
            initial: false,
        }
    }

    pub(crate) fn initial_deposit(amount: Decimal, date: Option<NaiveDate>) -> Transaction {
        Transaction {
            initial: true,
            ..Transaction::new(amount, date, false)
        }
    }

    pub(crate) fn amount(&self) -> Decimal {
        self.amount
    }

    pub(crate) fn date(&self) -> NaiveDate {
        self.date
    }

    pub(crate) fn is_exempt(&self) -> bool {
        self.exempt
    }

    pub(crate) fn is_initial_deposit(&self) -> bool {
        self.initial
    }

    /// Whether this transaction is allowed against `prior_balance`, the balance before it is
    /// applied. Deposits always pass.
    pub(crate) fn check_balance(&self, prior_balance: Decimal) -> bool {
        self.amount >= Decimal::ZERO || prior_balance >= self.amount.abs()
    }

    pub(crate) fn same_day(&self, other: &Transaction) -> bool {
        self.date == other.date
    }

    pub(crate) fn same_month(&self, other: &Transaction) -> bool {
        self.date.month() == other.date.month() && self.date.year() == other.date.year()
    }

    pub(crate) fn last_day_of_month(&self) -> Option<NaiveDate> {
        last_day_of_month(self.date)
    }
}

impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.date == other.date
    }
}

impl Eq for Transaction {}

impl PartialOrd for Transaction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Transaction {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date.cmp(&other.date)
    }
}

impl fmt::Display for Transaction {
    /// e.g. `2022-09-15, $50.00`
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}, ${}", self.date.format("%Y-%m-%d"), format_amount(self.amount))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Local, NaiveDate};
    use rust_decimal_macros::dec;
    use crate::transaction::Transaction;

    fn on(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_default_date_is_today() {
        let t = Transaction::new(dec!(10), None, false);
        assert_eq!(t.date(), Local::now().date_naive());
        assert!(!t.is_exempt());
        assert!(!t.is_initial_deposit());

        let t = Transaction::initial_deposit(dec!(10), on(2024, 1, 1));
        assert!(t.is_initial_deposit());
        assert!(!t.is_exempt());
    }

    #[test]
    fn test_check_balance() {
        let deposit = Transaction::new(dec!(25), on(2024, 1, 1), false);
        assert!(deposit.check_balance(dec!(0)));

        let withdrawal = Transaction::new(dec!(-25), on(2024, 1, 1), false);
        assert!(withdrawal.check_balance(dec!(25)));
        assert!(withdrawal.check_balance(dec!(25.01)));
        assert!(!withdrawal.check_balance(dec!(24.99)));
        assert!(!withdrawal.check_balance(dec!(0)));
    }

    #[test]
    fn test_same_day_and_month() {
        let a = Transaction::new(dec!(1), on(2024, 3, 5), false);
        let b = Transaction::new(dec!(2), on(2024, 3, 5), false);
        let c = Transaction::new(dec!(3), on(2024, 3, 28), false);
        let d = Transaction::new(dec!(4), on(2023, 3, 5), false);

        assert!(a.same_day(&b));
        assert!(!a.same_day(&c));
        assert!(a.same_month(&c));
        assert!(!a.same_month(&d));
    }

    #[test]
    fn test_ordering_by_date_only() {
        let small = Transaction::new(dec!(1), on(2024, 3, 5), false);
        let large = Transaction::new(dec!(1000), on(2024, 3, 5), true);
        let later = Transaction::new(dec!(-5), on(2024, 3, 6), false);

        assert_eq!(small, large);
        assert!(small < later);
        assert!(later > large);
    }

    #[test]
    fn test_last_day_of_month() {
        let december = Transaction::new(dec!(1), on(2024, 12, 10), false);
        assert_eq!(december.last_day_of_month(), on(2024, 12, 31));

        let leap_february = Transaction::new(dec!(1), on(2024, 2, 10), false);
        assert_eq!(leap_february.last_day_of_month(), on(2024, 2, 29));
    }

    #[test]
    fn test_display() {
        let t = Transaction::new(dec!(1050.5), on(2022, 9, 15), false);
        assert_eq!(t.to_string(), "2022-09-15, $1,050.50");
    }
}
