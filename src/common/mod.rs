use chrono::NaiveDate;

/// Reasons an account refuses a transaction or an interest and fees cycle. Account state is left
/// untouched whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum AccountError {
    /// A non-exempt withdrawal is larger than the current balance.
    #[error("insufficient balance")]
    Overdrawn,

    /// A non-exempt transaction would exceed the daily or monthly transaction count.
    #[error("transaction limit reached")]
    LimitExceeded,

    /// The new transaction, or interest and fees cycle, is not chronologically after existing
    /// data. Carries the conflicting date.
    #[error("out of sequence with transaction on {0}")]
    OutOfSequence(NaiveDate),

    /// Interest and fees need at least one transaction to date the cycle.
    #[error("account has no transactions")]
    NoTransactions,

    #[error("no month end representable for {0}")]
    DateOutOfRange(NaiveDate),

    /// The balance would no longer fit in a `Decimal`.
    #[error("amount out of range")]
    AmountOutOfRange,
}
