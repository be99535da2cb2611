use std::path::Path;
use anyhow::Context;
use chrono::NaiveDate;
use csv::WriterBuilder;
use rust_decimal::Decimal;
use serde::Serialize;
use crate::account::Account;

#[derive(Serialize)]
struct ExportRecord {
    account: String,
    date: NaiveDate,
    amount: Decimal,
    exempt: bool,
}

/// Export the transactions of an account to a csv file, in the order they were added.
/// Returns the number of transactions written.
pub(crate) fn export_transactions(account: &Account, file_path: &Path) -> anyhow::Result<usize> {
    let mut csv_writer = WriterBuilder::new().has_headers(true).from_path(file_path)
        .with_context(|| format!("Unable to create {}", file_path.display()))?;

    for t in account.transactions() {
        csv_writer.serialize(ExportRecord {
            account: format!("{:09}", account.number()),
            date: t.date(),
            amount: t.amount(),
            exempt: t.is_exempt(),
        })?;
    }
    csv_writer.flush()?;
    Ok(account.transactions().len())
}
