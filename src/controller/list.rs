use comfy_table::{Cell, CellAlignment, Color, Table, TableComponent};
use rust_decimal::Decimal;
use crate::account::Account;
use crate::transaction::Transaction;
use crate::util::format_amount;

/// Transaction history of an account, oldest first, with the balance in the footer.
pub(crate) fn transactions_table(account: &Account) -> Table {
    let mut table = Table::new();
    table.remove_style(TableComponent::HorizontalLines);
    table.remove_style(TableComponent::MiddleIntersections);
    table.remove_style(TableComponent::LeftBorderIntersections);
    table.remove_style(TableComponent::RightBorderIntersections);

    table.set_header(vec!["Date", "Amount", "Note"]);

    let mut transactions: Vec<&Transaction> = account.transactions().iter().collect();
    // Stable, so same day transactions stay in the order they were added
    transactions.sort();

    for t in transactions {
        table.add_row(vec![
            Cell::new(t.date().format("%Y-%m-%d")),
            set_amount_style(t.amount(), Cell::new(format!("${}", format_amount(t.amount())))).set_alignment(CellAlignment::Right),
            Cell::new(note(t)),
        ]);
    }

    table.add_row(vec![
        Cell::new("Balance"),
        Cell::new(format!("${}", format_amount(account.balance()))).set_alignment(CellAlignment::Right),
        Cell::new(""),
    ]);
    table
}

fn note(t: &Transaction) -> &'static str {
    if t.is_initial_deposit() {
        "opening deposit"
    } else if t.is_exempt() {
        "interest/fee"
    } else {
        ""
    }
}

fn set_amount_style(amount: Decimal, cell: Cell) -> Cell {
    if amount.is_sign_negative() && !amount.is_zero() {
        cell.fg(Color::Red)
    } else {
        cell.fg(Color::Green)
    }
}
