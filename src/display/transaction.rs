//! Transaction display formatting
//!
//! Renders an imported batch as a register table and a failed run as one
//! `<type>: <message>` line per error.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::import::ImportError;
use crate::models::{Money, Transaction};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Total")]
    total: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(txn: &Transaction) -> Self {
        Self {
            date: txn.date.format("%Y-%m-%d").to_string(),
            description: truncate(&txn.description, 40),
            amount: txn.amount.to_string(),
            total: txn.total.map(|t| t.to_string()).unwrap_or_default(),
        }
    }
}

/// Format a batch as a register table
pub fn format_transaction_table(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut table = Table::new(transactions.iter().map(TransactionRow::from));
    table
        .with(Style::rounded())
        .modify(Columns::new(2..4), Alignment::right());
    format!("{}\n", table)
}

/// One-line summary of a successful import
pub fn format_import_summary(transactions: &[Transaction]) -> String {
    let account = transactions
        .first()
        .map(|t| t.account.as_str())
        .unwrap_or_default();
    let net: Money = transactions.iter().map(|t| t.amount).sum();
    let inflows = transactions.iter().filter(|t| t.is_inflow()).count();

    format!(
        "Imported {} transaction{} into '{}' ({} inflow, {} outflow, net {})",
        transactions.len(),
        if transactions.len() == 1 { "" } else { "s" },
        account,
        inflows,
        transactions.len() - inflows,
        net
    )
}

/// Format errors one per line as `<type>: <message>`
pub fn format_import_errors(errors: &[ImportError]) -> String {
    errors.iter().map(|e| format!("{}\n", e)).collect()
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
