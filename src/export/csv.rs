//! CSV export of imported transactions

use std::io::Write;

use crate::error::OtbResult;
use crate::models::Transaction;

use super::export_err;

/// Column header written before the first record
pub const CSV_HEADER: [&str; 5] = ["Date", "Description", "Amount", "Total", "Account"];

/// Export transactions to CSV
///
/// Amounts are written as plain decimals; an unmapped total is an empty field.
pub fn export_transactions_csv<W: Write>(transactions: &[Transaction], writer: W) -> OtbResult<()> {
    let mut csv = ::csv::Writer::from_writer(writer);
    csv.write_record(CSV_HEADER).map_err(export_err)?;

    for txn in transactions {
        let total = txn.total.map(|t| t.to_string()).unwrap_or_default();
        csv.write_record([
            txn.date.format("%Y-%m-%d").to_string().as_str(),
            txn.description.as_str(),
            txn.amount.to_string().as_str(),
            total.as_str(),
            txn.account.as_str(),
        ])
        .map_err(export_err)?;
    }

    csv.flush().map_err(export_err)?;
    Ok(())
}
