//! JSON export of import results

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::OtbResult;
use crate::import::ImportError;
use crate::models::{Money, Transaction};

use super::export_err;

/// A successful batch with a little metadata
///
/// Every money field (`net_amount`, and `amount`/`total` of each
/// transaction) is in integer cents: 123.00 is written as `12300`. The CSV
/// export writes decimal amounts instead.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub count: usize,
    pub net_amount: Money,
    pub transactions: &'a [Transaction],
}

impl<'a> TransactionReport<'a> {
    pub fn new(transactions: &'a [Transaction]) -> Self {
        Self {
            generated_at: Utc::now(),
            count: transactions.len(),
            net_amount: transactions.iter().map(|t| t.amount).sum(),
            transactions,
        }
    }
}

/// The errors of a failed run
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport<'a> {
    pub errors: &'a [ImportError],
}

/// Export transactions as pretty JSON
pub fn export_transactions_json<W: Write>(
    transactions: &[Transaction],
    mut writer: W,
) -> OtbResult<()> {
    serde_json::to_writer_pretty(&mut writer, &TransactionReport::new(transactions))?;
    writeln!(writer).map_err(export_err)?;
    Ok(())
}

/// Export an error list as pretty JSON
pub fn export_errors_json<W: Write>(errors: &[ImportError], mut writer: W) -> OtbResult<()> {
    serde_json::to_writer_pretty(&mut writer, &ErrorReport { errors })?;
    writeln!(writer).map_err(export_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::ImportErrorKind;
    use chrono::NaiveDate;

    #[test]
    fn test_transaction_report() {
        let transactions = vec![
            Transaction::new(
                NaiveDate::from_ymd_opt(2018, 1, 1).unwrap(),
                Money::from_cents(12300),
                "acc-1",
            ),
            Transaction::new(
                NaiveDate::from_ymd_opt(2018, 1, 2).unwrap(),
                Money::from_cents(-300),
                "acc-1",
            ),
        ];

        let mut output = Vec::new();
        export_transactions_json(&transactions, &mut output).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();

        assert_eq!(value["count"], 2);
        // Cents on the wire
        assert_eq!(value["net_amount"], 12000);
        assert_eq!(value["transactions"][0]["date"], "2018-01-01");
        assert_eq!(value["transactions"][1]["amount"], -300);
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_json_error() {
        let err = export_errors_json(&[], BrokenPipe).unwrap_err();
        assert!(matches!(err, crate::error::OtbError::Json(_)), "{:?}", err);
    }

    #[test]
    fn test_error_report() {
        let errors = vec![ImportError::new(
            ImportErrorKind::Account,
            "Account is required",
        )];

        let mut output = Vec::new();
        export_errors_json(&errors, &mut output).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "errors": [{"type": "account", "message": "Account is required"}]
            })
        );
    }
}
