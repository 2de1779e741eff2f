//! YAML export of import results

use std::io::Write;

use crate::error::OtbResult;
use crate::import::ImportError;
use crate::models::Transaction;

use super::export_err;
use super::json::{ErrorReport, TransactionReport};

/// Export transactions as YAML
pub fn export_transactions_yaml<W: Write>(
    transactions: &[Transaction],
    mut writer: W,
) -> OtbResult<()> {
    let report = TransactionReport::new(transactions);
    writeln!(writer, "# Generated: {}", report.generated_at).map_err(export_err)?;
    serde_yaml::to_writer(writer, &report)?;
    Ok(())
}

/// Export an error list as YAML
pub fn export_errors_yaml<W: Write>(errors: &[ImportError], writer: W) -> OtbResult<()> {
    serde_yaml::to_writer(writer, &ErrorReport { errors })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::ImportErrorKind;
    use crate::models::Money;
    use chrono::NaiveDate;

    #[test]
    fn test_export_transactions_yaml() {
        let transactions = vec![Transaction::new(
            NaiveDate::from_ymd_opt(2018, 1, 1).unwrap(),
            Money::from_cents(12300),
            "acc-1",
        )
        .with_description("Cool stuff")];

        let mut output = Vec::new();
        export_transactions_yaml(&transactions, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.starts_with("# Generated: "));
        let value: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
        assert_eq!(value["count"].as_u64(), Some(1));
        assert_eq!(
            value["transactions"][0]["description"].as_str(),
            Some("Cool stuff")
        );
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
    fn test_write_failure_is_yaml_error() {
        let errors = vec![ImportError::new(ImportErrorKind::Date, "y")];
        let err = export_errors_yaml(&errors, BrokenPipe).unwrap_err();
        assert!(matches!(err, crate::error::OtbError::Yaml(_)), "{:?}", err);
    }

    #[test]
    fn test_export_errors_yaml() {
        let errors = vec![
            ImportError::new(ImportErrorKind::Amount, "x"),
            ImportError::new(ImportErrorKind::Date, "y"),
        ];

        let mut output = Vec::new();
        export_errors_yaml(&errors, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("type: amount"));
        assert!(text.contains("type: date"));
    }
}
