//! Export module
//!
//! Writes an import result to any `Write` in one of three formats:
//! - CSV: one row per transaction (spreadsheet-compatible)
//! - JSON: the transactions, or the error list of a failed run
//! - YAML: the same documents, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_transactions_csv, CSV_HEADER};
pub use json::{export_errors_json, export_transactions_json, ErrorReport, TransactionReport};
pub use yaml::{export_errors_yaml, export_transactions_yaml};

use crate::error::OtbError;

pub(crate) fn export_err(err: impl std::fmt::Display) -> OtbError {
    OtbError::Export(err.to_string())
}
