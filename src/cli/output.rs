//! Rendering of an import outcome in the selected output format

use std::io::Write;

use clap::ValueEnum;

use crate::display::{format_import_errors, format_import_summary, format_transaction_table};
use crate::error::{OtbError, OtbResult};
use crate::export::{
    export_errors_json, export_errors_yaml, export_transactions_csv, export_transactions_json,
    export_transactions_yaml,
};
use crate::import::ImportOutcome;

/// Output format for import results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Summary plus a register table
    #[default]
    Table,
    Json,
    Yaml,
    Csv,
}

impl OutputFormat {
    /// Whether stdout carries a machine-readable document
    pub fn is_structured(&self) -> bool {
        !matches!(self, Self::Table)
    }
}

/// Write an outcome to `out`, or its errors to `err` in table and CSV modes
///
/// JSON and YAML put the error report on `out` so scripts get a single
/// document either way.
pub fn render_outcome<O: Write, E: Write>(
    outcome: &ImportOutcome,
    format: OutputFormat,
    out: &mut O,
    err: &mut E,
) -> OtbResult<()> {
    match (outcome, format) {
        (ImportOutcome::Succeeded(transactions), OutputFormat::Table) => {
            writeln!(out, "{}", format_import_summary(transactions))?;
            writeln!(out)?;
            write!(out, "{}", format_transaction_table(transactions))?;
        }
        (ImportOutcome::Succeeded(transactions), OutputFormat::Json) => {
            export_transactions_json(transactions, &mut *out)?
        }
        (ImportOutcome::Succeeded(transactions), OutputFormat::Yaml) => {
            export_transactions_yaml(transactions, &mut *out)?
        }
        (ImportOutcome::Succeeded(transactions), OutputFormat::Csv) => {
            export_transactions_csv(transactions, &mut *out)?
        }
        (ImportOutcome::Failed(errors), OutputFormat::Json) => {
            export_errors_json(errors, &mut *out)?
        }
        (ImportOutcome::Failed(errors), OutputFormat::Yaml) => {
            export_errors_yaml(errors, &mut *out)?
        }
        (ImportOutcome::Failed(errors), OutputFormat::Table | OutputFormat::Csv) => {
            write!(err, "{}", format_import_errors(errors))?
        }
    }
    out.flush().map_err(|e| OtbError::Export(e.to_string()))
}
