//! Import controller: parser, assembler and validator in one run
//!
//! Two entry points exist. [`ImportController::import_file`] starts from raw
//! file content and is bracketed by lifecycle events. [`ImportController::save_reviewed`]
//! starts from a grid that was already parsed and reviewed, and emits nothing.
//!
//! Neither returns `Err`: every failure becomes an [`ImportError`] inside
//! [`ImportOutcome::Failed`].

use tracing::{debug, info, warn};

use super::assembler::validate_batch;
use super::config::ImportConfig;
use super::events::{ImportEvent, ImportEventSink, NullSink};
use super::grid::RawGrid;
use super::parser::{parse_bytes, ParseOptions};
use super::validate::ImportError;
use crate::models::Transaction;

/// Where the controller is in its run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportState {
    #[default]
    Idle,
    Parsing,
}

/// The result of one import run: a batch or a list of errors, never both
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    /// At least one transaction, all tagged with the configured account
    Succeeded(Vec<Transaction>),
    /// At least one error, at most one per kind
    Failed(Vec<ImportError>),
}

impl ImportOutcome {
    fn from_batch(batch: Result<Vec<Transaction>, Vec<ImportError>>) -> Self {
        match batch {
            Ok(transactions) => Self::Succeeded(transactions),
            Err(errors) => Self::Failed(errors),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    pub fn transactions(&self) -> &[Transaction] {
        match self {
            Self::Succeeded(transactions) => transactions,
            Self::Failed(_) => &[],
        }
    }

    pub fn errors(&self) -> &[ImportError] {
        match self {
            Self::Succeeded(_) => &[],
            Self::Failed(errors) => errors,
        }
    }

    pub fn into_result(self) -> Result<Vec<Transaction>, Vec<ImportError>> {
        match self {
            Self::Succeeded(transactions) => Ok(transactions),
            Self::Failed(errors) => Err(errors),
        }
    }
}

/// Parse file content into a rectangular grid
///
/// Ragged rows are an `upload` failure for file content.
pub fn parse_upload(content: &[u8], options: ParseOptions) -> Result<RawGrid, ImportError> {
    let grid = parse_bytes(content, options)?;
    if let Some(row) = grid.first_ragged_row() {
        let expected = grid.rows()[0].len();
        let found = grid.rows()[row].len();
        return Err(ImportError::upload(format!(
            "row {} has {} columns, expected {}",
            row + 1,
            found,
            expected
        )));
    }
    Ok(grid)
}

/// Orchestrates import runs and publishes lifecycle events
#[derive(Debug)]
pub struct ImportController<S: ImportEventSink = NullSink> {
    sink: S,
    state: ImportState,
    parse_options: ParseOptions,
}

impl Default for ImportController<NullSink> {
    fn default() -> Self {
        Self::new(NullSink)
    }
}

impl<S: ImportEventSink> ImportController<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            state: ImportState::Idle,
            parse_options: ParseOptions::default(),
        }
    }

    pub fn with_parse_options(mut self, parse_options: ParseOptions) -> Self {
        self.parse_options = parse_options;
        self
    }

    pub fn state(&self) -> ImportState {
        self.state
    }

    /// Import raw file content
    ///
    /// Emits `ParseStarted` before parsing and `ParseEnded` after validation,
    /// then returns to idle whatever the outcome.
    pub fn import_file(&mut self, content: &[u8], config: &ImportConfig) -> ImportOutcome {
        self.state = ImportState::Parsing;
        self.sink.emit(ImportEvent::ParseStarted);
        debug!(bytes = content.len(), "parsing import file");

        let outcome = match parse_upload(content, self.parse_options) {
            Ok(grid) => {
                debug!(rows = grid.len(), columns = grid.width(), "parsed grid");
                ImportOutcome::from_batch(validate_batch(&grid, config))
            }
            Err(error) => ImportOutcome::Failed(vec![error]),
        };

        self.sink.emit(ImportEvent::ParseEnded {
            transactions: outcome.transactions().len(),
        });
        self.state = ImportState::Idle;
        log_outcome(&outcome, &config.account);
        outcome
    }

    /// Validate an already reviewed grid without re-parsing it
    pub fn save_reviewed(&self, grid: &RawGrid, config: &ImportConfig) -> ImportOutcome {
        let outcome = ImportOutcome::from_batch(validate_batch(grid, config));
        log_outcome(&outcome, &config.account);
        outcome
    }
}

fn log_outcome(outcome: &ImportOutcome, account: &str) {
    match outcome {
        ImportOutcome::Succeeded(transactions) => {
            info!(account, transactions = transactions.len(), "import succeeded")
        }
        ImportOutcome::Failed(errors) => {
            for error in errors {
                warn!(kind = %error.kind, message = %error.message, "import failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid;
    use crate::import::columns::{ColumnRole, ColumnSpec};
    use crate::import::validate::ImportErrorKind;
    use std::sync::mpsc;

    fn config(account: &str) -> ImportConfig {
        ImportConfig::new(
            ColumnSpec::new([
                ColumnRole::Date,
                ColumnRole::Description,
                ColumnRole::Amount,
                ColumnRole::Total,
            ]),
            account,
        )
        .with_skip_rows(1)
    }

    const FILE: &[u8] = b"Date,Description,Amount,Total\n2018-01-01,Cool stuff,123,456\n";

    #[test]
    fn test_import_file_success_emits_events() {
        crate::logging::init_test();
        let (tx, rx) = mpsc::channel::<ImportEvent>();
        let mut controller = ImportController::new(tx);

        let outcome = controller.import_file(FILE, &config("acc-1"));
        assert!(outcome.is_success());
        assert_eq!(outcome.transactions().len(), 1);
        assert_eq!(outcome.transactions()[0].account, "acc-1");
        assert!(outcome.errors().is_empty());
        assert_eq!(controller.state(), ImportState::Idle);

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                ImportEvent::ParseStarted,
                ImportEvent::ParseEnded { transactions: 1 }
            ]
        );
    }

    #[test]
    fn test_ragged_file_is_upload_error() {
        let (tx, rx) = mpsc::channel::<ImportEvent>();
        let mut controller = ImportController::new(tx);

        let outcome = controller.import_file(b"a,b,c\ne,f", &ImportConfig::default());
        let errors = outcome.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ImportErrorKind::Upload);
        assert!(errors[0].message.contains("Cannot parse the file"));

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                ImportEvent::ParseStarted,
                ImportEvent::ParseEnded { transactions: 0 }
            ]
        );
        assert_eq!(controller.state(), ImportState::Idle);
    }

    #[test]
    fn test_empty_file_is_only_upload_error() {
        let mut controller = ImportController::default();
        // Empty account would also fail, but upload short-circuits
        let outcome = controller.import_file(b"", &config(""));
        assert_eq!(outcome.errors().len(), 1);
        assert_eq!(outcome.errors()[0].kind, ImportErrorKind::Upload);
    }

    #[test]
    fn test_file_with_empty_account() {
        let mut controller = ImportController::default();
        let outcome = controller.import_file(FILE, &config(""));
        assert_eq!(
            outcome.into_result().unwrap_err(),
            vec![ImportError::new(ImportErrorKind::Account, "Account is required")]
        );
    }

    #[test]
    fn test_save_reviewed_emits_nothing() {
        let (tx, rx) = mpsc::channel::<ImportEvent>();
        let controller = ImportController::new(tx);
        let grid = grid![
            ["Date", "Description", "Amount", "Total"],
            ["2018-01-01", "Cool stuff", 123, 456],
        ];

        let outcome = controller.save_reviewed(&grid, &config("acc-1"));
        assert_eq!(outcome.transactions().len(), 1);
        assert_eq!(rx.try_iter().count(), 0);
    }

    #[test]
    fn test_forced_delimiter() {
        let mut controller = ImportController::default()
            .with_parse_options(ParseOptions { delimiter: Some(b';') });
        let content = "Date;Description;Amount;Total\n2018-01-01;Rent, March;-900;0\n";

        let outcome = controller.import_file(content.as_bytes(), &config("acc-1"));
        assert_eq!(outcome.transactions()[0].description, "Rent, March");
    }

    #[test]
    fn test_outcome_is_exclusive() {
        let mut controller = ImportController::default();
        let inputs: [(&[u8], &str); 5] = [
            (FILE, "acc-1"),
            (FILE, ""),
            (b"", "acc-1"),
            (b"a,b,c\ne,f", "acc-1"),
            (b"Date,Description,Amount,Total\nx,y,z,w\n", "acc-1"),
        ];
        for (content, account) in inputs {
            let outcome = controller.import_file(content, &config(account));
            assert_ne!(
                outcome.transactions().is_empty(),
                outcome.errors().is_empty(),
                "{:?}",
                outcome
            );
        }
    }
}
