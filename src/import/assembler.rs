//! Row assembler and batch validator
//!
//! Rows are mapped once. Each field keeps an attempted/succeeded tally and
//! the batch fails on a field only when no row parsed it at all; a stray
//! header row that was not skipped is simply dropped.

use tracing::{debug, trace};

use super::coerce::{coerce_amount, coerce_date, coerce_description};
use super::columns::ColumnLayout;
use super::config::ImportConfig;
use super::grid::RawGrid;
use super::validate::{
    ErrorSet, ImportError, ImportErrorKind, ACCOUNT_REQUIRED, UNPARSED_AMOUNTS, UNPARSED_DATES,
};
use crate::models::Transaction;

/// Attempted and successful coercions of one field across a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldTally {
    pub attempted: usize,
    pub succeeded: usize,
}

impl FieldTally {
    fn record(&mut self, ok: bool) {
        self.attempted += 1;
        if ok {
            self.succeeded += 1;
        }
    }

    /// True when no row parsed this field, including an empty batch
    pub fn none_parsed(&self) -> bool {
        self.succeeded == 0
    }
}

/// Result of mapping every data row of a grid
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    /// Rows whose date and amount both parsed, in grid order
    pub transactions: Vec<Transaction>,
    pub dates: FieldTally,
    pub amounts: FieldTally,
}

/// Map the rows after `skip_rows` through the coercers
pub fn assemble_rows(grid: &RawGrid, layout: &ColumnLayout, config: &ImportConfig) -> Assembly {
    let date_format = config.date_format();
    let locale = config.number_locale();
    let account = config.account.trim();

    let mut assembly = Assembly::default();
    for (index, row) in grid.rows().iter().enumerate().skip(config.skip_rows) {
        let date = coerce_date(row.get(layout.date), &date_format);
        let amount = coerce_amount(row.get(layout.amount), locale);
        assembly.dates.record(date.is_ok());
        assembly.amounts.record(amount.is_ok());

        match (date, amount) {
            (Ok(date), Ok(amount)) => {
                let description = coerce_description(layout.description.and_then(|i| row.get(i)));
                let total = layout
                    .total
                    .and_then(|i| coerce_amount(row.get(i), locale).ok());
                assembly.transactions.push(
                    Transaction::new(date, amount, account)
                        .with_description(description)
                        .with_total(total),
                );
            }
            (date, amount) => {
                trace!(
                    row = index,
                    date_error = ?date.err(),
                    amount_error = ?amount.err(),
                    "dropping row"
                );
            }
        }
    }
    assembly
}

/// Validate a grid against a config and build the batch
///
/// A column spec error suppresses the amount and date checks; only the
/// account check still runs. Otherwise the amount, date and account checks
/// run independently and may all report. Exactly one of
/// the two sides is non-empty.
pub fn validate_batch(
    grid: &RawGrid,
    config: &ImportConfig,
) -> Result<Vec<Transaction>, Vec<ImportError>> {
    let layout = match config.column_spec.validate() {
        Ok(layout) => layout,
        Err(spec_error) => {
            let mut errors = ErrorSet::new();
            errors.insert(spec_error);
            check_account(config, &mut errors);
            return Err(errors.into_vec());
        }
    };

    let assembly = assemble_rows(grid, &layout, config);
    debug!(
        rows = assembly.dates.attempted,
        dates = assembly.dates.succeeded,
        amounts = assembly.amounts.succeeded,
        complete = assembly.transactions.len(),
        "assembled rows"
    );

    let mut errors = ErrorSet::new();
    if assembly.amounts.none_parsed() {
        errors.insert(ImportError::new(ImportErrorKind::Amount, UNPARSED_AMOUNTS));
    }
    if assembly.dates.none_parsed() {
        errors.insert(ImportError::new(ImportErrorKind::Date, UNPARSED_DATES));
    }
    check_account(config, &mut errors);
    // Dates and amounts parsed, but never on the same row
    if errors.is_empty() && assembly.transactions.is_empty() {
        errors.insert(ImportError::new(ImportErrorKind::Date, UNPARSED_DATES));
    }

    if errors.is_empty() {
        Ok(assembly.transactions)
    } else {
        Err(errors.into_vec())
    }
}

/// The account check ignores the rows and the column spec
fn check_account(config: &ImportConfig, errors: &mut ErrorSet) {
    if config.account.trim().is_empty() {
        errors.insert(ImportError::new(ImportErrorKind::Account, ACCOUNT_REQUIRED));
    }
}
