//! Display formatting for terminal output
//!
//! Tables for transactions and parsed grids, plain lines for errors.

pub mod grid;
pub mod transaction;

pub use grid::format_grid_preview;
pub use transaction::{format_import_errors, format_import_summary, format_transaction_table};
