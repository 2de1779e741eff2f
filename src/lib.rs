//! Off The Books - import bank exports into typed transactions
//!
//! The core of this crate is the import pipeline in [`import`]: raw file
//! content and an [`import::ImportConfig`] go in, and either a batch of
//! [`models::Transaction`] values or a list of [`import::ImportError`]s
//! comes out, never both.
//!
//! # Architecture
//!
//! - `import`: parser, column spec, field coercers, assembler, controller
//! - `models`: money, transaction and id types
//! - `config`: paths and user settings
//! - `storage`: JSON file storage for saved batches
//! - `display` / `export`: terminal tables and CSV/JSON/YAML output
//! - `cli`: command handlers for the `otb` binary
//!
//! # Example
//!
//! ```rust
//! use off_the_books::import::{ColumnSpec, ImportConfig, ImportController};
//!
//! let spec: ColumnSpec = "date,description,amount".parse().unwrap();
//! let config = ImportConfig::new(spec, "checking").with_skip_rows(1);
//!
//! let mut controller = ImportController::default();
//! let outcome = controller.import_file(b"Date,Memo,Amount\n2018-01-01,Coffee,-3.50\n", &config);
//! assert_eq!(outcome.transactions()[0].amount.cents(), -350);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod import;
pub mod logging;
pub mod models;
pub mod storage;

pub use error::{OtbError, OtbResult};
