//! JSON file storage for imported transactions
//!
//! The import pipeline never calls into this module; the CLI hands it a
//! successful batch when the user asks to save.

pub mod file_io;
pub mod transactions;

pub use transactions::{StoredTransaction, TransactionStore};

use crate::config::OtbPaths;

/// Open the transaction store under the configured data directory
pub fn open_transactions(paths: &OtbPaths) -> TransactionStore {
    TransactionStore::new(paths.transactions_file())
}
