//! Transaction store backed by `transactions.json`
//!
//! This is the persistence collaborator of the import pipeline: it takes a
//! finished batch and appends it in one atomic write.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::OtbError;
use crate::models::{BatchId, Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};

/// A transaction as persisted, with its identity and import batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredTransaction {
    pub id: TransactionId,
    pub batch_id: BatchId,
    pub imported_at: DateTime<Utc>,
    #[serde(flatten)]
    pub transaction: Transaction,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TransactionData {
    transactions: Vec<StoredTransaction>,
}

/// File-backed transaction repository
pub struct TransactionStore {
    path: PathBuf,
}

impl TransactionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// All stored transactions in insertion order
    pub fn load_all(&self) -> Result<Vec<StoredTransaction>, OtbError> {
        let data: TransactionData = read_json(&self.path)?;
        Ok(data.transactions)
    }

    /// Append a batch under a fresh batch id
    ///
    /// Either every transaction of the batch is written or none is.
    pub fn append_batch(&self, batch: &[Transaction]) -> Result<BatchId, OtbError> {
        if batch.is_empty() {
            return Err(OtbError::Validation("Refusing to save an empty batch".into()));
        }

        let mut data: TransactionData = read_json(&self.path)?;
        let batch_id = BatchId::new();
        let imported_at = Utc::now();

        data.transactions
            .extend(batch.iter().cloned().map(|transaction| StoredTransaction {
                id: TransactionId::new(),
                batch_id,
                imported_at,
                transaction,
            }));

        write_json_atomic(&self.path, &data)?;
        info!(batch = %batch_id, count = batch.len(), "saved import batch");
        Ok(batch_id)
    }
}
