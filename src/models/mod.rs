//! Core data models for Off The Books

pub mod ids;
pub mod money;
pub mod transaction;

pub use ids::{BatchId, TransactionId};
pub use money::Money;
pub use transaction::Transaction;
