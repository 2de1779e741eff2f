//! Transaction model
//!
//! The fully typed record an import produces. Date and amount are always
//! typed values; a row that fails to coerce never becomes a Transaction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// A financial transaction ready for persistence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction date
    pub date: NaiveDate,

    /// Free-text description from the bank export
    #[serde(default)]
    pub description: String,

    /// Amount (positive for inflow, negative for outflow), serialized as
    /// integer cents
    pub amount: Money,

    /// Running balance reported by the bank, when mapped and parseable;
    /// integer cents like `amount`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<Money>,

    /// Account identifier the transaction was imported into
    pub account: String,
}

impl Transaction {
    pub fn new(date: NaiveDate, amount: Money, account: impl Into<String>) -> Self {
        Self {
            date,
            description: String::new(),
            amount,
            total: None,
            account: account.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_total(mut self, total: Option<Money>) -> Self {
        self.total = total;
        self
    }

    /// Check if this is an inflow (positive amount)
    pub fn is_inflow(&self) -> bool {
        !self.amount.is_negative() && !self.amount.is_zero()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.amount
        )
    }
}
