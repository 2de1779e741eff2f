//! Strongly-typed ID wrappers for stored records
//!
//! Every persisted transaction gets a [`TransactionId`]; every saved import
//! run gets a [`BatchId`] shared by its transactions.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $display_prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        /// Short form for terminal output: prefix plus the first 8 hex digits
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.simple().to_string()[..8])
            }
        }
    };
}

define_id!(
    /// Identity of one stored transaction
    TransactionId,
    "txn-"
);
define_id!(
    /// Identity of one saved import run
    BatchId,
    "imp-"
);
