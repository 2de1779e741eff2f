//! Transaction import pipeline
//!
//! Raw file content flows one way through this module:
//!
//! 1. [`parser`] splits content into a [`RawGrid`]
//! 2. [`columns`] checks the [`ColumnSpec`] structurally
//! 3. [`coerce`] turns single cells into dates, amounts and descriptions
//! 4. [`assembler`] maps rows and validates the batch
//! 5. [`controller`] runs the whole thing and publishes [`ImportEvent`]s
//!
//! Nothing here touches storage; a successful run hands its transactions
//! back to the caller.

pub mod assembler;
pub mod coerce;
pub mod columns;
pub mod config;
pub mod controller;
pub mod events;
pub mod grid;
pub mod parser;
pub mod validate;

pub use assembler::validate_batch;
pub use columns::{ColumnLayout, ColumnRole, ColumnSpec};
pub use config::{ImportConfig, ReviewedImport};
pub use controller::{parse_upload, ImportController, ImportOutcome, ImportState};
pub use events::{ImportEvent, ImportEventSink, NullSink, TracingSink};
pub use grid::{Cell, RawGrid};
pub use parser::ParseOptions;
pub use validate::{ImportError, ImportErrorKind};
