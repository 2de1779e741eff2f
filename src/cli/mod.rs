//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the import pipeline.

pub mod import;
pub mod output;

pub use import::{
    handle_import_command, handle_preview_command, handle_save_command, ImportArgs,
    PreviewArgs, SaveArgs,
};
pub use output::{render_outcome, OutputFormat};
