//! Configuration module for Off The Books
//!
//! - Platform path resolution
//! - User settings persistence (import defaults)

pub mod paths;
pub mod settings;

pub use paths::OtbPaths;
pub use settings::Settings;
