//! Path management for Off The Books
//!
//! ## Path Resolution Order
//!
//! 1. `OTB_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories`
//!    (`~/.config/off-the-books` on Linux, `%APPDATA%\off-the-books` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::OtbError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "OTB_DATA_DIR";

/// Manages all paths used by Off The Books
#[derive(Debug, Clone)]
pub struct OtbPaths {
    base_dir: PathBuf,
}

impl OtbPaths {
    /// Create a new OtbPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, OtbError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create OtbPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to transactions.json
    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), OtbError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| OtbError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| OtbError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if settings have been written yet
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, OtbError> {
    ProjectDirs::from("", "", "off-the-books")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| OtbError::Config("Could not determine a home directory".into()))
}
