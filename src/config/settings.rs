//! User settings for Off The Books
//!
//! Holds the import defaults applied when the command line does not
//! override them: date format, header rows to skip, target account and
//! number locale.

use serde::{Deserialize, Serialize};

use super::paths::OtbPaths;
use crate::error::OtbError;

/// User settings persisted as `config.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Date format used when none is given (empty means permissive parsing)
    #[serde(default)]
    pub default_date_format: String,

    /// Number of header rows skipped when none is given
    #[serde(default)]
    pub default_skip_rows: usize,

    /// Account imported into when none is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_account: Option<String>,

    /// Decimal separator for amounts (`.` or `,`)
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: char,

    /// Field delimiter to force instead of sniffing it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<char>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_decimal_separator() -> char {
    '.'
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_date_format: String::new(),
            default_skip_rows: 0,
            default_account: None,
            decimal_separator: default_decimal_separator(),
            delimiter: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &OtbPaths) -> Result<Self, OtbError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| OtbError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| OtbError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &OtbPaths) -> Result<(), OtbError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| OtbError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| OtbError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject number locales the amount coercer cannot honour
    pub fn validate(&self) -> Result<(), OtbError> {
        if self.decimal_separator != '.' && self.decimal_separator != ',' {
            return Err(OtbError::Config(format!(
                "decimal_separator must be '.' or ',', got '{}'",
                self.decimal_separator
            )));
        }
        Ok(())
    }
}
