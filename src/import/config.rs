//! Per-run import configuration and the reviewed-import document

use serde::{Deserialize, Serialize};

use super::coerce::{DateFormat, NumberLocale};
use super::columns::ColumnSpec;
use super::grid::RawGrid;
use crate::config::Settings;
use crate::error::{OtbError, OtbResult};

/// Everything the pipeline needs besides the data itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportConfig {
    #[serde(default)]
    pub column_spec: ColumnSpec,

    /// Leading rows to ignore (headers)
    #[serde(default)]
    pub skip_rows: usize,

    /// Empty means permissive parsing
    #[serde(default)]
    pub date_format: String,

    /// Account every imported transaction is tagged with
    #[serde(default)]
    pub account: String,

    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: char,
}

fn default_decimal_separator() -> char {
    '.'
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self::new(ColumnSpec::default(), String::new())
    }
}

impl ImportConfig {
    pub fn new(column_spec: ColumnSpec, account: impl Into<String>) -> Self {
        Self {
            column_spec,
            skip_rows: 0,
            date_format: String::new(),
            account: account.into(),
            decimal_separator: default_decimal_separator(),
        }
    }

    /// Start from the user's saved defaults
    pub fn from_settings(settings: &Settings, column_spec: ColumnSpec) -> Self {
        Self {
            column_spec,
            skip_rows: settings.default_skip_rows,
            date_format: settings.default_date_format.clone(),
            account: settings.default_account.clone().unwrap_or_default(),
            decimal_separator: settings.decimal_separator,
        }
    }

    pub fn with_skip_rows(mut self, skip_rows: usize) -> Self {
        self.skip_rows = skip_rows;
        self
    }

    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    pub fn date_format(&self) -> DateFormat {
        DateFormat::from_user(&self.date_format)
    }

    pub fn number_locale(&self) -> NumberLocale {
        NumberLocale::with_decimal_separator(self.decimal_separator)
    }

    /// Reject number locales the amount coercer cannot honour
    pub fn validate(&self) -> OtbResult<()> {
        if self.decimal_separator != '.' && self.decimal_separator != ',' {
            return Err(OtbError::Validation(format!(
                "Decimal separator must be '.' or ',', got '{}'",
                self.decimal_separator
            )));
        }
        Ok(())
    }
}

/// A grid already parsed and reviewed, plus the config to save it with
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewedImport {
    pub data: RawGrid,
    #[serde(flatten)]
    pub config: ImportConfig,
}

impl ReviewedImport {
    /// Read a reviewed import from JSON, or YAML when the name ends in `.yaml`/`.yml`
    pub fn from_str_with_name(content: &str, file_name: &str) -> OtbResult<Self> {
        let invalid = |e: &dyn std::fmt::Display| {
            OtbError::Import(format!("Invalid review file {}: {}", file_name, e))
        };

        let lower = file_name.to_lowercase();
        let reviewed: Self = if lower.ends_with(".yaml") || lower.ends_with(".yml") {
            serde_yaml::from_str(content).map_err(|e| invalid(&e))?
        } else {
            serde_json::from_str(content).map_err(|e| invalid(&e))?
        };

        reviewed.config.validate().map_err(|e| invalid(&e))?;
        Ok(reviewed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::columns::ColumnRole;
    use crate::import::grid::Cell;

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            default_date_format: "DD/MM/YYYY".into(),
            default_skip_rows: 2,
            default_account: Some("savings".into()),
            decimal_separator: ',',
            ..Settings::default()
        };
        let config = ImportConfig::from_settings(&settings, ColumnSpec::default());
        assert_eq!(config.skip_rows, 2);
        assert_eq!(config.account, "savings");
        assert_eq!(config.date_format(), DateFormat::Strict("%d/%m/%Y".into()));
        assert_eq!(config.number_locale().decimal_separator, ',');
    }

    #[test]
    fn test_reviewed_import_json() {
        let json = r#"{
            "data": [["Date", "Description", "Amount", "Total"],
                     ["2018-01-01", "Cool stuff", 123, 456]],
            "skipRows": 1,
            "columnSpec": [{"type": "date"}, {"type": "description"},
                           {"type": "amount"}, {"type": "total"}],
            "dateFormat": "",
            "account": "acc-1"
        }"#;
        let reviewed = ReviewedImport::from_str_with_name(json, "review.json").unwrap();
        assert_eq!(reviewed.data.len(), 2);
        assert_eq!(reviewed.data.rows()[1][2], Cell::Number(123.0));
        assert_eq!(reviewed.config.skip_rows, 1);
        assert_eq!(reviewed.config.account, "acc-1");
        assert_eq!(reviewed.config.decimal_separator, '.');
        assert_eq!(
            reviewed.config.column_spec.roles().collect::<Vec<_>>(),
            vec![
                ColumnRole::Date,
                ColumnRole::Description,
                ColumnRole::Amount,
                ColumnRole::Total
            ]
        );
    }

    #[test]
    fn test_reviewed_import_yaml() {
        let yaml = "data:\n  - [Date, Amount]\n  - ['2018-01-01', 5]\nskipRows: 1\ncolumnSpec:\n  - type: date\n  - type: amount\naccount: acc-1\n";
        let reviewed = ReviewedImport::from_str_with_name(yaml, "review.yml").unwrap();
        assert_eq!(reviewed.data.rows()[1][1], Cell::Number(5.0));
        assert_eq!(reviewed.config.column_spec.len(), 2);
    }

    #[test]
    fn test_review_file_with_bad_decimal_separator() {
        let json = r#"{"data": [["2018-01-01", "-5"]], "account": "acc-1", "decimalSeparator": "-"}"#;
        let err = ReviewedImport::from_str_with_name(json, "review.json").unwrap_err();
        assert!(matches!(err, OtbError::Import(_)));
        assert!(err.to_string().contains("Decimal separator"));
    }

    #[test]
    fn test_validate_decimal_separator() {
        let mut config = ImportConfig::default();
        assert_eq!(config.decimal_separator, '.');
        assert!(config.validate().is_ok());
        config.decimal_separator = ',';
        assert!(config.validate().is_ok());
        config.decimal_separator = ';';
        assert!(config.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_invalid_review_file() {
        let err = ReviewedImport::from_str_with_name("{", "review.json").unwrap_err();
        assert!(matches!(err, OtbError::Import(_)));
    }
}
