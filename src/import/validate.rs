//! Structured import errors and the per-run error set
//!
//! Errors are deduplicated by kind: a run reports at most one message per
//! kind, and the first message recorded for a kind wins.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub const MISSING_DATE_COLUMN: &str = "Please select a date column";
pub const MISSING_AMOUNT_COLUMN: &str = "Please select an amount column";
pub const DUPLICATE_DATE_COLUMN: &str = "Please select only one date column";
pub const DUPLICATE_AMOUNT_COLUMN: &str = "Please select only one amount column";
pub const UNPARSED_AMOUNTS: &str =
    "Cannot parse all amounts as numbers, perhaps you need to skip a header?";
pub const UNPARSED_DATES: &str =
    "Cannot parse all dates correctly, perhaps you need to skip a header, or change the date format?";
pub const ACCOUNT_REQUIRED: &str = "Account is required";
pub const UPLOAD_PREFIX: &str = "Cannot parse the file";

/// Category of an import error
///
/// Declaration order is the order errors are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImportErrorKind {
    Upload,
    ColumnSpec,
    Amount,
    Date,
    Account,
}

impl ImportErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::ColumnSpec => "columnSpec",
            Self::Amount => "amount",
            Self::Date => "date",
            Self::Account => "account",
        }
    }
}

impl fmt::Display for ImportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-facing import failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportError {
    #[serde(rename = "type")]
    pub kind: ImportErrorKind,
    pub message: String,
}

impl ImportError {
    pub fn new(kind: ImportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// An `upload` error; the detail is appended to the fixed prefix
    pub fn upload(detail: impl fmt::Display) -> Self {
        Self::new(ImportErrorKind::Upload, format!("{}: {}", UPLOAD_PREFIX, detail))
    }

    pub fn column_spec(message: &str) -> Self {
        Self::new(ImportErrorKind::ColumnSpec, message)
    }
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Errors collected during one run, at most one per kind
#[derive(Debug, Clone, Default)]
pub struct ErrorSet {
    errors: BTreeMap<ImportErrorKind, String>,
}

impl ErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error unless one of the same kind is already present
    pub fn insert(&mut self, error: ImportError) {
        self.errors.entry(error.kind).or_insert(error.message);
    }

    pub fn contains(&self, kind: ImportErrorKind) -> bool {
        self.errors.contains_key(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Errors in reporting order
    pub fn into_vec(self) -> Vec<ImportError> {
        self.errors
            .into_iter()
            .map(|(kind, message)| ImportError { kind, message })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serializes_with_type_key() {
        let err = ImportError::new(ImportErrorKind::ColumnSpec, MISSING_DATE_COLUMN);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "columnSpec", "message": "Please select a date column"})
        );
    }

    #[test]
    fn test_upload_message_prefix() {
        let err = ImportError::upload("the file is empty");
        assert_eq!(err.kind, ImportErrorKind::Upload);
        assert_eq!(err.message, "Cannot parse the file: the file is empty");
        assert_eq!(err.to_string(), "upload: Cannot parse the file: the file is empty");
    }

    #[test]
    fn test_error_set_keeps_first_per_kind() {
        let mut set = ErrorSet::new();
        set.insert(ImportError::column_spec(MISSING_DATE_COLUMN));
        set.insert(ImportError::column_spec(MISSING_AMOUNT_COLUMN));
        assert_eq!(set.len(), 1);
        assert_eq!(set.into_vec()[0].message, MISSING_DATE_COLUMN);
    }

    #[test]
    fn test_error_set_reports_in_kind_order() {
        let mut set = ErrorSet::new();
        set.insert(ImportError::new(ImportErrorKind::Account, ACCOUNT_REQUIRED));
        set.insert(ImportError::new(ImportErrorKind::Date, UNPARSED_DATES));
        set.insert(ImportError::new(ImportErrorKind::Amount, UNPARSED_AMOUNTS));

        let kinds: Vec<_> = set.into_vec().into_iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ImportErrorKind::Amount,
                ImportErrorKind::Date,
                ImportErrorKind::Account
            ]
        );
    }
}
