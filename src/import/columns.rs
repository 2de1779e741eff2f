//! Column spec: which column of the grid feeds which transaction field

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validate::{
    ImportError, DUPLICATE_AMOUNT_COLUMN, DUPLICATE_DATE_COLUMN, MISSING_AMOUNT_COLUMN,
    MISSING_DATE_COLUMN,
};
use crate::error::OtbError;

/// Semantic role of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRole {
    Date,
    Description,
    Amount,
    Total,
    #[default]
    #[serde(alias = "")]
    Unused,
}

impl ColumnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Description => "description",
            Self::Amount => "amount",
            Self::Total => "total",
            Self::Unused => "unused",
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnRole {
    type Err = OtbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "description" | "desc" => Ok(Self::Description),
            "amount" => Ok(Self::Amount),
            "total" | "balance" => Ok(Self::Total),
            "" | "-" | "_" | "unused" | "skip" => Ok(Self::Unused),
            other => Err(OtbError::Validation(format!(
                "Unknown column role '{}' (expected date, description, amount, total or -)",
                other
            ))),
        }
    }
}

/// One entry of a column spec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColumnDef {
    #[serde(rename = "type", default)]
    pub role: ColumnRole,
}

impl From<ColumnRole> for ColumnDef {
    fn from(role: ColumnRole) -> Self {
        Self { role }
    }
}

/// Ordered column roles, one per grid column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnSpec {
    columns: Vec<ColumnDef>,
}

/// Column indices of a spec that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub date: usize,
    pub amount: usize,
    pub description: Option<usize>,
    pub total: Option<usize>,
}

impl ColumnSpec {
    pub fn new(roles: impl IntoIterator<Item = ColumnRole>) -> Self {
        Self {
            columns: roles.into_iter().map(ColumnDef::from).collect(),
        }
    }

    pub fn roles(&self) -> impl Iterator<Item = ColumnRole> + '_ {
        self.columns.iter().map(|c| c.role)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn indices_of(&self, role: ColumnRole) -> Vec<usize> {
        self.roles()
            .enumerate()
            .filter(|(_, r)| *r == role)
            .map(|(i, _)| i)
            .collect()
    }

    /// Check the structural rules: exactly one date column, then exactly
    /// one amount column
    ///
    /// Only the first violation is returned. Description and total columns
    /// are optional; when several carry the same role the leftmost is used.
    pub fn validate(&self) -> Result<ColumnLayout, ImportError> {
        let date = exactly_one(
            &self.indices_of(ColumnRole::Date),
            MISSING_DATE_COLUMN,
            DUPLICATE_DATE_COLUMN,
        )?;
        let amount = exactly_one(
            &self.indices_of(ColumnRole::Amount),
            MISSING_AMOUNT_COLUMN,
            DUPLICATE_AMOUNT_COLUMN,
        )?;

        Ok(ColumnLayout {
            date,
            amount,
            description: self.indices_of(ColumnRole::Description).first().copied(),
            total: self.indices_of(ColumnRole::Total).first().copied(),
        })
    }
}

fn exactly_one(indices: &[usize], missing: &str, duplicate: &str) -> Result<usize, ImportError> {
    match indices {
        [only] => Ok(*only),
        [] => Err(ImportError::column_spec(missing)),
        _ => Err(ImportError::column_spec(duplicate)),
    }
}

impl FromIterator<ColumnRole> for ColumnSpec {
    fn from_iter<I: IntoIterator<Item = ColumnRole>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Parse the comma separated shorthand, e.g. `date,description,amount,-,total`
impl FromStr for ColumnSpec {
    type Err = OtbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',').map(ColumnRole::from_str).collect()
    }
}

impl fmt::Display for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let roles: Vec<&str> = self.roles().map(|r| r.as_str()).collect();
        f.write_str(&roles.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::validate::ImportErrorKind;
    use ColumnRole::*;

    #[test]
    fn test_valid_layout() {
        let spec = ColumnSpec::new([Date, Description, Amount, Total]);
        let layout = spec.validate().unwrap();
        assert_eq!(
            layout,
            ColumnLayout {
                date: 0,
                amount: 2,
                description: Some(1),
                total: Some(3),
            }
        );
    }

    #[test]
    fn test_optional_columns() {
        let layout = ColumnSpec::new([Amount, Unused, Date]).validate().unwrap();
        assert_eq!(layout.date, 2);
        assert_eq!(layout.amount, 0);
        assert_eq!(layout.description, None);
        assert_eq!(layout.total, None);
    }

    #[test]
    fn test_missing_date_column() {
        let err = ColumnSpec::new([Unused, Description, Amount]).validate().unwrap_err();
        assert_eq!(err.kind, ImportErrorKind::ColumnSpec);
        assert_eq!(err.message, "Please select a date column");
    }

    #[test]
    fn test_missing_amount_column() {
        let err = ColumnSpec::new([Date, Description]).validate().unwrap_err();
        assert_eq!(err.message, "Please select an amount column");
    }

    #[test]
    fn test_date_reported_before_amount() {
        let err = ColumnSpec::new([Description, Total]).validate().unwrap_err();
        assert_eq!(err.message, "Please select a date column");

        let err = ColumnSpec::default().validate().unwrap_err();
        assert_eq!(err.message, "Please select a date column");
    }

    #[test]
    fn test_duplicate_roles() {
        let err = ColumnSpec::new([Date, Date, Amount]).validate().unwrap_err();
        assert_eq!(err.message, "Please select only one date column");

        let err = ColumnSpec::new([Date, Amount, Amount]).validate().unwrap_err();
        assert_eq!(err.message, "Please select only one amount column");
    }

    #[test]
    fn test_first_description_wins() {
        let layout = ColumnSpec::new([Date, Description, Amount, Description])
            .validate()
            .unwrap();
        assert_eq!(layout.description, Some(1));
    }

    #[test]
    fn test_deserialize_type_entries() {
        let spec: ColumnSpec = serde_json::from_str(
            r#"[{"type": "date"}, {"type": ""}, {"type": "amount"}, {}]"#,
        )
        .unwrap();
        let roles: Vec<_> = spec.roles().collect();
        assert_eq!(roles, vec![Date, Unused, Amount, Unused]);
    }

    #[test]
    fn test_shorthand() {
        let spec: ColumnSpec = "date, desc,amount,-,total".parse().unwrap();
        assert_eq!(spec.to_string(), "date,description,amount,unused,total");
        assert!("date,price".parse::<ColumnSpec>().is_err());
    }
}
