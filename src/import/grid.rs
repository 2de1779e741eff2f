//! Raw tabular data as produced by the parser or supplied for review
//!
//! A grid is not guaranteed to be rectangular; callers decide what a ragged
//! grid means.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single cell: free text, or a number already typed by an earlier tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl Cell {
    /// The cell as text, numbers rendered with their shortest representation
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Cell::Text(s) => Cow::Borrowed(s.as_str()),
            Cell::Number(n) => Cow::Owned(n.to_string()),
        }
    }

    /// True for empty or whitespace-only text
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<i32> for Cell {
    fn from(n: i32) -> Self {
        Cell::Number(f64::from(n))
    }
}

/// Ordered rows of ordered cells
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawGrid {
    rows: Vec<Vec<Cell>>,
}

impl RawGrid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of cells in the widest row
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Every row has the same number of cells
    pub fn is_rectangular(&self) -> bool {
        match self.rows.first() {
            Some(first) => self.rows.iter().all(|row| row.len() == first.len()),
            None => true,
        }
    }

    /// Index of the first row whose length differs from the first row's
    pub fn first_ragged_row(&self) -> Option<usize> {
        let expected = self.rows.first()?.len();
        self.rows.iter().position(|row| row.len() != expected)
    }
}

impl From<Vec<Vec<Cell>>> for RawGrid {
    fn from(rows: Vec<Vec<Cell>>) -> Self {
        Self::new(rows)
    }
}

/// Build a grid from literal rows, mixing text and numbers
///
/// ```
/// use off_the_books::grid;
/// let g = grid![["Date", "Amount"], ["2018-01-01", 12]];
/// assert_eq!(g.len(), 2);
/// ```
#[macro_export]
macro_rules! grid {
    ($([$($cell:expr),* $(,)?]),* $(,)?) => {
        $crate::import::RawGrid::new(vec![
            $(vec![$($crate::import::Cell::from($cell)),*]),*
        ])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text() {
        assert_eq!(Cell::from("abc").as_text(), "abc");
        assert_eq!(Cell::from(123).as_text(), "123");
        assert_eq!(Cell::from(12.5).as_text(), "12.5");
        assert!(Cell::from("  ").is_blank());
        assert!(!Cell::from(0).is_blank());
    }

    #[test]
    fn test_cells_deserialize_untagged() {
        let grid: RawGrid = serde_json::from_str(r#"[["Date", 1.5], ["x", 2]]"#).unwrap();
        assert_eq!(grid.rows()[0][0], Cell::Text("Date".into()));
        assert_eq!(grid.rows()[0][1], Cell::Number(1.5));
        assert_eq!(grid.rows()[1][1], Cell::Number(2.0));
    }

    #[test]
    fn test_rectangular() {
        let g = grid![["a", "b"], ["c", "d"]];
        assert!(g.is_rectangular());
        assert_eq!(g.width(), 2);
        assert_eq!(g.first_ragged_row(), None);

        let ragged = grid![["a", "b", "c"], ["e", "f"]];
        assert!(!ragged.is_rectangular());
        assert_eq!(ragged.first_ragged_row(), Some(1));
        assert_eq!(ragged.width(), 3);
    }

    #[test]
    fn test_empty_grid() {
        let g = RawGrid::default();
        assert!(g.is_empty());
        assert!(g.is_rectangular());
        assert_eq!(g.width(), 0);
    }
}
