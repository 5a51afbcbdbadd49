//! Cells and cell version histories
//!
//! A `Cell` is one timestamped value at (row, family, qualifier). Cells are
//! immutable once written; a column keeps several of them as versions.
//!
//! `CellHistory` wraps a non-empty list of cells ordered newest-first. Index
//! into it the way you would a slice: `h[0]` is the latest version.

use super::Timestamp;
use crate::error::{Error, Result};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// A single timestamped value.
///
/// Values are stored as strings, which is how the demonstration data and
/// wide-column stores in general represent them. Use [`Cell::typed`] or
/// [`Cell::parse_i64`] to interpret them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Raw cell contents
    pub value: String,

    /// Write time of this version
    pub timestamp: Timestamp,
}

impl Cell {
    /// Create a cell with an explicit timestamp
    pub fn new(value: impl Into<String>, timestamp: Timestamp) -> Self {
        Cell {
            value: value.into(),
            timestamp,
        }
    }

    /// Get the raw value
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Get the timestamp
    #[inline]
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Interpret the value as the narrowest matching [`Value`].
    pub fn typed(&self) -> Value {
        Value::infer(&self.value)
    }

    /// Parse the value as a signed integer.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns `Error::MalformedValue` if the value is not an integer.
    pub fn parse_i64(&self) -> Result<i64> {
        self.value
            .trim()
            .parse::<i64>()
            .map_err(|e| Error::MalformedValue {
                value: self.value.clone(),
                reason: e.to_string(),
            })
    }
}

/// Non-empty sequence of cells for one column, newest-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellHistory {
    /// Always non-empty, descending by timestamp.
    cells: Vec<Cell>,
}

impl CellHistory {
    /// Wrap a newest-first list of cells.
    ///
    /// Returns `None` if the input is empty (column does not exist).
    pub fn new(cells: Vec<Cell>) -> Option<Self> {
        if cells.is_empty() {
            None
        } else {
            Some(Self { cells })
        }
    }

    /// The latest cell.
    pub fn latest(&self) -> &Cell {
        &self.cells[0]
    }

    /// The latest value.
    pub fn value(&self) -> &str {
        &self.cells[0].value
    }

    /// Timestamp of the latest cell.
    pub fn timestamp(&self) -> Timestamp {
        self.cells[0].timestamp
    }

    /// Number of versions.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; present for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// All cells, newest-first.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl Index<usize> for CellHistory {
    type Output = Cell;

    fn index(&self, index: usize) -> &Self::Output {
        &self.cells[index]
    }
}

impl IntoIterator for CellHistory {
    type Item = Cell;
    type IntoIter = std::vec::IntoIter<Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}
