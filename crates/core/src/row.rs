//! Sparse row: family → qualifier → cells
//!
//! `Row` is an explicit two-level ordered mapping. Iteration is family name
//! ascending, then qualifier ascending, then newest cell first.
//!
//! ## Invariants
//!
//! - Every column's cell list is sorted by timestamp, descending
//! - No two cells of a column share a timestamp (a second write at the
//!   same timestamp replaces the first)
//! - No family or column is stored with zero cells
//!
//! An empty row is never returned by a read; stores treat it as absent.

use crate::column::ColumnRef;
use crate::contract::{Cell, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Qualifier → cells (newest-first) for one family
pub type Family = BTreeMap<String, Vec<Cell>>;

/// All cells of one row, grouped by family and qualifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    families: BTreeMap<String, Family>,
}

impl Row {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a cell, keeping the column newest-first.
    ///
    /// A cell whose timestamp equals an existing one replaces it. Returns
    /// the replaced cell, if any.
    pub fn insert(&mut self, column: &ColumnRef, cell: Cell) -> Option<Cell> {
        let cells = self
            .families
            .entry(column.family.clone())
            .or_default()
            .entry(column.qualifier.clone())
            .or_default();

        // Descending order: search with reversed comparison
        match cells.binary_search_by(|other| cell.timestamp.cmp(&other.timestamp)) {
            Ok(idx) => Some(std::mem::replace(&mut cells[idx], cell)),
            Err(idx) => {
                cells.insert(idx, cell);
                None
            }
        }
    }

    /// Builder form of [`Row::insert`]
    pub fn with_cell(mut self, column: &ColumnRef, cell: Cell) -> Self {
        self.insert(column, cell);
        self
    }

    /// All cells of a column, newest-first. Empty if absent.
    pub fn cells(&self, column: &ColumnRef) -> &[Cell] {
        self.families
            .get(&column.family)
            .and_then(|f| f.get(&column.qualifier))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Latest cell of a column
    pub fn latest(&self, column: &ColumnRef) -> Option<&Cell> {
        self.cells(column).first()
    }

    /// Latest value of a column
    pub fn value(&self, column: &ColumnRef) -> Option<&str> {
        self.latest(column).map(Cell::value)
    }

    /// True if the column has at least one cell
    pub fn contains(&self, column: &ColumnRef) -> bool {
        !self.cells(column).is_empty()
    }

    /// Get one family's qualifiers
    pub fn family(&self, name: &str) -> Option<&Family> {
        self.families.get(name)
    }

    /// Family names, ascending
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.families.keys().map(String::as_str)
    }

    /// Every column with its cells, in iteration order
    pub fn columns(&self) -> impl Iterator<Item = (&str, &str, &[Cell])> {
        self.families.iter().flat_map(|(family, quals)| {
            quals
                .iter()
                .map(move |(q, cells)| (family.as_str(), q.as_str(), cells.as_slice()))
        })
    }

    /// Every column with its latest cell, in iteration order
    pub fn iter_latest(&self) -> impl Iterator<Item = (&str, &str, &Cell)> {
        self.columns()
            .filter_map(|(f, q, cells)| cells.first().map(|c| (f, q, c)))
    }

    /// `family:qualifier` → latest value
    pub fn to_flat_map(&self) -> BTreeMap<String, String> {
        self.iter_latest()
            .map(|(f, q, c)| (format!("{}:{}", f, q), c.value.clone()))
            .collect()
    }

    /// Remove every version of a column. Returns true if it existed.
    pub fn remove_column(&mut self, column: &ColumnRef) -> bool {
        let Some(quals) = self.families.get_mut(&column.family) else {
            return false;
        };
        let removed = quals.remove(&column.qualifier).is_some();
        if quals.is_empty() {
            self.families.remove(&column.family);
        }
        removed
    }

    /// Remove a whole family. Returns true if it existed.
    pub fn remove_family(&mut self, family: &str) -> bool {
        self.families.remove(family).is_some()
    }

    /// Keep only the newest `max_versions` cells of every column.
    ///
    /// `max_versions == 0` empties the row.
    pub fn truncate_versions(&mut self, max_versions: usize) {
        for quals in self.families.values_mut() {
            for cells in quals.values_mut() {
                cells.truncate(max_versions);
            }
            quals.retain(|_, cells| !cells.is_empty());
        }
        self.families.retain(|_, quals| !quals.is_empty());
    }

    /// Keep only the named family
    pub fn retain_family(&mut self, family: &str) {
        self.families.retain(|name, _| name == family);
    }

    /// Keep only the named column
    pub fn retain_column(&mut self, column: &ColumnRef) {
        self.retain_family(&column.family);
        if let Some(quals) = self.families.get_mut(&column.family) {
            quals.retain(|q, _| q == &column.qualifier);
            if quals.is_empty() {
                self.families.clear();
            }
        }
    }

    /// True if the row holds no cells
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Number of (family, qualifier) columns
    pub fn column_count(&self) -> usize {
        self.families.values().map(BTreeMap::len).sum()
    }

    /// Total number of cells across all versions
    pub fn cell_count(&self) -> usize {
        self.columns().map(|(_, _, cells)| cells.len()).sum()
    }

    /// Newest timestamp anywhere in the row
    pub fn newest_timestamp(&self) -> Option<Timestamp> {
        self.iter_latest().map(|(_, _, c)| c.timestamp).max()
    }
}
