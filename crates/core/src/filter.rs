//! Server-side read filters
//!
//! A small subset of wide-column row filters, applied by the store before a
//! row is returned. Filters only narrow a row; they never add cells.

use crate::column::ColumnRef;
use crate::row::Row;

/// Read filter applied to each row by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowFilter {
    /// Keep at most N newest cells per column
    CellsColumnLimit(usize),
    /// Keep only one family
    FamilyName(String),
    /// Keep only one column
    Column(ColumnRef),
    /// Apply filters in sequence
    Chain(Vec<RowFilter>),
}

impl RowFilter {
    /// Latest version of every column
    pub fn latest_only() -> Self {
        RowFilter::CellsColumnLimit(1)
    }

    /// Narrow a row. Returns `None` when nothing is left.
    pub fn apply(&self, mut row: Row) -> Option<Row> {
        self.apply_in_place(&mut row);
        if row.is_empty() {
            None
        } else {
            Some(row)
        }
    }

    fn apply_in_place(&self, row: &mut Row) {
        match self {
            RowFilter::CellsColumnLimit(n) => row.truncate_versions(*n),
            RowFilter::FamilyName(family) => row.retain_family(family),
            RowFilter::Column(column) => row.retain_column(column),
            RowFilter::Chain(filters) => {
                for filter in filters {
                    if row.is_empty() {
                        break;
                    }
                    filter.apply_in_place(row);
                }
            }
        }
    }
}
