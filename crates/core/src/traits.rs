//! The storage collaborator
//!
//! `Database` is the seam between the row-level facade and whatever client
//! actually holds the table. `rowstore-storage` provides the in-process
//! implementation; a managed service client would sit behind the same trait.

use crate::column::ColumnRef;
use crate::contract::Timestamp;
use crate::error::Result;
use crate::filter::RowFilter;
use crate::mutation::RowMutation;
use crate::row::Row;

/// Row-oriented table client
///
/// Thread safety: implementations must be safe to share between threads
/// (`Send + Sync`).
pub trait Database: Send + Sync {
    /// Apply a row mutation atomically.
    ///
    /// Cells written without an explicit timestamp receive the returned
    /// commit timestamp. Creates the row on first write.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for empty mutations or invalid names, or
    /// whatever the underlying client reports.
    fn mutate_row(&self, mutation: RowMutation) -> Result<Timestamp>;

    /// Read one row, narrowed by `filter`.
    ///
    /// Returns `None` if the row does not exist or the filter leaves no
    /// cells.
    fn read_row(&self, row_key: &str, filter: Option<&RowFilter>) -> Result<Option<Row>>;

    /// Read every row in ascending row-key order, narrowed by `filter`.
    ///
    /// Rows the filter empties are omitted.
    fn read_rows(&self, filter: Option<&RowFilter>) -> Result<Vec<(String, Row)>>;

    /// Write a single cell.
    fn write(
        &self,
        row_key: &str,
        column: &ColumnRef,
        value: &str,
        timestamp: Option<Timestamp>,
    ) -> Result<Timestamp> {
        let mutation = match timestamp {
            Some(ts) => RowMutation::new(row_key).set_cell_at(column.clone(), value, ts),
            None => RowMutation::new(row_key).set_cell(column.clone(), value),
        };
        let commit = self.mutate_row(mutation)?;
        Ok(timestamp.unwrap_or(commit))
    }

    /// Delete a whole row. Deleting an absent row is not an error.
    fn delete_row(&self, row_key: &str) -> Result<()> {
        self.mutate_row(RowMutation::new(row_key).delete_row())
            .map(|_| ())
    }
}
