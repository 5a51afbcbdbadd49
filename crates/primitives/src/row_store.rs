//! RowStore: row-level facade over a wide-column `Database`
//!
//! ## Design
//!
//! RowStore is a stateless facade. It holds no in-memory state beyond an
//! `Arc<D>` handle to the store, which the caller injects; there is no
//! process-wide client.
//!
//! ## Reads
//!
//! Row reads return the latest version of each column. Use
//! `get_versions` / `history` for older versions. Absence is `Ok(None)`
//! (or an empty list); `require` turns it into `Error::RowNotFound`.
//!
//! ## Scans
//!
//! `scan` and `scan_where` read the table once at call time and return a
//! lazy iterator that applies the predicate per row. Calling `scan` again
//! re-reads current state.
//!
//! ## Thread Safety
//!
//! RowStore is `Send + Sync` whenever the store is, and clones share the
//! same store.

use std::collections::BTreeMap;
use std::sync::Arc;

use rowstore_core::error::{Error, Result};
use rowstore_core::{
    Cell, CellHistory, ColumnRef, Database, Row, RowFilter, RowMutation, Timestamp, Value,
};
use tracing::debug;

use crate::predicate::{AllRows, NumericThreshold, RowPredicate};

/// Row-level operations over a sparse table
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use rowstore_core::ColumnRef;
/// use rowstore_primitives::RowStore;
/// use rowstore_storage::MemoryDatabase;
///
/// let store = RowStore::new(Arc::new(MemoryDatabase::new()));
/// let amount = ColumnRef::new("orders", "amount");
///
/// store.put("order#1001", &amount, "1200")?;
/// let row = store.require("order#1001")?;
/// assert_eq!(row.value(&amount), Some("1200"));
/// store.delete("order#1001")?;
/// assert!(store.get("order#1001")?.is_none());
/// # Ok::<(), rowstore_core::Error>(())
/// ```
pub struct RowStore<D: Database> {
    db: Arc<D>,
}

impl<D: Database> Clone for RowStore<D> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
        }
    }
}

impl<D: Database> RowStore<D> {
    /// Create a facade over `db`
    pub fn new(db: Arc<D>) -> Self {
        Self { db }
    }

    /// Get the underlying store
    pub fn database(&self) -> &Arc<D> {
        &self.db
    }

    // ========== Writes ==========

    /// Write a new version of one cell with a store-assigned timestamp.
    ///
    /// Creates the row if it does not exist. Returns the cell's timestamp.
    pub fn put(&self, row_key: &str, column: &ColumnRef, value: &str) -> Result<Timestamp> {
        self.db.write(row_key, column, value, None)
    }

    /// Write a new version of one cell with a caller-chosen timestamp.
    ///
    /// A cell already stored at exactly `timestamp` is replaced.
    pub fn put_at(
        &self,
        row_key: &str,
        column: &ColumnRef,
        value: &str,
        timestamp: Timestamp,
    ) -> Result<Timestamp> {
        self.db.write(row_key, column, value, Some(timestamp))
    }

    /// Write several cells of one row as a single atomic mutation.
    ///
    /// All cells share the returned commit timestamp.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `cells` is empty.
    pub fn put_row<I, V>(&self, row_key: &str, cells: I) -> Result<Timestamp>
    where
        I: IntoIterator<Item = (ColumnRef, V)>,
        V: Into<String>,
    {
        let mutation = cells
            .into_iter()
            .fold(RowMutation::new(row_key), |m, (column, value)| {
                m.set_cell(column, value)
            });
        self.db.mutate_row(mutation)
    }

    /// Write a new version of a cell in an existing row.
    ///
    /// The existence check and the write commit together, so a concurrent
    /// `delete` cannot be undone by a racing `update`.
    ///
    /// # Errors
    ///
    /// Returns `RowNotFound` if the row does not exist. Use `put` to create
    /// rows.
    pub fn update(&self, row_key: &str, column: &ColumnRef, value: &str) -> Result<Timestamp> {
        let mutation = RowMutation::new(row_key)
            .set_cell(column.clone(), value)
            .if_exists();
        let ts = self.db.mutate_row(mutation)?;
        debug!(row_key = %row_key, column = %column, timestamp = %ts, "updated cell");
        Ok(ts)
    }

    // ========== Point reads ==========

    /// Latest version of every column of a row, or `None` if absent.
    pub fn get(&self, row_key: &str) -> Result<Option<Row>> {
        self.db.read_row(row_key, Some(&RowFilter::latest_only()))
    }

    /// Like `get`, but absence is `Error::RowNotFound`.
    pub fn require(&self, row_key: &str) -> Result<Row> {
        self.get(row_key)?
            .ok_or_else(|| Error::row_not_found(row_key))
    }

    /// True if the row has at least one cell
    pub fn exists(&self, row_key: &str) -> Result<bool> {
        Ok(self.get(row_key)?.is_some())
    }

    /// Latest cell of one column, or `None` if the row or column is absent.
    pub fn get_cell(&self, row_key: &str, column: &ColumnRef) -> Result<Option<Cell>> {
        let filter = RowFilter::Chain(vec![
            RowFilter::Column(column.clone()),
            RowFilter::latest_only(),
        ]);
        Ok(self
            .db
            .read_row(row_key, Some(&filter))?
            .and_then(|row| row.latest(column).cloned()))
    }

    // ========== Scans ==========

    /// Every row, latest versions, in row-key order.
    pub fn scan(&self) -> Result<Scan<AllRows>> {
        self.scan_where(AllRows)
    }

    /// Every row the predicate accepts, latest versions, in row-key order.
    pub fn scan_where<P: RowPredicate>(&self, predicate: P) -> Result<Scan<P>> {
        let rows = self.db.read_rows(Some(&RowFilter::latest_only()))?;
        Ok(Scan {
            rows: rows.into_iter(),
            predicate,
        })
    }

    /// Rows whose latest `column` value is a number greater than
    /// `threshold`, with that value.
    ///
    /// Integer and decimal cells both compare. Rows lacking the column, or
    /// holding a non-numeric value, are skipped.
    pub fn filter_greater_than(
        &self,
        column: &ColumnRef,
        threshold: i64,
    ) -> Result<Vec<(String, Value)>> {
        let predicate = NumericThreshold::greater_than(column.clone(), threshold);
        Ok(self
            .scan()?
            .filter_map(|(key, row)| {
                let value = predicate.extract(&key, &row)?;
                predicate
                    .comparison
                    .holds(&value, threshold)
                    .then_some((key, value))
            })
            .collect())
    }

    // ========== Aggregation ==========

    /// Count rows by a derived key. Rows mapped to `None` are skipped.
    pub fn group_by<K, F>(&self, extractor: F) -> Result<BTreeMap<K, usize>>
    where
        K: Ord,
        F: Fn(&Row) -> Option<K>,
    {
        let mut counts = BTreeMap::new();
        for (_, row) in self.scan()? {
            if let Some(key) = extractor(&row) {
                *counts.entry(key).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }

    /// Count rows by the latest value of `column`.
    pub fn count_by_column(&self, column: &ColumnRef) -> Result<BTreeMap<String, usize>> {
        self.group_by(|row| row.value(column).map(str::to_string))
    }

    // ========== Version history ==========

    /// Up to `limit` most recent cells of a column, newest-first.
    ///
    /// Returns an empty list if the row or column is absent.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `limit` is zero.
    pub fn get_versions(
        &self,
        row_key: &str,
        column: &ColumnRef,
        limit: usize,
    ) -> Result<Vec<Cell>> {
        if limit == 0 {
            return Err(Error::invalid_input("version limit must be at least 1"));
        }
        let filter = RowFilter::Chain(vec![
            RowFilter::Column(column.clone()),
            RowFilter::CellsColumnLimit(limit),
        ]);
        Ok(self
            .db
            .read_row(row_key, Some(&filter))?
            .map(|row| row.cells(column).to_vec())
            .unwrap_or_default())
    }

    /// Like `get_versions`, wrapped as a non-empty history.
    pub fn history(
        &self,
        row_key: &str,
        column: &ColumnRef,
        limit: usize,
    ) -> Result<Option<CellHistory>> {
        Ok(CellHistory::new(self.get_versions(row_key, column, limit)?))
    }

    // ========== Deletes ==========

    /// Remove a whole row. Deleting an absent row is not an error.
    pub fn delete(&self, row_key: &str) -> Result<()> {
        self.db.delete_row(row_key)
    }

    /// Remove every version of one column. Idempotent.
    pub fn delete_column(&self, row_key: &str, column: &ColumnRef) -> Result<()> {
        self.db
            .mutate_row(RowMutation::new(row_key).delete_column(column.clone()))
            .map(|_| ())
    }
}

/// Lazy iterator over scanned rows
///
/// Holds the rows read when the scan started; the predicate is evaluated
/// as the iterator advances.
pub struct Scan<P = AllRows> {
    rows: std::vec::IntoIter<(String, Row)>,
    predicate: P,
}

impl<P: RowPredicate> Iterator for Scan<P> {
    type Item = (String, Row);

    fn next(&mut self) -> Option<Self::Item> {
        let predicate = &self.predicate;
        self.rows
            .by_ref()
            .find(|(key, row)| predicate.matches(key, row))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.rows.len()))
    }
}
