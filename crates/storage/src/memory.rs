//! MemoryDatabase: in-process table behind the `Database` trait
//!
//! - `BTreeMap<String, Row>` keeps rows in row-key order, so full reads come
//!   back sorted without an extra pass
//! - `parking_lot::RwLock` guards the map; a row mutation holds the write
//!   lock for its whole duration, which makes it atomic per row
//! - `CommitClock` hands out strictly increasing commit timestamps and is
//!   advanced past every caller-chosen timestamp, so a store-assigned write
//!   always lands above anything written before it
//! - The optional `max_versions` GC policy trims every column a mutation
//!   touched before the lock is released

use std::collections::BTreeMap;

use parking_lot::RwLock;
use tracing::debug;

use rowstore_core::{
    Cell, Database, Error, Mutation, Result, Row, RowFilter, RowMutation, Timestamp,
};

use crate::clock::CommitClock;
use crate::config::StoreConfig;

/// In-process wide-column table
#[derive(Debug)]
pub struct MemoryDatabase {
    rows: RwLock<BTreeMap<String, Row>>,
    clock: CommitClock,
    config: StoreConfig,
}

impl Default for MemoryDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDatabase {
    /// Create an empty table with the default config (keep every version)
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            clock: CommitClock::new(),
            config: StoreConfig::default(),
        }
    }

    /// Create an empty table with an explicit config.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the config does not validate.
    pub fn with_config(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            rows: RwLock::new(BTreeMap::new()),
            clock: CommitClock::new(),
            config,
        })
    }

    /// Build a table from existing rows, priming the clock past the newest
    /// stored cell.
    pub(crate) fn from_rows(config: StoreConfig, rows: BTreeMap<String, Row>) -> Result<Self> {
        let db = Self::with_config(config)?;
        for row in rows.values() {
            if let Some(ts) = row.newest_timestamp() {
                db.clock.observe(ts);
            }
        }
        *db.rows.write() = rows;
        Ok(db)
    }

    /// Active configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.read().len()
    }

    /// True if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    /// Drop every row
    pub fn clear(&self) {
        self.rows.write().clear();
    }

    /// Clone of the whole table, for persistence
    pub(crate) fn rows_snapshot(&self) -> BTreeMap<String, Row> {
        self.rows.read().clone()
    }
}

impl Database for MemoryDatabase {
    fn mutate_row(&self, mutation: RowMutation) -> Result<Timestamp> {
        mutation.validate()?;
        for m in mutation.mutations() {
            if let Mutation::SetCell {
                timestamp: Some(ts),
                ..
            } = m
            {
                self.clock.observe(*ts);
            }
        }
        let commit = self.clock.next();
        let require_existing = mutation.requires_existing_row();
        let (row_key, mutations) = mutation.into_parts();
        let count = mutations.len();

        let mut rows = self.rows.write();
        if require_existing && !rows.contains_key(&row_key) {
            return Err(Error::row_not_found(row_key));
        }
        let mut working = rows.remove(&row_key).unwrap_or_default();
        for m in mutations {
            match m {
                Mutation::SetCell {
                    column,
                    value,
                    timestamp,
                } => {
                    working.insert(&column, Cell::new(value, timestamp.unwrap_or(commit)));
                }
                Mutation::DeleteColumn(column) => {
                    working.remove_column(&column);
                }
                Mutation::DeleteFamily(family) => {
                    working.remove_family(&family);
                }
                Mutation::DeleteRow => working = Row::new(),
            }
        }
        if let Some(max) = self.config.max_versions {
            working.truncate_versions(max);
        }

        let exists = !working.is_empty();
        if exists {
            rows.insert(row_key.clone(), working);
        }
        drop(rows);

        debug!(
            row_key = %row_key,
            mutations = count,
            commit = %commit,
            exists,
            "applied row mutation"
        );
        Ok(commit)
    }

    fn read_row(&self, row_key: &str, filter: Option<&RowFilter>) -> Result<Option<Row>> {
        let row = self.rows.read().get(row_key).cloned();
        Ok(match (row, filter) {
            (Some(row), Some(filter)) => filter.apply(row),
            (row, None) => row,
            (None, Some(_)) => None,
        })
    }

    fn read_rows(&self, filter: Option<&RowFilter>) -> Result<Vec<(String, Row)>> {
        let rows = self.rows.read();
        Ok(rows
            .iter()
            .filter_map(|(key, row)| {
                let row = match filter {
                    Some(f) => f.apply(row.clone())?,
                    None => row.clone(),
                };
                Some((key.clone(), row))
            })
            .collect())
    }

    fn delete_row(&self, row_key: &str) -> Result<()> {
        rowstore_core::limits::validate_row_key(row_key)?;
        let existed = self.rows.write().remove(row_key).is_some();
        debug!(row_key = %row_key, existed, "deleted row");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowstore_core::ColumnRef;

    fn col(s: &str) -> ColumnRef {
        ColumnRef::parse(s).unwrap()
    }

    #[test]
    fn test_write_then_read() {
        let db = MemoryDatabase::new();
        let ts = db.write("order#1001", &col("orders:amount"), "1200", None).unwrap();

        let row = db.read_row("order#1001", None).unwrap().unwrap();
        assert_eq!(row.latest(&col("orders:amount")), Some(&Cell::new("1200", ts)));
        assert_eq!(db.row_count(), 1);
    }

    #[test]
    fn test_store_timestamp_lands_above_explicit_future_one() {
        let db = MemoryDatabase::new();
        let amount = col("orders:amount");
        let future = Timestamp::from_micros(Timestamp::now().as_micros() + 3_600_000_000);
        db.write("order#1001", &amount, "explicit", Some(future)).unwrap();

        let ts = db.write("order#1001", &amount, "last-written", None).unwrap();
        assert!(ts > future);
        let row = db.read_row("order#1001", None).unwrap().unwrap();
        assert_eq!(row.value(&amount), Some("last-written"));
    }

    #[test]
    fn test_if_exists_rejects_missing_row() {
        let db = MemoryDatabase::new();
        let amount = col("orders:amount");
        let err = db
            .mutate_row(RowMutation::new("order#4040").set_cell(amount.clone(), "1").if_exists())
            .unwrap_err();
        assert!(matches!(err, Error::RowNotFound { .. }));
        assert!(db.is_empty());

        db.write("order#1002", &amount, "750", None).unwrap();
        db.mutate_row(RowMutation::new("order#1002").set_cell(amount.clone(), "1100").if_exists())
            .unwrap();
        let row = db.read_row("order#1002", None).unwrap().unwrap();
        assert_eq!(row.value(&amount), Some("1100"));
    }

    #[test]
    fn test_missing_row_is_none() {
        let db = MemoryDatabase::new();
        assert!(db.read_row("nope", None).unwrap().is_none());
        assert!(db
            .read_row("nope", Some(&RowFilter::latest_only()))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_mutation_is_applied_in_order() {
        let db = MemoryDatabase::new();
        let m = RowMutation::new("k")
            .set_cell(col("orders:amount"), "1")
            .delete_family("orders")
            .set_cell(col("delivery:status"), "Pending");
        let commit = db.mutate_row(m).unwrap();

        let row = db.read_row("k", None).unwrap().unwrap();
        assert!(row.family("orders").is_none());
        assert_eq!(
            row.latest(&col("delivery:status")),
            Some(&Cell::new("Pending", commit))
        );
    }

    #[test]
    fn test_cells_in_one_mutation_share_commit_timestamp() {
        let db = MemoryDatabase::new();
        let m = RowMutation::new("order#1005")
            .set_cell(col("orders:customer"), "Shashank")
            .set_cell(col("orders:product"), "Laptop");
        let commit = db.mutate_row(m).unwrap();
        let row = db.read_row("order#1005", None).unwrap().unwrap();
        assert!(row.iter_latest().all(|(_, _, c)| c.timestamp == commit));
    }

    #[test]
    fn test_successive_writes_are_versions() {
        let db = MemoryDatabase::new();
        let amount = col("orders:amount");
        let t1 = db.write("k", &amount, "750", None).unwrap();
        let t2 = db.write("k", &amount, "1100", None).unwrap();
        assert!(t2 > t1);

        let row = db.read_row("k", None).unwrap().unwrap();
        assert_eq!(row.cells(&amount), &[Cell::new("1100", t2), Cell::new("750", t1)]);
    }

    #[test]
    fn test_explicit_timestamp_duplicate_overwrites() {
        let db = MemoryDatabase::new();
        let amount = col("orders:amount");
        let ts = Timestamp::from_micros(1_000);
        db.write("k", &amount, "a", Some(ts)).unwrap();
        db.write("k", &amount, "b", Some(ts)).unwrap();

        let row = db.read_row("k", None).unwrap().unwrap();
        assert_eq!(row.cells(&amount), &[Cell::new("b", ts)]);
    }

    #[test]
    fn test_max_versions_gc() {
        let db = MemoryDatabase::with_config(StoreConfig::with_max_versions(2)).unwrap();
        let amount = col("orders:amount");
        for v in ["1", "2", "3", "4"] {
            db.write("k", &amount, v, None).unwrap();
        }
        let row = db.read_row("k", None).unwrap().unwrap();
        let values: Vec<&str> = row.cells(&amount).iter().map(Cell::value).collect();
        assert_eq!(values, vec!["4", "3"]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = MemoryDatabase::with_config(StoreConfig::with_max_versions(0)).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_delete_row_idempotent() {
        let db = MemoryDatabase::new();
        db.write("k", &col("f:q"), "v", None).unwrap();
        db.delete_row("k").unwrap();
        db.delete_row("k").unwrap();
        assert!(db.read_row("k", None).unwrap().is_none());
        assert!(db.is_empty());
    }

    #[test]
    fn test_delete_row_validates_key() {
        let db = MemoryDatabase::new();
        assert!(matches!(db.delete_row(""), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_deleting_last_column_removes_row() {
        let db = MemoryDatabase::new();
        let amount = col("orders:amount");
        db.write("k", &amount, "1", None).unwrap();
        db.mutate_row(RowMutation::new("k").delete_column(amount))
            .unwrap();
        assert!(db.read_row("k", None).unwrap().is_none());
        assert_eq!(db.row_count(), 0);
    }

    #[test]
    fn test_rejected_mutation_leaves_table_untouched() {
        let db = MemoryDatabase::new();
        db.write("k", &col("orders:amount"), "1", None).unwrap();
        let bad = RowMutation::new("k")
            .delete_row()
            .set_cell(col("bad family:q"), "x");
        assert!(db.mutate_row(bad).is_err());
        assert!(db.read_row("k", None).unwrap().is_some());
    }

    #[test]
    fn test_read_rows_sorted_and_filtered() {
        let db = MemoryDatabase::new();
        db.write("order#1003", &col("orders:amount"), "450", None).unwrap();
        db.write("order#1001", &col("orders:amount"), "1200", None).unwrap();
        db.write("order#1002", &col("delivery:status"), "Pending", None)
            .unwrap();

        let keys: Vec<String> = db.read_rows(None).unwrap().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["order#1001", "order#1002", "order#1003"]);

        let only_orders = db
            .read_rows(Some(&RowFilter::FamilyName("orders".into())))
            .unwrap();
        let keys: Vec<&str> = only_orders.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["order#1001", "order#1003"]);
    }

    #[test]
    fn test_clear() {
        let db = MemoryDatabase::new();
        db.write("a", &col("f:q"), "v", None).unwrap();
        db.clear();
        assert_eq!(db.row_count(), 0);
    }
}
