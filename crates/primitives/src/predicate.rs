//! Client-side row predicates
//!
//! Predicates run after rows come back from the store. Any
//! `Fn(&str, &Row) -> bool` closure is a predicate; `NumericThreshold` and
//! `HasColumn` cover the common cases.
//!
//! Numeric predicates read the latest cell as a [`Value`], so integer and
//! decimal cells both compare. Rows whose value is not a number are skipped
//! instead of failing the whole scan; the skip is logged at `warn`.

use std::cmp::Ordering;

use rowstore_core::{ColumnRef, Row, Value};
use tracing::warn;

/// Decides whether a scanned row is yielded
pub trait RowPredicate {
    /// True if the row should be kept
    fn matches(&self, row_key: &str, row: &Row) -> bool;
}

impl<F> RowPredicate for F
where
    F: Fn(&str, &Row) -> bool,
{
    fn matches(&self, row_key: &str, row: &Row) -> bool {
        self(row_key, row)
    }
}

/// Keeps every row
#[derive(Debug, Clone, Copy, Default)]
pub struct AllRows;

impl RowPredicate for AllRows {
    fn matches(&self, _row_key: &str, _row: &Row) -> bool {
        true
    }
}

/// Keeps rows where the column has at least one cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasColumn(pub ColumnRef);

impl RowPredicate for HasColumn {
    fn matches(&self, _row_key: &str, row: &Row) -> bool {
        row.contains(&self.0)
    }
}

/// Comparison used by [`NumericThreshold`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `value > threshold`
    Greater,
    /// `value >= threshold`
    GreaterOrEqual,
    /// `value < threshold`
    Less,
    /// `value <= threshold`
    LessOrEqual,
    /// `value == threshold`
    Equal,
}

impl Comparison {
    /// Apply the comparison to a numeric value.
    ///
    /// Integers compare exactly; floats compare after widening the
    /// threshold. `Text` never holds.
    pub fn holds(self, value: &Value, threshold: i64) -> bool {
        let ordering = match value {
            Value::Int(v) => Some(v.cmp(&threshold)),
            Value::Float(v) => v.partial_cmp(&(threshold as f64)),
            Value::Text(_) => None,
        };
        match (self, ordering) {
            (_, None) => false,
            (Comparison::Greater, Some(o)) => o == Ordering::Greater,
            (Comparison::GreaterOrEqual, Some(o)) => o != Ordering::Less,
            (Comparison::Less, Some(o)) => o == Ordering::Less,
            (Comparison::LessOrEqual, Some(o)) => o != Ordering::Greater,
            (Comparison::Equal, Some(o)) => o == Ordering::Equal,
        }
    }
}

/// Compares the latest value of a column, read as a number, with a
/// threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericThreshold {
    /// Column to read
    pub column: ColumnRef,
    /// How to compare
    pub comparison: Comparison,
    /// Right-hand side
    pub threshold: i64,
}

impl NumericThreshold {
    /// `column > threshold`
    pub fn greater_than(column: ColumnRef, threshold: i64) -> Self {
        NumericThreshold {
            column,
            comparison: Comparison::Greater,
            threshold,
        }
    }

    /// `column < threshold`
    pub fn less_than(column: ColumnRef, threshold: i64) -> Self {
        NumericThreshold {
            column,
            comparison: Comparison::Less,
            threshold,
        }
    }

    /// Latest value of the column, if it is numeric.
    ///
    /// `None` if the column is absent or the value is not a number; the
    /// non-numeric case is logged.
    pub fn extract(&self, row_key: &str, row: &Row) -> Option<Value> {
        let cell = row.latest(&self.column)?;
        let value = cell.typed();
        if value.is_numeric() {
            Some(value)
        } else {
            warn!(
                row_key = %row_key,
                column = %self.column,
                value = %cell.value,
                "skipping row with non-numeric value"
            );
            None
        }
    }
}

impl RowPredicate for NumericThreshold {
    fn matches(&self, row_key: &str, row: &Row) -> bool {
        self.extract(row_key, row)
            .map_or(false, |v| self.comparison.holds(&v, self.threshold))
    }
}
