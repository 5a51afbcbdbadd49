//! Row mutations
//!
//! A `RowMutation` collects the changes for one row and is committed as a
//! unit by [`Database::mutate_row`](crate::Database::mutate_row). Mutations
//! apply in the order they were added.
//!
//! ```
//! use rowstore_core::{ColumnRef, RowMutation};
//!
//! let m = RowMutation::new("order#1005")
//!     .set_cell(ColumnRef::new("orders", "customer"), "Shashank")
//!     .set_cell(ColumnRef::new("orders", "product"), "Laptop")
//!     .set_cell(ColumnRef::new("delivery", "status"), "Shipped");
//! assert_eq!(m.len(), 3);
//! ```

use crate::column::ColumnRef;
use crate::contract::Timestamp;
use crate::error::{Error, Result};
use crate::limits::{validate_column, validate_family, validate_row_key};

/// One change to a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Write a new cell version
    SetCell {
        /// Target column
        column: ColumnRef,
        /// Cell contents
        value: String,
        /// Explicit timestamp; `None` uses the commit timestamp
        timestamp: Option<Timestamp>,
    },
    /// Remove every version of a column
    DeleteColumn(ColumnRef),
    /// Remove every column of a family
    DeleteFamily(String),
    /// Remove the whole row
    DeleteRow,
}

/// Ordered set of mutations for one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowMutation {
    row_key: String,
    mutations: Vec<Mutation>,
    require_existing: bool,
}

impl RowMutation {
    /// Start an empty mutation for `row_key`
    pub fn new(row_key: impl Into<String>) -> Self {
        RowMutation {
            row_key: row_key.into(),
            mutations: Vec::new(),
            require_existing: false,
        }
    }

    /// Only apply if the row already exists when the mutation commits.
    ///
    /// The store checks and applies under one lock, so a concurrent delete
    /// either happens first (and the mutation fails with `RowNotFound`) or
    /// after.
    pub fn if_exists(mut self) -> Self {
        self.require_existing = true;
        self
    }

    /// True if built with [`RowMutation::if_exists`]
    pub fn requires_existing_row(&self) -> bool {
        self.require_existing
    }

    /// Write a cell stamped with the commit timestamp
    pub fn set_cell(mut self, column: ColumnRef, value: impl Into<String>) -> Self {
        self.mutations.push(Mutation::SetCell {
            column,
            value: value.into(),
            timestamp: None,
        });
        self
    }

    /// Write a cell with an explicit timestamp
    pub fn set_cell_at(
        mut self,
        column: ColumnRef,
        value: impl Into<String>,
        timestamp: Timestamp,
    ) -> Self {
        self.mutations.push(Mutation::SetCell {
            column,
            value: value.into(),
            timestamp: Some(timestamp),
        });
        self
    }

    /// Remove a column
    pub fn delete_column(mut self, column: ColumnRef) -> Self {
        self.mutations.push(Mutation::DeleteColumn(column));
        self
    }

    /// Remove a family
    pub fn delete_family(mut self, family: impl Into<String>) -> Self {
        self.mutations.push(Mutation::DeleteFamily(family.into()));
        self
    }

    /// Remove the row
    pub fn delete_row(mut self) -> Self {
        self.mutations.push(Mutation::DeleteRow);
        self
    }

    /// Add a prepared mutation
    pub fn push(&mut self, mutation: Mutation) {
        self.mutations.push(mutation);
    }

    /// Target row key
    pub fn row_key(&self) -> &str {
        &self.row_key
    }

    /// Mutations in application order
    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    /// Number of mutations
    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    /// True if nothing has been added
    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    /// Split into key and mutations
    pub fn into_parts(self) -> (String, Vec<Mutation>) {
        (self.row_key, self.mutations)
    }

    /// Check the row key, every written name, and non-emptiness.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        validate_row_key(&self.row_key)?;
        if self.mutations.is_empty() {
            return Err(Error::invalid_input(format!(
                "mutation for row '{}' is empty",
                self.row_key
            )));
        }
        for mutation in &self.mutations {
            match mutation {
                Mutation::SetCell { column, .. } | Mutation::DeleteColumn(column) => {
                    validate_column(column)?
                }
                Mutation::DeleteFamily(family) => validate_family(family)?,
                Mutation::DeleteRow => {}
            }
        }
        Ok(())
    }
}
