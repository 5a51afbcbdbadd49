//! Core types and traits for rowstore
//!
//! This crate defines the vocabulary shared by every layer:
//! - Timestamp / Cell / CellHistory: timestamped values and version lists
//! - ColumnRef: (family, qualifier) addressing
//! - Row: family → qualifier → cells, newest-first
//! - Value: typed projection of a cell string
//! - RowFilter / RowMutation: what a store reads and writes
//! - Database: the storage collaborator trait
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod column;
pub mod contract;
pub mod error;
pub mod filter;
pub mod limits;
pub mod mutation;
pub mod row;
pub mod traits;
pub mod value;

pub use column::ColumnRef;
pub use contract::{Cell, CellHistory, Timestamp};
pub use error::{Error, Result};
pub use filter::RowFilter;
pub use mutation::{Mutation, RowMutation};
pub use row::{Family, Row};
pub use traits::Database;
pub use value::Value;
