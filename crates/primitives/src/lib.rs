//! Primitives layer for rowstore
//!
//! - **RowStore**: row-level put/get/scan/group/version/delete facade
//! - **Predicates**: client-side row filters for scans
//!
//! ## Design Principle: Stateless Facades
//!
//! `RowStore` holds only an `Arc` to a `Database` and delegates every
//! operation to it. Multiple facades over the same store are safe, and
//! swapping the store (in-process table, managed service client, test
//! double) needs no change above this layer.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod predicate;
pub mod row_store;

pub use predicate::{AllRows, Comparison, HasColumn, NumericThreshold, RowPredicate};
pub use row_store::{RowStore, Scan};
