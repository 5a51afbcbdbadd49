//! rowstore - row-oriented access to a wide-column table
//!
//! Rows are addressed by a string key and hold cells grouped into column
//! families. Every write adds a timestamped version; reads return the
//! newest version unless asked for history.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use rowstore::{ColumnRef, MemoryDatabase, RowStore};
//!
//! let store = RowStore::new(Arc::new(MemoryDatabase::new()));
//! let amount = ColumnRef::new("orders", "amount");
//!
//! store.put("order#1001", &amount, "1200")?;
//! let row = store.get("order#1001")?.expect("row was just written");
//! assert_eq!(row.value(&amount), Some("1200"));
//! # Ok::<(), rowstore::Error>(())
//! ```
//!
//! # Architecture
//!
//! - `rowstore-core`: contract types and the [`Database`] trait
//! - `rowstore-storage`: [`MemoryDatabase`], config and snapshots
//! - `rowstore-primitives`: the [`RowStore`] facade and predicates

pub use rowstore_core::*;
pub use rowstore_primitives::*;
pub use rowstore_storage::*;
