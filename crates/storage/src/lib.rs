//! Storage layer for rowstore
//!
//! This crate implements the in-process `Database`:
//! - MemoryDatabase: BTreeMap-based table with RwLock
//! - CommitClock: strictly increasing commit timestamps
//! - Per-column version GC (`max_versions`)
//! - JSON snapshot save/load with write-fsync-rename
//! - StoreConfig: `rowstore.toml`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clock;
pub mod config;
pub mod memory;
pub mod snapshot;

pub use clock::CommitClock;
pub use config::{StoreConfig, CONFIG_FILE_NAME, DEFAULT_SNAPSHOT_PATH};
pub use memory::MemoryDatabase;
pub use snapshot::SNAPSHOT_FORMAT_VERSION;
