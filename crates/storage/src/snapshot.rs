//! JSON snapshot persistence for `MemoryDatabase`
//!
//! A snapshot is the whole table as one JSON document:
//!
//! ```text
//! {
//!   "format": 1,
//!   "table": "customer_orders",
//!   "rows": { "<row key>": { "<family>": { "<qualifier>": [ {value, timestamp}, ... ] } } }
//! }
//! ```
//!
//! Saving uses the write-fsync-rename pattern so a crash never leaves a
//! half-written file at the final path:
//!
//! 1. Write to `.<name>.tmp` next to the target
//! 2. fsync the temporary file
//! 3. Rename over the target

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use rowstore_core::limits::{validate_column, validate_row_key};
use rowstore_core::{ColumnRef, Error, Result, Row};

use crate::config::StoreConfig;
use crate::memory::MemoryDatabase;

/// Snapshot format version
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotFile {
    format: u32,
    table: String,
    rows: BTreeMap<String, Row>,
}

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "snapshot".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}

fn write_and_rename(tmp: &Path, path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = fs::File::create(tmp)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    drop(file);
    fs::rename(tmp, path)?;
    Ok(())
}

/// Rebuild a row through `Row::insert` so ordering and uniqueness hold even
/// if the file was edited by hand.
fn normalize_row(row_key: &str, row: &Row) -> Result<Row> {
    validate_row_key(row_key).map_err(|e| Error::Corruption(e.to_string()))?;
    let mut normalized = Row::new();
    for (family, qualifier, cells) in row.columns() {
        let column = ColumnRef::new(family, qualifier);
        validate_column(&column).map_err(|e| {
            Error::Corruption(format!("row '{}': {}", row_key, e))
        })?;
        for cell in cells {
            normalized.insert(&column, cell.clone());
        }
    }
    Ok(normalized)
}

impl MemoryDatabase {
    /// Write the whole table to `path`.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be written or renamed. The temporary
    /// file is removed on failure.
    pub fn save_snapshot(&self, path: &Path) -> Result<()> {
        let snapshot = SnapshotFile {
            format: SNAPSHOT_FORMAT_VERSION,
            table: self.config().table.clone(),
            rows: self.rows_snapshot(),
        };
        let bytes = serde_json::to_vec_pretty(&snapshot)?;

        let tmp = temp_path_for(path);
        if let Err(e) = write_and_rename(&tmp, path, &bytes) {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }

        info!(
            path = %path.display(),
            rows = snapshot.rows.len(),
            bytes = bytes.len(),
            "saved snapshot"
        );
        Ok(())
    }

    /// Load a table from `path`, or start empty if the file does not exist.
    ///
    /// The config's GC policy is applied to the loaded rows.
    ///
    /// # Errors
    ///
    /// Returns `Corruption` for unreadable JSON, an unknown format version,
    /// or invalid keys, and `Config` for an invalid config.
    pub fn load_snapshot(path: &Path, config: StoreConfig) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "no snapshot found, starting empty");
            return MemoryDatabase::with_config(config);
        }

        let bytes = fs::read(path)?;
        let snapshot: SnapshotFile = serde_json::from_slice(&bytes).map_err(|e| {
            Error::Corruption(format!("snapshot '{}': {}", path.display(), e))
        })?;
        if snapshot.format != SNAPSHOT_FORMAT_VERSION {
            return Err(Error::Corruption(format!(
                "snapshot '{}' has format {}, expected {}",
                path.display(),
                snapshot.format,
                SNAPSHOT_FORMAT_VERSION
            )));
        }
        if snapshot.table != config.table {
            warn!(
                snapshot_table = %snapshot.table,
                config_table = %config.table,
                "snapshot was written for a different table"
            );
        }

        let mut rows = BTreeMap::new();
        for (key, row) in &snapshot.rows {
            let mut row = normalize_row(key, row)?;
            if let Some(max) = config.max_versions {
                row.truncate_versions(max);
            }
            if !row.is_empty() {
                rows.insert(key.clone(), row);
            }
        }

        info!(path = %path.display(), rows = rows.len(), "loaded snapshot");
        MemoryDatabase::from_rows(config, rows)
    }
}
