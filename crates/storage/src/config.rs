//! Store configuration via `rowstore.toml`
//!
//! On first use a commented default file is written. To change settings,
//! edit the file and rerun.

use rowstore_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "rowstore.toml";

/// Default snapshot file path.
pub const DEFAULT_SNAPSHOT_PATH: &str = ".rowstore.json";

/// Store configuration loaded from `rowstore.toml`.
///
/// # Example
///
/// ```toml
/// table = "customer_orders"
/// max_versions = 5
/// snapshot = ".rowstore.json"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Table name, recorded in snapshots.
    #[serde(default = "default_table")]
    pub table: String,
    /// Versions retained per column. `None` keeps every version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_versions: Option<usize>,
    /// Snapshot file used by the CLI.
    #[serde(default = "default_snapshot")]
    pub snapshot: String,
}

fn default_table() -> String {
    "customer_orders".to_string()
}

fn default_snapshot() -> String {
    DEFAULT_SNAPSHOT_PATH.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            table: default_table(),
            max_versions: None,
            snapshot: default_snapshot(),
        }
    }
}

impl StoreConfig {
    /// Config keeping at most `n` versions per column
    pub fn with_max_versions(n: usize) -> Self {
        Self {
            max_versions: Some(n),
            ..Self::default()
        }
    }

    /// Check field values.
    ///
    /// # Errors
    ///
    /// Returns `Config` if `max_versions` is zero or `table` is empty.
    pub fn validate(&self) -> Result<()> {
        if self.max_versions == Some(0) {
            return Err(Error::Config(
                "max_versions must be at least 1 (omit it to keep every version)".to_string(),
            ));
        }
        if self.table.trim().is_empty() {
            return Err(Error::Config("table must not be empty".to_string()));
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# rowstore configuration
#
# Table name recorded in snapshot files.
table = "customer_orders"

# Versions kept per column. Older cells are dropped after each write.
# Omit to keep every version.
# max_versions = 5

# Snapshot file holding the table between runs.
snapshot = ".rowstore.json"
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: StoreConfig = toml::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                Error::Config(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            Error::Config(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
