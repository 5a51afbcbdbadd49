//! Column addressing
//!
//! A column is identified by its family and qualifier. The textual form is
//! `family:qualifier`, split at the first `:` so qualifiers may themselves
//! contain colons.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// (family, qualifier) pair naming one column of a row.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ColumnRef {
    /// Column family name
    pub family: String,
    /// Column name within the family
    pub qualifier: String,
}

impl ColumnRef {
    /// Create a column reference without validation.
    ///
    /// Names are checked by the store when the column is written.
    pub fn new(family: impl Into<String>, qualifier: impl Into<String>) -> Self {
        ColumnRef {
            family: family.into(),
            qualifier: qualifier.into(),
        }
    }

    /// Parse `family:qualifier`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if there is no `:` or either half is empty.
    pub fn parse(s: &str) -> Result<Self> {
        match s.split_once(':') {
            Some((family, qualifier)) if !family.is_empty() && !qualifier.is_empty() => {
                Ok(ColumnRef::new(family, qualifier))
            }
            _ => Err(Error::invalid_input(format!(
                "column '{}' must be written as family:qualifier",
                s
            ))),
        }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.family, self.qualifier)
    }
}

impl FromStr for ColumnRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ColumnRef::parse(s)
    }
}
