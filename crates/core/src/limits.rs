//! Name and size limits for row keys, families, and qualifiers
//!
//! Stores validate every written key against these limits. Violations are
//! reported as `Error::InvalidInput`.

use crate::column::ColumnRef;
use crate::error::{Error, Result};

/// Maximum row key length in bytes
pub const MAX_ROW_KEY_BYTES: usize = 4 * 1024;

/// Maximum column family name length in bytes
pub const MAX_FAMILY_BYTES: usize = 64;

/// Maximum qualifier length in bytes
pub const MAX_QUALIFIER_BYTES: usize = 16 * 1024;

/// Validate a row key: non-empty, at most `MAX_ROW_KEY_BYTES`.
pub fn validate_row_key(row_key: &str) -> Result<()> {
    if row_key.is_empty() {
        return Err(Error::invalid_input("row key must not be empty"));
    }
    if row_key.len() > MAX_ROW_KEY_BYTES {
        return Err(Error::invalid_input(format!(
            "row key is {} bytes, limit is {}",
            row_key.len(),
            MAX_ROW_KEY_BYTES
        )));
    }
    Ok(())
}

/// Validate a family name against `[_a-zA-Z0-9][-_.a-zA-Z0-9]*`.
pub fn validate_family(family: &str) -> Result<()> {
    if family.is_empty() || family.len() > MAX_FAMILY_BYTES {
        return Err(Error::invalid_input(format!(
            "column family must be 1..={} bytes, got {}",
            MAX_FAMILY_BYTES,
            family.len()
        )));
    }
    let mut chars = family.chars();
    let first_ok = chars
        .next()
        .map_or(false, |c| c.is_ascii_alphanumeric() || c == '_');
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if !(first_ok && rest_ok) {
        return Err(Error::invalid_input(format!(
            "invalid column family name '{}'",
            family
        )));
    }
    Ok(())
}

/// Validate a qualifier: non-empty, at most `MAX_QUALIFIER_BYTES`.
pub fn validate_qualifier(qualifier: &str) -> Result<()> {
    if qualifier.is_empty() {
        return Err(Error::invalid_input("qualifier must not be empty"));
    }
    if qualifier.len() > MAX_QUALIFIER_BYTES {
        return Err(Error::invalid_input(format!(
            "qualifier is {} bytes, limit is {}",
            qualifier.len(),
            MAX_QUALIFIER_BYTES
        )));
    }
    Ok(())
}

/// Validate both halves of a column reference.
pub fn validate_column(column: &ColumnRef) -> Result<()> {
    validate_family(&column.family)?;
    validate_qualifier(&column.qualifier)
}
