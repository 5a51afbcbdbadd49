//! Output → human/json string formatting.
//!
//! Two modes:
//! - **Human** (default): one line per row or cell
//! - **JSON** (`--json`): `serde_json::to_string_pretty`

use rowstore_core::{Error, Row, Value};
use serde_json::{json, Value as JsonValue};

use crate::state::{Output, Step};

/// Output formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// Format the steps of one invocation.
///
/// Titled steps (from `demo`) get a heading in human mode and are wrapped
/// in an array in JSON mode.
pub fn format_steps(steps: &[Step], mode: OutputMode) -> String {
    let titled = steps.iter().any(|s| !s.title.is_empty());
    match mode {
        OutputMode::Human => steps
            .iter()
            .map(|s| {
                let body = format_human(&s.output);
                if s.title.is_empty() {
                    body
                } else {
                    format!("== {} ==\n{}", s.title, body)
                }
            })
            .collect::<Vec<_>>()
            .join("\n"),
        OutputMode::Json => {
            let value = if titled {
                JsonValue::Array(
                    steps
                        .iter()
                        .map(|s| json!({ "step": s.title, "output": to_json(&s.output) }))
                        .collect(),
                )
            } else {
                steps
                    .first()
                    .map(|s| to_json(&s.output))
                    .unwrap_or(JsonValue::Null)
            };
            pretty(&value)
        }
    }
}

/// Format an error.
pub fn format_error(err: &Error, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => pretty(&json!({ "error": err.to_string() })),
        OutputMode::Human => format!("(error) {}", err),
    }
}

/// Format a human-readable rendering of one output.
pub fn format_human(output: &Output) -> String {
    match output {
        Output::Inserted(_) => "Inserted demo rows".to_string(),
        Output::Rows(rows) if rows.is_empty() => "(empty table)".to_string(),
        Output::Rows(rows) => rows
            .iter()
            .map(|(key, row)| format!("{} {}", key, format_row(row)))
            .collect::<Vec<_>>()
            .join("\n"),
        Output::Row { row: None, .. } => "Row not found".to_string(),
        Output::Row {
            row_key,
            row: Some(row),
        } => format!("{} {}", row_key, format_row(row)),
        Output::Matches(matches) if matches.is_empty() => "(no matching rows)".to_string(),
        Output::Matches(matches) => matches
            .iter()
            .map(|(key, value)| format!("{} {}", key, value))
            .collect::<Vec<_>>()
            .join("\n"),
        Output::Groups(groups) if groups.is_empty() => "(no groups)".to_string(),
        Output::Groups(groups) => groups
            .iter()
            .map(|(value, count)| format!("{} {}", value, count))
            .collect::<Vec<_>>()
            .join("\n"),
        Output::Updated {
            row_key,
            column,
            timestamp,
        } => format!("Updated {} {} @ {}", row_key, column, timestamp.to_rfc3339()),
        Output::Versions(cells) if cells.is_empty() => "(no versions)".to_string(),
        Output::Versions(cells) => cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                format!(
                    "Version {}: {} @ {}",
                    i + 1,
                    cell.value,
                    cell.timestamp.to_rfc3339()
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Output::Deleted { .. } => "Deleted".to_string(),
    }
}

/// `{family:qualifier: value, ...}` using the latest cell of each column.
pub fn format_row(row: &Row) -> String {
    let cells = row
        .iter_latest()
        .map(|(family, qualifier, cell)| format!("{}:{}: {}", family, qualifier, cell.value))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{}}}", cells)
}

fn to_json(output: &Output) -> JsonValue {
    match output {
        Output::Inserted(n) => json!({ "inserted": n }),
        Output::Rows(rows) => JsonValue::Array(
            rows.iter()
                .map(|(key, row)| json!({ "key": key, "cells": row.to_flat_map() }))
                .collect(),
        ),
        Output::Row { row_key, row } => json!({
            "key": row_key,
            "cells": row.as_ref().map(|r| r.to_flat_map()),
        }),
        Output::Matches(matches) => JsonValue::Array(
            matches
                .iter()
                .map(|(key, value)| json!({ "key": key, "value": value_to_json(value) }))
                .collect(),
        ),
        Output::Groups(groups) => json!(groups),
        Output::Updated {
            row_key,
            column,
            timestamp,
        } => json!({
            "key": row_key,
            "column": column.to_string(),
            "timestamp": timestamp.to_rfc3339(),
        }),
        Output::Versions(cells) => JsonValue::Array(
            cells
                .iter()
                .map(|c| json!({ "value": c.value, "timestamp": c.timestamp.to_rfc3339() }))
                .collect(),
        ),
        Output::Deleted { row_key } => json!({ "deleted": row_key }),
    }
}

fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Int(n) => json!(n),
        Value::Float(f) => json!(f),
        Value::Text(s) => json!(s),
    }
}

fn pretty(value: &JsonValue) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
