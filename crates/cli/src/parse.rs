//! ArgMatches → CliAction conversion.

use clap::ArgMatches;
use rowstore_core::{ColumnRef, Error, Result};

/// A parsed subcommand, ready to run against a session.
#[derive(Debug, Clone, PartialEq)]
pub enum CliAction {
    /// Write the demo orders.
    InsertDemo,
    /// Print every row.
    Scan,
    /// Print one row.
    Lookup { row_key: String },
    /// Rows whose numeric column exceeds a threshold.
    Filter { column: ColumnRef, threshold: i64 },
    /// Count rows per latest value.
    GroupBy { column: ColumnRef },
    /// New version of a cell in an existing row.
    Update {
        row_key: String,
        column: ColumnRef,
        value: String,
    },
    /// Newest versions of a cell.
    Versions {
        row_key: String,
        column: ColumnRef,
        limit: usize,
    },
    /// Delete a row.
    Delete { row_key: String },
    /// Run the whole flow.
    Demo,
}

impl CliAction {
    /// True if running the action can change the table.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            CliAction::InsertDemo
                | CliAction::Update { .. }
                | CliAction::Delete { .. }
                | CliAction::Demo
        )
    }
}

/// Translate the top-level matches into an action.
///
/// # Errors
///
/// Returns `InvalidInput` for arguments clap accepts as strings but that do
/// not convert (bad numbers, malformed columns).
pub fn matches_to_action(matches: &ArgMatches) -> Result<CliAction> {
    let (name, sub) = matches
        .subcommand()
        .ok_or_else(|| Error::invalid_input("no command given"))?;

    match name {
        "insert-demo" => Ok(CliAction::InsertDemo),
        "scan" => Ok(CliAction::Scan),
        "lookup" => Ok(CliAction::Lookup {
            row_key: required(sub, "key")?,
        }),
        "filter" => {
            let threshold = required(sub, "gt")?;
            let threshold = threshold.parse::<i64>().map_err(|_| {
                Error::invalid_input(format!("--gt expects an integer, got '{}'", threshold))
            })?;
            Ok(CliAction::Filter {
                column: column(sub)?,
                threshold,
            })
        }
        "group-by" => Ok(CliAction::GroupBy {
            column: column(sub)?,
        }),
        "update" => Ok(CliAction::Update {
            row_key: required(sub, "key")?,
            column: column(sub)?,
            value: required(sub, "value")?,
        }),
        "versions" => {
            let limit = required(sub, "limit")?;
            let limit = limit.parse::<usize>().map_err(|_| {
                Error::invalid_input(format!(
                    "--limit expects a non-negative integer, got '{}'",
                    limit
                ))
            })?;
            Ok(CliAction::Versions {
                row_key: required(sub, "key")?,
                column: column(sub)?,
                limit,
            })
        }
        "delete" => Ok(CliAction::Delete {
            row_key: required(sub, "key")?,
        }),
        "demo" => Ok(CliAction::Demo),
        other => Err(Error::invalid_input(format!("unknown command '{}'", other))),
    }
}

fn required(m: &ArgMatches, name: &str) -> Result<String> {
    m.get_one::<String>(name)
        .cloned()
        .ok_or_else(|| Error::invalid_input(format!("missing argument <{}>", name)))
}

fn column(m: &ArgMatches) -> Result<ColumnRef> {
    ColumnRef::parse(&required(m, "column")?)
}
