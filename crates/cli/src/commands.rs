//! Clap command tree definition.

use clap::{Arg, ArgAction, Command};

/// Default column for `filter`.
pub const DEFAULT_FILTER_COLUMN: &str = "orders:amount";
/// Default threshold for `filter`.
pub const DEFAULT_FILTER_THRESHOLD: &str = "700";
/// Default column for `group-by`.
pub const DEFAULT_GROUP_COLUMN: &str = "orders:customer";
/// Default version limit for `versions`.
pub const DEFAULT_VERSION_LIMIT: &str = "5";

/// Build the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("rowstore")
        .about("Row-oriented access to a wide-column table")
        .subcommand_required(true)
        .arg(
            Arg::new("db")
                .long("db")
                .value_name("PATH")
                .help("Snapshot file (default: .rowstore.json or the config's snapshot)")
                .global(true),
        )
        .arg(
            Arg::new("cache")
                .long("cache")
                .help("Ephemeral in-memory table, no disk")
                .action(ArgAction::SetTrue)
                .conflicts_with("db")
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Config file (default: rowstore.toml, created if missing)")
                .global(true),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("JSON output mode")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(Command::new("insert-demo").about("Write the demo orders"))
        .subcommand(Command::new("scan").about("Print every row"))
        .subcommand(
            Command::new("lookup")
                .about("Print one row by key")
                .arg(row_key_arg()),
        )
        .subcommand(
            Command::new("filter")
                .about("Rows whose numeric column is greater than a threshold")
                .arg(
                    Arg::new("column")
                        .long("column")
                        .value_name("FAMILY:QUALIFIER")
                        .default_value(DEFAULT_FILTER_COLUMN)
                        .help("Column holding the number"),
                )
                .arg(
                    Arg::new("gt")
                        .long("gt")
                        .value_name("N")
                        .default_value(DEFAULT_FILTER_THRESHOLD)
                        .allow_negative_numbers(true)
                        .help("Exclusive lower bound"),
                ),
        )
        .subcommand(
            Command::new("group-by")
                .about("Count rows per latest value of a column")
                .arg(
                    Arg::new("column")
                        .long("column")
                        .value_name("FAMILY:QUALIFIER")
                        .default_value(DEFAULT_GROUP_COLUMN)
                        .help("Grouping column"),
                ),
        )
        .subcommand(
            Command::new("update")
                .about("Write a new version of a cell in an existing row")
                .arg(row_key_arg())
                .arg(column_arg())
                .arg(
                    Arg::new("value")
                        .required(true)
                        .value_name("VALUE")
                        .help("New cell value"),
                ),
        )
        .subcommand(
            Command::new("versions")
                .about("Print the newest versions of a cell")
                .arg(row_key_arg())
                .arg(column_arg())
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .short('n')
                        .value_name("N")
                        .default_value(DEFAULT_VERSION_LIMIT)
                        .help("Maximum number of versions"),
                ),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a row")
                .arg(row_key_arg()),
        )
        .subcommand(Command::new("demo").about("Run the full demonstration flow"))
}

fn row_key_arg() -> Arg {
    Arg::new("key")
        .required(true)
        .value_name("KEY")
        .help("Row key, e.g. order#1001")
}

fn column_arg() -> Arg {
    Arg::new("column")
        .required(true)
        .value_name("FAMILY:QUALIFIER")
        .help("Column, e.g. orders:amount")
}
