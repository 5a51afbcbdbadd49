//! rowstore CLI: the order-table demonstration as subcommands.
//!
//! `rowstore [flags] COMMAND` runs one command against the table held in
//! the snapshot file and writes the file back after mutating commands.
//! `--cache` runs against an empty in-memory table instead.

mod commands;
mod format;
mod parse;
mod state;

use std::process;

use tracing_subscriber::EnvFilter;

use commands::build_cli;
use format::{format_error, format_steps, OutputMode};
use parse::matches_to_action;
use state::{SessionOptions, SessionState};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "ROWSTORE_LOG";

fn main() {
    init_logging();

    let matches = build_cli().get_matches();

    let output_mode = if matches.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let action = match matches_to_action(&matches) {
        Ok(action) => action,
        Err(e) => {
            eprintln!("{}", format_error(&e, output_mode));
            process::exit(1);
        }
    };

    let state = match SessionState::resolve(&SessionOptions::from_matches(&matches)) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("{}", format_error(&e, output_mode));
            process::exit(1);
        }
    };

    let result = state.execute(&action).and_then(|steps| {
        if action.is_mutating() {
            state.persist()?;
        }
        Ok(steps)
    });

    match result {
        Ok(steps) => {
            let formatted = format_steps(&steps, output_mode);
            if !formatted.is_empty() {
                println!("{}", formatted);
            }
        }
        Err(e) => {
            eprintln!("{}", format_error(&e, output_mode));
            process::exit(1);
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
