//! Session wrapper around a `RowStore` and its snapshot file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::ArgMatches;
use rowstore_core::{Cell, ColumnRef, Result, Row, Timestamp, Value};
use rowstore_primitives::RowStore;
use rowstore_storage::{MemoryDatabase, StoreConfig, CONFIG_FILE_NAME};
use tracing::debug;

use crate::parse::CliAction;

/// Demo orders written by `insert-demo`. `order#1005` has no amount.
pub const DEMO_ORDERS: &[(&str, &[(&str, &str)])] = &[
    (
        "order#1001",
        &[
            ("orders:customer", "John Doe"),
            ("orders:product", "Laptop"),
            ("orders:amount", "1200"),
            ("delivery:status", "Shipped"),
        ],
    ),
    (
        "order#1002",
        &[
            ("orders:customer", "Aditi Sharma"),
            ("orders:product", "Smartphone"),
            ("orders:amount", "750"),
            ("delivery:status", "Pending"),
        ],
    ),
    (
        "order#1003",
        &[
            ("orders:customer", "Rahul Kumar"),
            ("orders:product", "Tablet"),
            ("orders:amount", "450"),
            ("delivery:status", "Delivered"),
        ],
    ),
    (
        "order#1005",
        &[
            ("orders:customer", "Shashank"),
            ("orders:product", "Laptop"),
            ("delivery:status", "Shipped"),
        ],
    ),
];

/// Result of one action, rendered by `format`.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Number of demo rows written.
    Inserted(usize),
    /// Full scan.
    Rows(Vec<(String, Row)>),
    /// Point lookup.
    Row { row_key: String, row: Option<Row> },
    /// Threshold filter hits.
    Matches(Vec<(String, Value)>),
    /// Group counts.
    Groups(BTreeMap<String, usize>),
    /// A cell update.
    Updated {
        row_key: String,
        column: ColumnRef,
        timestamp: Timestamp,
    },
    /// Cell versions, newest first.
    Versions(Vec<Cell>),
    /// Row deletion.
    Deleted { row_key: String },
}

/// One step of the `demo` flow.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Short heading for the step.
    pub title: String,
    /// What the step produced.
    pub output: Output,
}

/// Where a session's config and table live, as chosen on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// `--cache`: in-memory only
    pub cache: bool,
    /// `--db`: snapshot file overriding the config
    pub db: Option<PathBuf>,
    /// `--config`: config file path
    pub config: PathBuf,
}

impl SessionOptions {
    /// Read the global flags.
    pub fn from_matches(matches: &ArgMatches) -> Self {
        SessionOptions {
            cache: matches.get_flag("cache"),
            db: matches.get_one::<String>("db").map(PathBuf::from),
            config: matches
                .get_one::<String>("config")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME)),
        }
    }
}

/// Holds the store and where it persists.
pub struct SessionState {
    store: RowStore<MemoryDatabase>,
    snapshot: Option<PathBuf>,
}

impl SessionState {
    /// Ephemeral session with nothing on disk.
    pub fn cache(config: StoreConfig) -> Result<Self> {
        let db = MemoryDatabase::with_config(config)?;
        Ok(SessionState {
            store: RowStore::new(Arc::new(db)),
            snapshot: None,
        })
    }

    /// Session backed by a snapshot file, loaded if it exists.
    pub fn open(path: &Path, config: StoreConfig) -> Result<Self> {
        let db = MemoryDatabase::load_snapshot(path, config)?;
        Ok(SessionState {
            store: RowStore::new(Arc::new(db)),
            snapshot: Some(path.to_path_buf()),
        })
    }

    /// Open the session the options describe.
    ///
    /// Outside `--cache` mode a missing config file is created with
    /// defaults. In `--cache` mode the config is read if present and nothing
    /// is written. The snapshot is `--db` if given, else the config's
    /// `snapshot`.
    pub fn resolve(options: &SessionOptions) -> Result<Self> {
        let config = if options.cache {
            if options.config.exists() {
                StoreConfig::from_file(&options.config)?
            } else {
                StoreConfig::default()
            }
        } else {
            StoreConfig::write_default_if_missing(&options.config)?;
            StoreConfig::from_file(&options.config)?
        };

        if options.cache {
            return SessionState::cache(config);
        }
        let snapshot = options
            .db
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.snapshot));
        debug!(snapshot = %snapshot.display(), table = %config.table, "opening session");
        SessionState::open(&snapshot, config)
    }

    /// The underlying facade.
    pub fn store(&self) -> &RowStore<MemoryDatabase> {
        &self.store
    }

    /// Run an action. `demo` yields one step per stage; everything else one.
    pub fn execute(&self, action: &CliAction) -> Result<Vec<Step>> {
        if *action == CliAction::Demo {
            return demo_plan()
                .iter()
                .map(|(title, action)| {
                    Ok(Step {
                        title: title.to_string(),
                        output: self.run(action)?,
                    })
                })
                .collect();
        }
        let output = self.run(action)?;
        Ok(vec![Step {
            title: String::new(),
            output,
        }])
    }

    /// Write the snapshot back, if this session has one.
    pub fn persist(&self) -> Result<()> {
        match &self.snapshot {
            Some(path) => self.store.database().save_snapshot(path),
            None => Ok(()),
        }
    }

    fn run(&self, action: &CliAction) -> Result<Output> {
        debug!(?action, "running");
        let store = &self.store;
        match action {
            CliAction::InsertDemo => {
                for (row_key, cells) in DEMO_ORDERS {
                    let cells = cells
                        .iter()
                        .map(|(col, value)| Ok((ColumnRef::parse(col)?, *value)))
                        .collect::<Result<Vec<_>>>()?;
                    store.put_row(row_key, cells)?;
                }
                Ok(Output::Inserted(DEMO_ORDERS.len()))
            }
            CliAction::Scan => Ok(Output::Rows(store.scan()?.collect())),
            CliAction::Lookup { row_key } => Ok(Output::Row {
                row_key: row_key.clone(),
                row: store.get(row_key)?,
            }),
            CliAction::Filter { column, threshold } => Ok(Output::Matches(
                store.filter_greater_than(column, *threshold)?,
            )),
            CliAction::GroupBy { column } => Ok(Output::Groups(store.count_by_column(column)?)),
            CliAction::Update {
                row_key,
                column,
                value,
            } => {
                let timestamp = store.update(row_key, column, value)?;
                Ok(Output::Updated {
                    row_key: row_key.clone(),
                    column: column.clone(),
                    timestamp,
                })
            }
            CliAction::Versions {
                row_key,
                column,
                limit,
            } => Ok(Output::Versions(store.get_versions(row_key, column, *limit)?)),
            CliAction::Delete { row_key } => {
                store.delete(row_key)?;
                Ok(Output::Deleted {
                    row_key: row_key.clone(),
                })
            }
            CliAction::Demo => Err(rowstore_core::Error::invalid_input(
                "demo cannot be nested",
            )),
        }
    }
}

/// The demonstration flow, in order.
pub fn demo_plan() -> Vec<(&'static str, CliAction)> {
    let amount = ColumnRef::new("orders", "amount");
    vec![
        ("insert", CliAction::InsertDemo),
        ("scan", CliAction::Scan),
        (
            "lookup order#1002",
            CliAction::Lookup {
                row_key: "order#1002".into(),
            },
        ),
        (
            "filter orders:amount > 700",
            CliAction::Filter {
                column: amount.clone(),
                threshold: 700,
            },
        ),
        (
            "group by orders:customer",
            CliAction::GroupBy {
                column: ColumnRef::new("orders", "customer"),
            },
        ),
        (
            "update order#1002 orders:amount = 1100",
            CliAction::Update {
                row_key: "order#1002".into(),
                column: amount.clone(),
                value: "1100".into(),
            },
        ),
        (
            "versions order#1001 orders:amount",
            CliAction::Versions {
                row_key: "order#1001".into(),
                column: amount,
                limit: 3,
            },
        ),
        (
            "delete order#1003",
            CliAction::Delete {
                row_key: "order#1003".into(),
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> SessionState {
        SessionState::cache(StoreConfig::default()).unwrap()
    }

    fn single(state: &SessionState, action: CliAction) -> Output {
        let mut steps = state.execute(&action).unwrap();
        assert_eq!(steps.len(), 1);
        steps.remove(0).output
    }

    #[test]
    fn test_insert_demo_then_scan() {
        let state = session();
        assert_eq!(single(&state, CliAction::InsertDemo), Output::Inserted(4));

        match single(&state, CliAction::Scan) {
            Output::Rows(rows) => {
                let keys: Vec<_> = rows.iter().map(|(k, _)| k.as_str()).collect();
                assert_eq!(keys, ["order#1001", "order#1002", "order#1003", "order#1005"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_filter_skips_row_without_amount() {
        let state = session();
        state.execute(&CliAction::InsertDemo).unwrap();
        let out = single(
            &state,
            CliAction::Filter {
                column: ColumnRef::new("orders", "amount"),
                threshold: 700,
            },
        );
        assert_eq!(
            out,
            Output::Matches(vec![
                ("order#1001".to_string(), Value::Int(1200)),
                ("order#1002".to_string(), Value::Int(750))
            ])
        );
    }

    #[test]
    fn test_update_missing_row_fails() {
        let state = session();
        let err = state
            .execute(&CliAction::Update {
                row_key: "order#9999".into(),
                column: ColumnRef::new("orders", "amount"),
                value: "1".into(),
            })
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_demo_flow() {
        let state = session();
        let steps = state.execute(&CliAction::Demo).unwrap();
        assert_eq!(steps.len(), demo_plan().len());

        let groups = steps
            .iter()
            .find_map(|s| match &s.output {
                Output::Groups(g) => Some(g.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(groups.values().sum::<usize>(), 4);

        assert!(state.store().get("order#1003").unwrap().is_none());
        let amount = ColumnRef::new("orders", "amount");
        let versions = state.store().get_versions("order#1002", &amount, 5).unwrap();
        assert_eq!(versions.len(), 2);
        assert_eq!(versions[0].value, "1100");
    }

    #[test]
    fn test_persist_round_trips_through_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");

        let state = SessionState::open(&path, StoreConfig::default()).unwrap();
        state.execute(&CliAction::InsertDemo).unwrap();
        state.persist().unwrap();

        let reopened = SessionState::open(&path, StoreConfig::default()).unwrap();
        let row = reopened.store().get("order#1002").unwrap().unwrap();
        assert_eq!(row.value(&ColumnRef::new("orders", "customer")), Some("Aditi Sharma"));
    }

    fn options(dir: &Path, db: Option<&str>, cache: bool) -> SessionOptions {
        SessionOptions {
            cache,
            db: db.map(|name| dir.join(name)),
            config: dir.join("rowstore.toml"),
        }
    }

    #[test]
    fn test_options_from_flags() {
        let m = crate::commands::build_cli()
            .try_get_matches_from(["rowstore", "scan", "--db", "t.json", "--config", "c.toml"])
            .unwrap();
        let opts = SessionOptions::from_matches(&m);
        assert_eq!(opts.db, Some(PathBuf::from("t.json")));
        assert_eq!(opts.config, PathBuf::from("c.toml"));
        assert!(!opts.cache);

        let m = crate::commands::build_cli()
            .try_get_matches_from(["rowstore", "scan", "--cache"])
            .unwrap();
        let opts = SessionOptions::from_matches(&m);
        assert_eq!(opts.config, PathBuf::from(CONFIG_FILE_NAME));
        assert_eq!(opts.db, None);
        assert!(opts.cache);
    }

    #[test]
    fn test_resolve_creates_default_config_and_uses_db_flag() {
        let dir = tempfile::tempdir().unwrap();
        let opts = options(dir.path(), Some("flag.json"), false);

        let state = SessionState::resolve(&opts).unwrap();
        assert!(opts.config.exists());
        assert_eq!(StoreConfig::from_file(&opts.config).unwrap(), StoreConfig::default());

        state.execute(&CliAction::InsertDemo).unwrap();
        state.persist().unwrap();
        assert!(dir.path().join("flag.json").exists());
    }

    #[test]
    fn test_resolve_falls_back_to_config_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let opts = options(dir.path(), None, false);
        let snapshot = dir.path().join("from_config.json");
        let config = StoreConfig {
            snapshot: snapshot.display().to_string(),
            ..StoreConfig::default()
        };
        config.write_to_file(&opts.config).unwrap();

        let state = SessionState::resolve(&opts).unwrap();
        state.execute(&CliAction::InsertDemo).unwrap();
        state.persist().unwrap();
        assert!(snapshot.exists());

        let reopened = SessionState::resolve(&opts).unwrap();
        assert!(reopened.store().exists("order#1001").unwrap());
    }

    #[test]
    fn test_resolve_cache_mode_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let opts = options(dir.path(), None, true);

        let state = SessionState::resolve(&opts).unwrap();
        state.execute(&CliAction::InsertDemo).unwrap();
        state.persist().unwrap();

        assert!(!opts.config.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_resolve_cache_mode_reads_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        let opts = options(dir.path(), None, true);
        StoreConfig::with_max_versions(1)
            .write_to_file(&opts.config)
            .unwrap();

        let state = SessionState::resolve(&opts).unwrap();
        let amount = ColumnRef::new("orders", "amount");
        state.store().put("order#1", &amount, "1").unwrap();
        state.store().put("order#1", &amount, "2").unwrap();
        assert_eq!(state.store().get_versions("order#1", &amount, 5).unwrap().len(), 1);
    }
}
