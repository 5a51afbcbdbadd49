//! Snapshot and config round trips through the facade

use std::sync::Arc;

use rowstore::{MemoryDatabase, RowStore, StoreConfig, Timestamp};
use tempfile::TempDir;

use crate::common::{amount, customer, seed};

fn open(path: &std::path::Path, config: StoreConfig) -> RowStore<MemoryDatabase> {
    RowStore::new(Arc::new(
        MemoryDatabase::load_snapshot(path, config).unwrap(),
    ))
}

#[test]
fn history_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("orders.json");

    let store = open(&path, StoreConfig::default());
    seed(&store);
    store.update("order#1001", &amount(), "1300").unwrap();
    store.database().save_snapshot(&path).unwrap();
    drop(store);

    let store = open(&path, StoreConfig::default());
    let versions = store.get_versions("order#1001", &amount(), 5).unwrap();
    let values: Vec<&str> = versions.iter().map(|c| c.value.as_str()).collect();
    assert_eq!(values, ["1300", "1200"]);

    // New writes after reopen still sort above loaded history.
    store.update("order#1001", &amount(), "1400").unwrap();
    let latest = store.get_cell("order#1001", &amount()).unwrap().unwrap();
    assert_eq!(latest.value, "1400");
    assert!(latest.timestamp > versions[0].timestamp);
}

#[test]
fn max_versions_is_enforced_on_write_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("orders.json");

    let store = open(&path, StoreConfig::default());
    for v in ["1", "2", "3", "4"] {
        store.put("order#1", &amount(), v).unwrap();
    }
    store.database().save_snapshot(&path).unwrap();

    let store = open(&path, StoreConfig::with_max_versions(2));
    let versions = store.get_versions("order#1", &amount(), 10).unwrap();
    assert_eq!(versions.len(), 2);
    assert_eq!(versions[0].value, "4");

    store.put("order#1", &amount(), "5").unwrap();
    assert_eq!(store.get_versions("order#1", &amount(), 10).unwrap().len(), 2);
}

#[test]
fn config_file_drives_table() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("rowstore.toml");

    StoreConfig::write_default_if_missing(&config_path).unwrap();
    let mut config = StoreConfig::from_file(&config_path).unwrap();
    assert_eq!(config, StoreConfig::default());

    config.table = "archived_orders".into();
    config.max_versions = Some(3);
    config.write_to_file(&config_path).unwrap();

    let reread = StoreConfig::from_file(&config_path).unwrap();
    assert_eq!(reread.table, "archived_orders");
    assert_eq!(reread.max_versions, Some(3));

    let db = MemoryDatabase::with_config(reread).unwrap();
    assert_eq!(db.config().table, "archived_orders");
}

#[test]
fn deleted_rows_stay_deleted_after_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("orders.json");

    let store = open(&path, StoreConfig::default());
    seed(&store);
    store.delete("order#1003").unwrap();
    store.database().save_snapshot(&path).unwrap();

    let store = open(&path, StoreConfig::default());
    assert!(store.get("order#1003").unwrap().is_none());
    assert_eq!(store.count_by_column(&customer()).unwrap().len(), 3);
}

#[test]
fn explicit_future_timestamp_orders_the_same_before_and_after_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("orders.json");
    let future = Timestamp::from_micros(Timestamp::now().as_micros() + 3_600_000_000);

    let live = open(&path, StoreConfig::default());
    live.put_at("order#1001", &amount(), "explicit", future).unwrap();
    live.database().save_snapshot(&path).unwrap();
    live.put("order#1001", &amount(), "last-written").unwrap();

    let reloaded = open(&path, StoreConfig::default());
    reloaded.put("order#1001", &amount(), "last-written").unwrap();

    for store in [&live, &reloaded] {
        let row = store.get("order#1001").unwrap().unwrap();
        assert_eq!(row.value(&amount()), Some("last-written"));
    }
}
