//! The order-table walkthrough, one operation at a time

use rowstore::{Database, Error, HasColumn, Row, RowFilter, Value};

use crate::common::{amount, customer, new_store, seed, status};

#[test]
fn put_then_get_returns_value() {
    let store = new_store();
    store.put("order#1001", &amount(), "1200").unwrap();

    let row = store.get("order#1001").unwrap().unwrap();
    assert_eq!(row.value(&amount()), Some("1200"));
}

#[test]
fn scan_yields_rows_in_key_order() {
    let store = new_store();
    seed(&store);

    let keys: Vec<String> = store.scan().unwrap().map(|(k, _)| k).collect();
    assert_eq!(keys, ["order#1001", "order#1002", "order#1003", "order#1005"]);
}

#[test]
fn lookup_missing_row_is_none() {
    let store = new_store();
    seed(&store);
    assert!(store.get("order#9999").unwrap().is_none());
    assert!(matches!(
        store.require("order#9999"),
        Err(Error::RowNotFound { .. })
    ));
}

#[test]
fn threshold_filter_keeps_only_larger_amounts() {
    let store = new_store();
    store.put("order#1002", &amount(), "750").unwrap();
    store.put("order#1003", &amount(), "450").unwrap();

    let hits = store.filter_greater_than(&amount(), 700).unwrap();
    assert_eq!(hits, vec![("order#1002".to_string(), Value::Int(750))]);
}

#[test]
fn threshold_filter_skips_missing_and_malformed() {
    let store = new_store();
    seed(&store);
    store.put("order#1006", &amount(), "a lot").unwrap();

    let keys: Vec<String> = store
        .filter_greater_than(&amount(), 0)
        .unwrap()
        .into_iter()
        .map(|(k, _)| k)
        .collect();
    assert_eq!(keys, ["order#1001", "order#1002", "order#1003"]);
}

#[test]
fn group_by_customer_counts_rows() {
    let store = new_store();
    seed(&store);
    store.put("order#1007", &customer(), "John Doe").unwrap();
    store.put("order#1008", &status(), "Pending").unwrap();

    let counts = store.count_by_column(&customer()).unwrap();
    assert_eq!(counts.get("John Doe"), Some(&2));
    assert_eq!(counts.get("Shashank"), Some(&1));
    assert_eq!(counts.values().sum::<usize>(), 5);
}

#[test]
fn update_adds_a_version() {
    let store = new_store();
    seed(&store);
    store.update("order#1002", &amount(), "1100").unwrap();

    let versions = store.get_versions("order#1002", &amount(), 3).unwrap();
    let values: Vec<&str> = versions.iter().map(|c| c.value.as_str()).collect();
    assert_eq!(values, ["1100", "750"]);

    let row = store.get("order#1002").unwrap().unwrap();
    assert_eq!(row.value(&amount()), Some("1100"));
    assert_eq!(row.cells(&amount()).len(), 1);
}

#[test]
fn update_of_missing_row_fails() {
    let store = new_store();
    let err = store.update("order#4040", &amount(), "1").unwrap_err();
    assert!(err.is_not_found());
    assert!(store.get("order#4040").unwrap().is_none());
}

#[test]
fn versions_of_absent_column_are_empty() {
    let store = new_store();
    seed(&store);
    assert!(store
        .get_versions("order#1005", &amount(), 5)
        .unwrap()
        .is_empty());
    assert!(store
        .get_versions("order#nope", &amount(), 5)
        .unwrap()
        .is_empty());
}

#[test]
fn delete_then_get_is_none() {
    let store = new_store();
    seed(&store);
    store.delete("order#1003").unwrap();

    assert!(store.get("order#1003").unwrap().is_none());
    assert_eq!(store.scan().unwrap().count(), 3);
    // idempotent
    store.delete("order#1003").unwrap();
}

#[test]
fn scan_where_with_closure_and_has_column() {
    let store = new_store();
    seed(&store);

    let shipped: Vec<String> = store
        .scan_where(|_: &str, row: &Row| row.value(&status()) == Some("Shipped"))
        .unwrap()
        .map(|(k, _)| k)
        .collect();
    assert_eq!(shipped, ["order#1001", "order#1005"]);

    assert_eq!(store.scan_where(HasColumn(amount())).unwrap().count(), 3);
}

#[test]
fn database_filters_limit_families() {
    let store = new_store();
    seed(&store);

    let filter = RowFilter::FamilyName("delivery".into());
    let row = store
        .database()
        .read_row("order#1001", Some(&filter))
        .unwrap()
        .unwrap();
    assert_eq!(row.families().collect::<Vec<_>>(), ["delivery"]);
}
