//! Shared fixtures for integration tests

use std::sync::Arc;

use rowstore::{ColumnRef, MemoryDatabase, RowStore};

pub fn amount() -> ColumnRef {
    ColumnRef::new("orders", "amount")
}

pub fn customer() -> ColumnRef {
    ColumnRef::new("orders", "customer")
}

pub fn status() -> ColumnRef {
    ColumnRef::new("delivery", "status")
}

pub fn new_store() -> RowStore<MemoryDatabase> {
    RowStore::new(Arc::new(MemoryDatabase::new()))
}

/// The four demo orders. `order#1005` has no amount.
pub fn seed(store: &RowStore<MemoryDatabase>) {
    let orders: [(&str, &str, Option<&str>, &str); 4] = [
        ("order#1001", "John Doe", Some("1200"), "Shipped"),
        ("order#1002", "Aditi Sharma", Some("750"), "Pending"),
        ("order#1003", "Rahul Kumar", Some("450"), "Delivered"),
        ("order#1005", "Shashank", None, "Shipped"),
    ];
    for (key, who, how_much, state) in orders {
        let mut cells = vec![(customer(), who), (status(), state)];
        if let Some(v) = how_much {
            cells.push((amount(), v));
        }
        store.put_row(key, cells).unwrap();
    }
}
