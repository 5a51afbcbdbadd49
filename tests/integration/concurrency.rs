//! Many facades, one table

use std::collections::BTreeSet;
use std::thread;

use crate::common::{amount, new_store};

#[test]
fn concurrent_writers_never_share_a_timestamp() {
    let store = new_store();

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = store.clone();
            thread::spawn(move || {
                (0..50)
                    .map(|i| store.put("order#hot", &amount(), &format!("{}-{}", t, i)).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut seen = BTreeSet::new();
    for h in handles {
        for ts in h.join().unwrap() {
            assert!(seen.insert(ts), "duplicate commit timestamp {}", ts);
        }
    }

    let versions = store.get_versions("order#hot", &amount(), 1000).unwrap();
    assert_eq!(versions.len(), 400);
    assert!(versions.windows(2).all(|w| w[0].timestamp > w[1].timestamp));
}

#[test]
fn readers_see_whole_rows() {
    let store = new_store();
    let writer = {
        let store = store.clone();
        thread::spawn(move || {
            for i in 0..200 {
                let key = format!("order#{:04}", i);
                store
                    .put_row(
                        &key,
                        vec![
                            (amount(), i.to_string()),
                            (crate::common::customer(), format!("c{}", i)),
                        ],
                    )
                    .unwrap();
            }
        })
    };

    for _ in 0..20 {
        for (_, row) in store.scan().unwrap() {
            assert_eq!(row.column_count(), 2);
        }
    }
    writer.join().unwrap();
    assert_eq!(store.scan().unwrap().count(), 200);
}

#[test]
fn update_never_resurrects_a_deleted_row() {
    let store = new_store();
    store.put("order#1002", &amount(), "750").unwrap();

    let updater = {
        let store = store.clone();
        thread::spawn(move || {
            for i in 0..2000 {
                match store.update("order#1002", &amount(), &i.to_string()) {
                    Ok(_) => {}
                    Err(e) => assert!(e.is_not_found(), "unexpected error {}", e),
                }
            }
        })
    };
    store.delete("order#1002").unwrap();
    updater.join().unwrap();

    assert!(store.get("order#1002").unwrap().is_none());
}
