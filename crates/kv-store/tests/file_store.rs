//! Integration tests for the file-backed store.
//!
//! These tests verify that slots survive reopening the store and that the
//! cart envelope can be written and read back through a real file.

use kv_store::{
    CURRENT_SCHEMA_VERSION, FileKeyValueStore, KeyValueStore, KeyValueStoreExt, PersistedCart,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Line {
    product: String,
    quantity: u32,
}

#[test]
fn slots_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storefront.json");

    {
        let store = FileKeyValueStore::open(&path).unwrap();
        store.set("storefront.cart", "saved".to_string()).unwrap();
    }

    let reopened = FileKeyValueStore::open(&path).unwrap();
    assert_eq!(
        reopened.get("storefront.cart").unwrap().as_deref(),
        Some("saved")
    );
}

#[test]
fn removed_slot_stays_removed_after_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storefront.json");

    let store = FileKeyValueStore::open(&path).unwrap();
    store.set("storefront.cart", "saved".to_string()).unwrap();
    store.remove("storefront.cart").unwrap();
    drop(store);

    let reopened = FileKeyValueStore::open(&path).unwrap();
    assert!(!reopened.contains("storefront.cart").unwrap());
}

#[test]
fn cart_envelope_roundtrip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileKeyValueStore::open(dir.path().join("storefront.json")).unwrap();

    let lines = vec![
        Line {
            product: "tee-classic".to_string(),
            quantity: 2,
        },
        Line {
            product: "denim-jacket".to_string(),
            quantity: 1,
        },
    ];
    let raw = PersistedCart::new(lines.clone()).encode().unwrap();
    store.set("storefront.cart", raw).unwrap();

    let raw = store.get("storefront.cart").unwrap().unwrap();
    let decoded: PersistedCart<Line> = PersistedCart::decode(&raw).unwrap();

    assert_eq!(decoded.schema_version, CURRENT_SCHEMA_VERSION);
    assert_eq!(decoded.into_lines(), lines);
}
