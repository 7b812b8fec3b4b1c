//! Cache Entry Database Tests

use crate::database::{CacheEntryOps, CacheEntryRecord};
use crate::tests::common::create_test_db;

fn record(key: &str, value: &str, stored_at: i64) -> CacheEntryRecord {
    CacheEntryRecord {
        key: key.to_string(),
        value: value.to_string(),
        stored_at,
    }
}

#[tokio::test]
async fn test_cache_entry_lifecycle() {
    let (db, _temp) = create_test_db().await;

    db.put_cache_entry(&record("alpha", r#"[1,2]"#, 1_000))
        .await
        .expect("Failed to save");

    let loaded = db
        .get_cache_entry("alpha")
        .await
        .expect("Failed to get")
        .expect("Entry missing");
    assert_eq!(loaded.value, "[1,2]");
    assert_eq!(loaded.stored_at, 1_000);

    // Same key replaces value and timestamp
    db.put_cache_entry(&record("alpha", r#""updated""#, 2_000))
        .await
        .expect("Failed to update");
    let updated = db.get_cache_entry("alpha").await.unwrap().unwrap();
    assert_eq!(updated.value, r#""updated""#);
    assert_eq!(updated.stored_at, 2_000);

    db.delete_cache_entry("alpha").await.expect("Failed to delete");
    assert!(db.get_cache_entry("alpha").await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_keys_sorted_and_clear() {
    let (db, _temp) = create_test_db().await;

    for key in ["zebra", "apple", "mango"] {
        db.put_cache_entry(&record(key, "null", 0)).await.unwrap();
    }

    let keys = db.list_cache_keys().await.expect("Failed to list");
    assert_eq!(keys, vec!["apple", "mango", "zebra"]);

    db.clear_cache_entries().await.expect("Failed to clear");
    assert!(db.list_cache_keys().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_missing_key_is_ok() {
    let (db, _temp) = create_test_db().await;
    db.delete_cache_entry("never-written")
        .await
        .expect("Deleting a missing key should succeed");
}

#[tokio::test]
async fn test_reopen_keeps_entries() {
    let (db, temp) = create_test_db().await;
    db.put_cache_entry(&record("persisted", "true", 42)).await.unwrap();
    db.close().await;

    let reopened = crate::database::Database::new(temp.path())
        .await
        .expect("Failed to reopen");
    let entry = reopened.get_cache_entry("persisted").await.unwrap();
    assert_eq!(entry.map(|e| e.stored_at), Some(42));
}
