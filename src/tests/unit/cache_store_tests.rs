//! Structured Cache Store Tests
//!
//! TTL handling, typed access and soft failure against the memory, SQLite
//! and failing backends.

use std::sync::Arc;

use chrono::Duration;
use serde_json::json;

use crate::core::cache::{CacheStore, ManualClock, SqliteBackend};
use crate::core::similarity::SimilarWord;
use crate::tests::common::{create_failing_store, create_test_db, create_test_store};

// =============================================================================
// TTL
// =============================================================================

#[tokio::test]
async fn test_set_then_get_within_ttl() {
    let (store, clock) = create_test_store();

    assert!(store.set("k", json!({"a": 1})).await.is_stored());
    clock.advance(Duration::days(6));

    assert_eq!(store.get("k").await, Some(json!({"a": 1})));
}

#[tokio::test]
async fn test_entry_expires_at_ttl_and_is_evicted() {
    let (store, clock) = create_test_store();
    store.set("k", json!("v")).await;

    clock.advance(Duration::days(7));

    assert_eq!(store.get("k").await, None);
    assert!(store.keys().await.is_empty(), "expired entry should be deleted on read");
}

#[tokio::test]
async fn test_stale_entry_stays_until_read() {
    let (store, clock) = create_test_store();
    store.set("old", json!(1)).await;
    clock.advance(Duration::days(8));
    store.set("new", json!(2)).await;

    assert_eq!(store.keys().await, vec!["new", "old"]);
    assert_eq!(store.get("old").await, None);
    assert_eq!(store.keys().await, vec!["new"]);
}

#[tokio::test]
async fn test_overwrite_refreshes_write_time() {
    let (store, clock) = create_test_store();
    store.set("k", json!("first")).await;
    clock.advance(Duration::days(5));
    store.set("k", json!("second")).await;
    clock.advance(Duration::days(5));

    assert_eq!(store.get("k").await, Some(json!("second")));
}

// =============================================================================
// Typed access
// =============================================================================

#[tokio::test]
async fn test_json_helpers() {
    let (store, _clock) = create_test_store();
    let words = vec![SimilarWord {
        word: "dog".to_string(),
        similarity: 0.9,
    }];

    store.set_json("similar", &words).await;
    let loaded: Option<Vec<SimilarWord>> = store.get_json("similar").await;
    assert_eq!(loaded, Some(words));
}

#[tokio::test]
async fn test_undecodable_entry_is_a_miss() {
    let (store, _clock) = create_test_store();
    store.set("similar", json!("not a list")).await;

    let loaded: Option<Vec<SimilarWord>> = store.get_json("similar").await;
    assert!(loaded.is_none());
}

#[tokio::test]
async fn test_delete_and_clear() {
    let (store, _clock) = create_test_store();
    store.set("a", json!(1)).await;
    store.set("b", json!(2)).await;

    assert!(store.delete("a").await.is_stored());
    assert_eq!(store.keys().await, vec!["b"]);

    assert!(store.clear().await.is_stored());
    assert!(store.keys().await.is_empty());
}

// =============================================================================
// Backends
// =============================================================================

#[tokio::test]
async fn test_sqlite_backend_honours_ttl() {
    let (db, _temp) = create_test_db().await;
    let clock = Arc::new(ManualClock::default());
    let store = CacheStore::new(
        Arc::new(SqliteBackend::with_database(db)),
        clock.clone(),
        Duration::days(7),
    );

    store.set_json("query", &vec!["dog", "fish"]).await;
    let hit: Option<Vec<String>> = store.get_json("query").await;
    assert_eq!(hit, Some(vec!["dog".to_string(), "fish".to_string()]));

    clock.advance(Duration::days(7) + Duration::seconds(1));
    assert_eq!(store.get("query").await, None);
    assert!(store.keys().await.is_empty());
}

#[tokio::test]
async fn test_sqlite_backend_opens_lazily() {
    let temp = tempfile::tempdir().unwrap();
    let store = CacheStore::sqlite(temp.path(), Duration::days(7));
    assert!(!temp.path().join(crate::database::DATABASE_FILE).exists());

    store.set("k", json!(true)).await;
    assert!(temp.path().join(crate::database::DATABASE_FILE).exists());
    assert_eq!(store.get("k").await, Some(json!(true)));
}

#[tokio::test]
async fn test_failing_backend_degrades_softly() {
    let store = create_failing_store();

    assert!(!store.set("k", json!(1)).await.is_stored());
    assert_eq!(store.get("k").await, None);
    assert!(!store.delete("k").await.is_stored());
    assert!(!store.clear().await.is_stored());
    assert!(store.keys().await.is_empty());
}
