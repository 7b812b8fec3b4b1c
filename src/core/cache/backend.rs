//! Storage backends for the structured cache store.
//!
//! Backends are plain key-value stores: they persist whatever entry they are
//! handed, write time included, and leave TTL policy to [`CacheStore`].
//!
//! [`CacheStore`]: super::CacheStore

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{OnceCell, RwLock};
use tracing::info;

use super::error::{CacheError, CacheResult};
use crate::database::{CacheEntryOps, CacheEntryRecord, Database};

/// A value together with the moment it was written.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEntry {
    pub key: String,
    pub value: serde_json::Value,
    pub stored_at: DateTime<Utc>,
}

#[async_trait]
pub trait CacheBackend: Send + Sync {
    async fn get(&self, key: &str) -> CacheResult<Option<StoredEntry>>;

    /// Insert or replace the entry under `entry.key`.
    async fn put(&self, entry: StoredEntry) -> CacheResult<()>;

    async fn delete(&self, key: &str) -> CacheResult<()>;

    async fn clear(&self) -> CacheResult<()>;

    /// Every stored key, expired or not.
    async fn keys(&self) -> CacheResult<Vec<String>>;
}

// ============================================================================
// SQLite
// ============================================================================

/// SQLite-backed store, opened on first use and kept for the process lifetime.
pub struct SqliteBackend {
    data_dir: PathBuf,
    db: OnceCell<Database>,
}

impl SqliteBackend {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            db: OnceCell::new(),
        }
    }

    /// Wrap an already opened database.
    pub fn with_database(db: Database) -> Self {
        Self {
            data_dir: db
                .path()
                .parent()
                .map(PathBuf::from)
                .unwrap_or_default(),
            db: OnceCell::new_with(Some(db)),
        }
    }

    async fn db(&self) -> CacheResult<&Database> {
        self.db
            .get_or_try_init(|| async {
                info!(data_dir = %self.data_dir.display(), "Opening cache database");
                Database::new(&self.data_dir)
                    .await
                    .map_err(|e| CacheError::unavailable(e.to_string()))
            })
            .await
    }
}

fn record_to_entry(record: CacheEntryRecord) -> CacheResult<StoredEntry> {
    let stored_at = DateTime::<Utc>::from_timestamp_millis(record.stored_at).ok_or_else(|| {
        CacheError::backend(format!("invalid timestamp {} for {}", record.stored_at, record.key))
    })?;
    Ok(StoredEntry {
        value: serde_json::from_str(&record.value)?,
        key: record.key,
        stored_at,
    })
}

#[async_trait]
impl CacheBackend for SqliteBackend {
    async fn get(&self, key: &str) -> CacheResult<Option<StoredEntry>> {
        let record = self.db().await?.get_cache_entry(key).await?;
        record.map(record_to_entry).transpose()
    }

    async fn put(&self, entry: StoredEntry) -> CacheResult<()> {
        let record = CacheEntryRecord {
            value: serde_json::to_string(&entry.value)?,
            stored_at: entry.stored_at.timestamp_millis(),
            key: entry.key,
        };
        self.db().await?.put_cache_entry(&record).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.db().await?.delete_cache_entry(key).await?;
        Ok(())
    }

    async fn clear(&self) -> CacheResult<()> {
        self.db().await?.clear_cache_entries().await?;
        Ok(())
    }

    async fn keys(&self) -> CacheResult<Vec<String>> {
        Ok(self.db().await?.list_cache_keys().await?)
    }
}

// ============================================================================
// In-memory
// ============================================================================

/// Volatile store, for tests and for running without a data directory.
#[derive(Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, StoredEntry>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn get(&self, key: &str) -> CacheResult<Option<StoredEntry>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, entry: StoredEntry) -> CacheResult<()> {
        self.entries.write().await.insert(entry.key.clone(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn clear(&self) -> CacheResult<()> {
        self.entries.write().await.clear();
        Ok(())
    }

    async fn keys(&self) -> CacheResult<Vec<String>> {
        let mut keys: Vec<String> = self.entries.read().await.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}
