use std::path::PathBuf;
use std::sync::Arc;

use chrono::Duration;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::backend::{CacheBackend, SqliteBackend, StoredEntry};
use super::clock::{Clock, SystemClock};
use super::error::CacheError;

/// Result of a best-effort write.
///
/// Failures have already been logged by the store; callers may inspect the
/// outcome but are never required to act on it.
#[derive(Debug)]
pub enum WriteOutcome {
    Stored,
    Failed(CacheError),
}

impl WriteOutcome {
    pub fn is_stored(&self) -> bool {
        matches!(self, WriteOutcome::Stored)
    }
}

/// Persistent key-value cache with per-entry TTL.
///
/// Every operation fails soft: reads degrade to a miss and writes to a
/// logged [`WriteOutcome::Failed`]. Cloning is cheap and clones share the
/// same backend.
#[derive(Clone)]
pub struct CacheStore {
    backend: Arc<dyn CacheBackend>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl CacheStore {
    pub fn new(backend: Arc<dyn CacheBackend>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self { backend, clock, ttl }
    }

    /// SQLite store in `data_dir`, opened lazily on first access.
    pub fn sqlite(data_dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self::new(
            Arc::new(SqliteBackend::new(data_dir)),
            Arc::new(SystemClock),
            ttl,
        )
    }

    /// Fetch a live entry. Expired entries are deleted and reported as a miss.
    pub async fn get(&self, key: &str) -> Option<serde_json::Value> {
        let entry = match self.backend.get(key).await {
            Ok(Some(entry)) => entry,
            Ok(None) => {
                debug!(key, "Cache miss");
                return None;
            }
            Err(e) => {
                warn!(key, error = %e, "Failed to read cache entry");
                return None;
            }
        };

        if self.clock.now() - entry.stored_at < self.ttl {
            debug!(key, "Cache hit");
            return Some(entry.value);
        }

        info!(key, stored_at = %entry.stored_at, "Evicting expired cache entry");
        self.delete(key).await;
        None
    }

    /// Typed read; an entry that no longer deserializes counts as a miss.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.get(key).await?;
        match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(key, error = %e, "Discarding undecodable cache entry");
                None
            }
        }
    }

    /// Upsert `value` under `key`, stamped with the current time.
    pub async fn set(&self, key: &str, value: serde_json::Value) -> WriteOutcome {
        let entry = StoredEntry {
            key: key.to_string(),
            value,
            stored_at: self.clock.now(),
        };
        Self::outcome("write", key, self.backend.put(entry).await)
    }

    pub async fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> WriteOutcome {
        match serde_json::to_value(value) {
            Ok(value) => self.set(key, value).await,
            Err(e) => Self::outcome("write", key, Err(e.into())),
        }
    }

    pub async fn delete(&self, key: &str) -> WriteOutcome {
        Self::outcome("delete", key, self.backend.delete(key).await)
    }

    pub async fn clear(&self) -> WriteOutcome {
        Self::outcome("clear", "*", self.backend.clear().await)
    }

    /// Keys currently held by the backend, including not-yet-evicted stale ones.
    pub async fn keys(&self) -> Vec<String> {
        match self.backend.keys().await {
            Ok(keys) => keys,
            Err(e) => {
                warn!(error = %e, "Failed to list cache keys");
                Vec::new()
            }
        }
    }

    fn outcome(op: &str, key: &str, result: Result<(), CacheError>) -> WriteOutcome {
        match result {
            Ok(()) => WriteOutcome::Stored,
            Err(e) => {
                warn!(op, key, error = %e, "Cache {op} failed");
                WriteOutcome::Failed(e)
            }
        }
    }
}
