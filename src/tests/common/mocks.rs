//! Test doubles for the cache, similarity and network seams.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::core::assets::{AssetError, AssetRequest, AssetResponse, AssetResult, Fetcher, HttpFetcher};
use crate::core::cache::{CacheBackend, CacheError, CacheResult, CacheStore, StoredEntry, SystemClock};
use crate::core::similarity::{
    SimilarWord, SimilarityError, SimilarityResult, SimilaritySource, SimilarityTable,
};

// =============================================================================
// Cache Backend
// =============================================================================

/// Backend whose every operation fails, as when storage is unavailable.
#[derive(Debug, Default)]
pub struct FailingBackend;

#[async_trait]
impl CacheBackend for FailingBackend {
    async fn get(&self, _key: &str) -> CacheResult<Option<StoredEntry>> {
        Err(CacheError::unavailable("storage disabled"))
    }

    async fn put(&self, _entry: StoredEntry) -> CacheResult<()> {
        Err(CacheError::unavailable("storage disabled"))
    }

    async fn delete(&self, _key: &str) -> CacheResult<()> {
        Err(CacheError::unavailable("storage disabled"))
    }

    async fn clear(&self) -> CacheResult<()> {
        Err(CacheError::unavailable("storage disabled"))
    }

    async fn keys(&self) -> CacheResult<Vec<String>> {
        Err(CacheError::unavailable("storage disabled"))
    }
}

pub fn create_failing_store() -> CacheStore {
    CacheStore::new(
        Arc::new(FailingBackend),
        Arc::new(SystemClock),
        chrono::Duration::days(7),
    )
}

// =============================================================================
// Similarity Source
// =============================================================================

/// In-memory similarity table that counts fetches.
pub struct MockSimilaritySource {
    table: SimilarityTable,
    delay: Duration,
    failures_left: AtomicUsize,
    calls: AtomicUsize,
}

impl MockSimilaritySource {
    pub fn new(table: SimilarityTable) -> Self {
        Self {
            table,
            delay: Duration::ZERO,
            failures_left: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    /// Build from `(word, [(neighbour, similarity)])` rows.
    pub fn from_rows(rows: &[(&str, Vec<(&str, f64)>)]) -> Self {
        let table = rows
            .iter()
            .map(|(word, neighbours)| {
                let neighbours = neighbours
                    .iter()
                    .map(|(w, s)| SimilarWord {
                        word: w.to_string(),
                        similarity: *s,
                    })
                    .collect();
                (word.to_string(), neighbours)
            })
            .collect();
        Self::new(table)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Fail the first `n` fetches.
    pub fn failing_first(self, n: usize) -> Self {
        self.failures_left.store(n, Ordering::SeqCst);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SimilaritySource for MockSimilaritySource {
    async fn fetch_table(&self) -> SimilarityResult<SimilarityTable> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let failing = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(SimilarityError::Fetch("connection reset".to_string()));
        }
        Ok(self.table.clone())
    }
}

// =============================================================================
// Fetcher
// =============================================================================

/// HTTP fetcher that can be switched offline.
#[derive(Default)]
pub struct SwitchableFetcher {
    inner: HttpFetcher,
    offline: AtomicBool,
}

impl SwitchableFetcher {
    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Fetcher for SwitchableFetcher {
    async fn fetch(&self, request: &AssetRequest) -> AssetResult<AssetResponse> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AssetError::network("network unreachable"));
        }
        self.inner.fetch(request).await
    }
}
