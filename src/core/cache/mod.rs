//! Structured Cache Store
//!
//! Best-effort persistent key-value cache used for memoized query results.
//! Each entry carries its own write time and is valid for the store's TTL
//! (7 days by default); stale entries are evicted lazily on read.
//!
//! # Usage
//!
//! ```rust,ignore
//! let store = CacheStore::sqlite(data_dir, chrono::Duration::days(7));
//! store.set_json("word-top-similar-v1-query-cat-dog", &results).await;
//! let hit: Option<Vec<SimilarWord>> = store.get_json("word-top-similar-v1-query-cat-dog").await;
//! ```

pub mod backend;
pub mod clock;
pub mod error;
pub mod store;

pub use backend::{CacheBackend, MemoryBackend, SqliteBackend, StoredEntry};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CacheError, CacheResult};
pub use store::{CacheStore, WriteOutcome};
