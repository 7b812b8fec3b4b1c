//! Network Asset Cache
//!
//! Install-time precache plus a cache-first request path for the static
//! assets the app depends on (dictionaries, the similarity table, the index
//! page), so that everything keeps working offline once fetched.
//!
//! - `generation` - versioned cache names and stale-generation detection
//! - `storage` - on-disk named caches
//! - `fetcher` - request/response types and the network seam
//! - `worker` - install / activate / intercept lifecycle

pub mod error;
pub mod fetcher;
pub mod generation;
pub mod storage;
pub mod worker;

pub use error::{AssetError, AssetResult};
pub use fetcher::{AssetRequest, AssetResponse, Fetcher, HttpFetcher, RequestMode};
pub use generation::CacheGeneration;
pub use storage::{AssetStorage, NamedCache};
pub use worker::{AssetWorker, Interception, PrecacheReport, WorkerState};
