//! Similarity Data Loader
//!
//! Serves precomputed semantic neighbours from the `word → [{word,
//! similarity}]` table. The table is large, so it is fetched at most once per
//! loader: concurrent callers share the one in-flight load, and a failed
//! load clears the in-flight marker so the next call retries.
//!
//! Per-word query results (already filtered to the current lexicon) are
//! memoized in the [`CacheStore`] under a key that encodes the lexicon.

pub mod source;

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::{BoxFuture, FutureExt, Shared};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::core::cache::CacheStore;

pub use source::{AssetSimilaritySource, SimilaritySource};

/// Asset path of the similarity table, relative to the deployment root.
pub const SIMILARITY_TABLE_PATH: &str = "json/word_top_similar.json";

/// Prefix of every memoized query key; bump when the table format changes.
pub const TABLE_CACHE_KEY: &str = "word-top-similar-v1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarWord {
    pub word: String,
    pub similarity: f64,
}

/// Lowercase word → neighbours, as shipped.
pub type SimilarityTable = HashMap<String, Vec<SimilarWord>>;

/// Load failures. `Clone` so one failure can be handed to every waiter.
#[derive(Debug, Clone, Error)]
pub enum SimilarityError {
    #[error("Failed to fetch similarity table: {0}")]
    Fetch(String),

    #[error("Failed to load similarity table: status {0}")]
    Status(u16),

    #[error("Invalid similarity table: {0}")]
    Parse(String),
}

pub type SimilarityResult<T> = Result<T, SimilarityError>;

type SharedLoad = Shared<BoxFuture<'static, SimilarityResult<Arc<SimilarityTable>>>>;

#[derive(Default)]
struct LoaderState {
    table: Option<Arc<SimilarityTable>>,
    pending: Option<(u64, SharedLoad)>,
    next_load_id: u64,
}

/// Memoizing loader for the similarity table. Clones share state.
#[derive(Clone)]
pub struct SimilarityLoader {
    source: Arc<dyn SimilaritySource>,
    store: CacheStore,
    state: Arc<Mutex<LoaderState>>,
}

/// Memo key: lowercased word plus the sorted, comma-joined lexicon.
pub fn query_cache_key(word: &str, valid_words: &HashSet<String>) -> String {
    let mut sorted: Vec<&str> = valid_words.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    format!(
        "{TABLE_CACHE_KEY}-query-{}-{}",
        word.to_lowercase(),
        sorted.join(",")
    )
}

impl SimilarityLoader {
    pub fn new(source: Arc<dyn SimilaritySource>, store: CacheStore) -> Self {
        Self {
            source,
            store,
            state: Arc::new(Mutex::new(LoaderState::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LoaderState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn is_loaded(&self) -> bool {
        self.lock().table.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().pending.is_some()
    }

    /// The full table, fetching it if nobody has yet.
    pub async fn load_table(&self) -> SimilarityResult<Arc<SimilarityTable>> {
        let (load_id, load) = {
            let mut state = self.lock();
            if let Some(table) = &state.table {
                return Ok(table.clone());
            }
            match &state.pending {
                Some((id, load)) => (*id, load.clone()),
                None => {
                    state.next_load_id += 1;
                    let id = state.next_load_id;
                    let source = self.source.clone();
                    let load = async move {
                        info!("Loading similarity table");
                        source.fetch_table().await.map(Arc::new)
                    }
                    .boxed()
                    .shared();
                    state.pending = Some((id, load.clone()));
                    (id, load)
                }
            }
        };

        let result = load.await;

        let mut state = self.lock();
        match &result {
            Ok(table) => {
                if state.table.is_none() {
                    info!(words = table.len(), "Similarity table loaded");
                    state.table = Some(table.clone());
                }
            }
            Err(e) => warn!(error = %e, "Similarity table load failed"),
        }
        if matches!(&state.pending, Some((id, _)) if *id == load_id) {
            state.pending = None;
        }
        result
    }

    /// Start loading in the background; failures are only logged.
    pub fn preload(&self) -> JoinHandle<()> {
        let loader = self.clone();
        tokio::spawn(async move {
            match loader.load_table().await {
                Ok(_) => info!("Similarity table preloaded"),
                Err(e) => warn!(error = %e, "Similarity table preload failed"),
            }
        })
    }

    /// Neighbours of `word` restricted to `valid_words`, best first.
    ///
    /// Never fails: a missing table or word yields an empty list.
    pub async fn get_similar_words_for_word(
        &self,
        word: &str,
        valid_words: &HashSet<String>,
    ) -> Vec<SimilarWord> {
        let key = query_cache_key(word, valid_words);
        if let Some(cached) = self.store.get_json::<Vec<SimilarWord>>(&key).await {
            debug!(word, "Similar words served from cache");
            return cached;
        }

        let table = match self.load_table().await {
            Ok(table) => table,
            Err(e) => {
                warn!(word, error = %e, "No similar words available");
                return Vec::new();
            }
        };

        let mut results: Vec<SimilarWord> = table
            .get(&word.to_lowercase())
            .map(|neighbours| {
                neighbours
                    .iter()
                    .filter(|n| valid_words.contains(&n.word))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        results.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));

        let store = self.store.clone();
        let value = results.clone();
        tokio::spawn(async move {
            store.set_json(&key, &value).await;
        });

        results
    }
}
