//! Dictionary catalogue and loader.
//!
//! Dictionaries are JSON arrays of [`LexiconEntry`] served next to the app
//! under `json/<name>.json`. A failed load is fatal for that load: the error
//! goes back to the caller and nothing is retried here.

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

use super::LexiconEntry;
use crate::core::assets::{AssetError, AssetRequest, AssetWorker};

/// Names of the bundled word lists, in display order.
pub const DICTIONARY_NAMES: [&str; 7] = [
    "1-初中-顺序",
    "2-高中-顺序",
    "3-CET4-顺序",
    "4-CET6-顺序",
    "5-考研-顺序",
    "6-托福-顺序",
    "7-SAT-顺序",
];

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("Dictionary not found: {0}")]
    UnknownDictionary(String),

    #[error("Failed to fetch dictionary {name}: {source}")]
    Fetch {
        name: String,
        #[source]
        source: AssetError,
    },

    #[error("Failed to load dictionary {name}: status {status}")]
    Status { name: String, status: u16 },

    #[error("Invalid dictionary {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: AssetError,
    },
}

pub type DictionaryResult<T> = Result<T, DictionaryError>;

/// Relative asset path of a known dictionary.
pub fn dictionary_path(name: &str) -> Option<String> {
    DICTIONARY_NAMES
        .contains(&name)
        .then(|| format!("json/{name}.json"))
}

/// Loads named word lists through the asset worker.
#[derive(Clone)]
pub struct DictionaryLoader {
    worker: Arc<AssetWorker>,
}

impl DictionaryLoader {
    pub fn new(worker: Arc<AssetWorker>) -> Self {
        Self { worker }
    }

    pub async fn load(&self, name: &str) -> DictionaryResult<Vec<LexiconEntry>> {
        let path = dictionary_path(name)
            .ok_or_else(|| DictionaryError::UnknownDictionary(name.to_string()))?;

        let fetch_error = |source| DictionaryError::Fetch {
            name: name.to_string(),
            source,
        };
        let url = self.worker.asset_url(&path).map_err(fetch_error)?;
        let response = self
            .worker
            .fetch(&AssetRequest::get(url))
            .await
            .map_err(|source| {
                error!(dictionary = name, error = %source, "Dictionary fetch failed");
                fetch_error(source)
            })?;

        if !response.is_success() {
            return Err(DictionaryError::Status {
                name: name.to_string(),
                status: response.status,
            });
        }

        let entries: Vec<LexiconEntry> = response.json().map_err(|source| DictionaryError::Parse {
            name: name.to_string(),
            source,
        })?;
        info!(dictionary = name, words = entries.len(), "Dictionary loaded");
        Ok(entries)
    }
}
