//! Where the similarity table comes from.

use std::sync::Arc;

use async_trait::async_trait;

use super::{SimilarityError, SimilarityResult, SimilarityTable, SIMILARITY_TABLE_PATH};
use crate::core::assets::{AssetRequest, AssetWorker};

#[async_trait]
pub trait SimilaritySource: Send + Sync {
    async fn fetch_table(&self) -> SimilarityResult<SimilarityTable>;
}

/// Fetches the table through the asset worker, so it is cached for offline use.
#[derive(Clone)]
pub struct AssetSimilaritySource {
    worker: Arc<AssetWorker>,
}

impl AssetSimilaritySource {
    pub fn new(worker: Arc<AssetWorker>) -> Self {
        Self { worker }
    }
}

#[async_trait]
impl SimilaritySource for AssetSimilaritySource {
    async fn fetch_table(&self) -> SimilarityResult<SimilarityTable> {
        let url = self
            .worker
            .asset_url(SIMILARITY_TABLE_PATH)
            .map_err(|e| SimilarityError::Fetch(e.to_string()))?;
        let response = self
            .worker
            .fetch(&AssetRequest::get(url))
            .await
            .map_err(|e| SimilarityError::Fetch(e.to_string()))?;

        if !response.is_success() {
            return Err(SimilarityError::Status(response.status));
        }
        response
            .json()
            .map_err(|e| SimilarityError::Parse(e.to_string()))
    }
}
