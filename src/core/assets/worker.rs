//! Cache-first asset worker
//!
//! Sits between the application and the network for same-origin GET
//! requests. Lifecycle mirrors an installable worker:
//!
//! ```text
//!   Parsed --install()--> Installed --activate()--> Activated
//!      \___________________unregister()_______________/--> Redundant
//! ```
//!
//! `install()` may run on every startup: it only fetches what the current
//! cache lacks and never moves the state backwards.
//!
//! Requests only go through the cache while the worker is `Activated`;
//! otherwise [`AssetWorker::fetch`] talks to the network directly.

use std::path::PathBuf;
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};
use url::{Origin, Url};

use super::error::{AssetError, AssetResult};
use super::fetcher::{AssetRequest, AssetResponse, Fetcher, HttpFetcher};
use super::generation::CacheGeneration;
use super::storage::AssetStorage;
use crate::config::AssetConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Parsed,
    Installed,
    Activated,
    Redundant,
}

/// Outcome of precaching the manifest. One failed asset never stops the rest.
#[derive(Debug, Default)]
pub struct PrecacheReport {
    pub cached: Vec<Url>,
    pub failed: Vec<(Url, AssetError)>,
}

impl PrecacheReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// What the worker decided to do with a request.
#[derive(Debug)]
pub enum Interception {
    /// Not ours; the caller goes to the network untouched.
    Passthrough,
    /// Answered by the worker (from cache, network, or fallback).
    Respond(AssetResult<AssetResponse>),
}

pub struct AssetWorker {
    storage: AssetStorage,
    generation: CacheGeneration,
    origin: Origin,
    base_url: Url,
    manifest: Vec<Url>,
    fetcher: Arc<dyn Fetcher>,
    state: RwLock<WorkerState>,
}

impl AssetWorker {
    pub fn new(
        config: &AssetConfig,
        cache_root: impl Into<PathBuf>,
        fetcher: Arc<dyn Fetcher>,
    ) -> AssetResult<Self> {
        let base_url = config.base_url()?;
        let manifest = config
            .precache
            .iter()
            .map(|path| config.asset_url(path))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            storage: AssetStorage::new(cache_root),
            generation: CacheGeneration::new(&config.cache_prefix, &config.cache_version),
            origin: base_url.origin(),
            base_url,
            manifest,
            fetcher,
            state: RwLock::new(WorkerState::Parsed),
        })
    }

    /// Worker using a plain `reqwest` client.
    pub fn with_http(config: &AssetConfig, cache_root: impl Into<PathBuf>) -> AssetResult<Self> {
        Self::new(config, cache_root, Arc::new(HttpFetcher::default()))
    }

    pub fn generation(&self) -> &CacheGeneration {
        &self.generation
    }

    pub fn storage(&self) -> &AssetStorage {
        &self.storage
    }

    pub fn manifest(&self) -> &[Url] {
        &self.manifest
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a path relative to the deployment root.
    pub fn asset_url(&self, relative: &str) -> AssetResult<Url> {
        Ok(self.base_url.join(relative.trim_start_matches('/'))?)
    }

    pub async fn state(&self) -> WorkerState {
        *self.state.read().await
    }

    pub async fn controls_clients(&self) -> bool {
        self.state().await == WorkerState::Activated
    }

    /// Open the current generation's cache and fetch every manifest asset
    /// it does not hold yet. Entries from an earlier run are kept as is.
    pub async fn install(&self) -> AssetResult<PrecacheReport> {
        info!(cache = %self.generation, assets = self.manifest.len(), "Installing asset worker");
        let cache = self.storage.open(&self.generation.cache_name()).await?;

        let outcomes = join_all(self.manifest.iter().map(|url| {
            let cache = cache.clone();
            async move {
                if matches!(cache.get(url).await, Ok(Some(_))) {
                    debug!(url = %url, "Asset already precached");
                    return Ok(());
                }
                let response = self.fetcher.fetch(&AssetRequest::get(url.clone())).await?;
                if !response.is_success() {
                    return Err(AssetError::Status {
                        url: url.to_string(),
                        status: response.status,
                    });
                }
                cache.put(url, &response).await
            }
        }))
        .await;

        let mut report = PrecacheReport::default();
        for (url, outcome) in self.manifest.iter().zip(outcomes) {
            match outcome {
                Ok(()) => report.cached.push(url.clone()),
                Err(e) => {
                    warn!(url = %url, error = %e, "Failed to precache asset");
                    report.failed.push((url.clone(), e));
                }
            }
        }

        {
            let mut state = self.state.write().await;
            if *state == WorkerState::Parsed {
                *state = WorkerState::Installed;
            }
        }
        info!(
            cached = report.cached.len(),
            failed = report.failed.len(),
            "Asset precache finished"
        );
        Ok(report)
    }

    /// Purge every cache outside the current generation and take control
    /// immediately. Returns the deleted cache names.
    pub async fn activate(&self) -> AssetResult<Vec<String>> {
        info!(cache = %self.generation, "Activating asset worker");
        let existing = self.storage.keys().await?;

        let mut deleted = Vec::new();
        for name in self.generation.stale(existing.iter().map(String::as_str)) {
            info!(cache = name, "Deleting old asset cache");
            if self.storage.delete(name).await? {
                deleted.push(name.to_string());
            }
        }

        *self.state.write().await = WorkerState::Activated;
        Ok(deleted)
    }

    /// Drop every cache and stop intercepting.
    pub async fn unregister(&self) -> AssetResult<()> {
        for name in self.storage.keys().await? {
            self.storage.delete(&name).await?;
        }
        *self.state.write().await = WorkerState::Redundant;
        info!("Asset worker unregistered");
        Ok(())
    }

    /// Whether `request` is handled by the worker at all.
    pub fn intercepts(&self, request: &AssetRequest) -> bool {
        let url = &request.url;
        if url.origin() != self.origin {
            return false;
        }
        if matches!(url.scheme(), "ws" | "wss") {
            return false;
        }
        if is_dev_tooling_path(url.path()) {
            return false;
        }
        request.method == reqwest::Method::GET
    }

    /// Cache-first handling of a single request.
    pub async fn handle(&self, request: &AssetRequest) -> Interception {
        if !self.intercepts(request) {
            return Interception::Passthrough;
        }
        Interception::Respond(self.respond(request).await)
    }

    /// Fetch through the worker when it controls clients, else straight from the network.
    pub async fn fetch(&self, request: &AssetRequest) -> AssetResult<AssetResponse> {
        if self.controls_clients().await {
            if let Interception::Respond(result) = self.handle(request).await {
                return result;
            }
        }
        self.fetcher.fetch(request).await
    }

    async fn respond(&self, request: &AssetRequest) -> AssetResult<AssetResponse> {
        let url = &request.url;

        match self.storage.match_url(url).await {
            Ok(Some(cached)) => {
                debug!(path = url.path(), "Serving from cache");
                return Ok(cached);
            }
            Ok(None) => {}
            Err(e) => warn!(path = url.path(), error = %e, "Asset cache lookup failed"),
        }

        debug!(path = url.path(), "Fetching from network");
        match self.fetcher.fetch(request).await {
            Ok(response) => {
                if response.status == 200 {
                    self.store(url, &response).await;
                }
                Ok(response)
            }
            Err(e) => {
                error!(path = url.path(), error = %e, "Fetch failed (offline)");
                if request.is_navigation() {
                    Ok(self.offline_fallback().await)
                } else {
                    Err(e)
                }
            }
        }
    }

    async fn store(&self, url: &Url, response: &AssetResponse) {
        let result: AssetResult<()> = async {
            let cache = self.storage.open(&self.generation.cache_name()).await?;
            cache.put(url, response).await
        }
        .await;
        if let Err(e) = result {
            warn!(url = %url, error = %e, "Failed to cache response");
        }
    }

    /// Cached index document, then cached root, then a synthesized 503.
    async fn offline_fallback(&self) -> AssetResponse {
        let candidates = [self.base_url.join("index.html").ok(), Some(self.base_url.clone())];
        for url in candidates.into_iter().flatten() {
            match self.storage.match_url(&url).await {
                Ok(Some(response)) => return response,
                Ok(None) => {}
                Err(e) => warn!(url = %url, error = %e, "Fallback lookup failed"),
            }
        }
        AssetResponse::offline()
    }
}

/// Dev-server internals (module graph, HMR endpoints) are never cached.
fn is_dev_tooling_path(path: &str) -> bool {
    path.contains("/@") || path.starts_with("/node_modules/")
}
