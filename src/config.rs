use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::core::lexicon::dictionary::DICTIONARY_NAMES;
use crate::core::similarity::SIMILARITY_TABLE_PATH;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub assets: AssetConfig,
    pub cache: CacheConfig,
    pub association: AssociationConfig,
}

/// Data directory configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory.
    pub data_dir: Option<PathBuf>,
}

/// Where static assets come from and how the asset cache is named.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Scheme + host (+ port) the assets are served from.
    pub origin: String,
    /// Path prefix of the deployment, with leading and trailing slash.
    pub base_path: String,
    /// Name prefix shared by every generation of the asset cache.
    pub cache_prefix: String,
    /// Bump whenever the manifest or caching rules change.
    pub cache_version: String,
    /// Asset paths, relative to `base_path`, fetched at install time.
    pub precache: Vec<String>,
}

/// Structured cache store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Entries older than this many days are treated as absent.
    pub ttl_days: u32,
}

/// Tuning for the association engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssociationConfig {
    /// Delay before a semantic lookup is issued for a new selection.
    pub debounce_ms: u64,
    /// Maximum semantic neighbours taken from the similarity table.
    pub semantic_limit: usize,
    /// Maximum spelling neighbours, in lexicon order.
    pub spelling_limit: usize,
    pub max_spelling_distance: usize,
    pub max_length_difference: usize,
    /// Candidate words shorter than this never count as spelling neighbours.
    pub min_spelling_length: usize,
}

impl Default for AssetConfig {
    fn default() -> Self {
        let mut precache = vec![
            String::new(),
            "index.html".to_string(),
            SIMILARITY_TABLE_PATH.to_string(),
        ];
        precache.extend(DICTIONARY_NAMES.iter().map(|name| format!("json/{name}.json")));

        Self {
            origin: "http://localhost:5173".to_string(),
            base_path: "/word-ocean/".to_string(),
            cache_prefix: "word-ocean-cache".to_string(),
            cache_version: "v1".to_string(),
            precache,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_days: 7 }
    }
}

impl Default for AssociationConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 100,
            semantic_limit: 10,
            spelling_limit: 8,
            max_spelling_distance: 2,
            max_length_difference: 1,
            min_spelling_length: 4,
        }
    }
}

impl AssetConfig {
    /// Absolute URL of the deployment root, e.g. `http://localhost:5173/word-ocean/`.
    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        let mut base_path = self.base_path.clone();
        if !base_path.starts_with('/') {
            base_path.insert(0, '/');
        }
        if !base_path.ends_with('/') {
            base_path.push('/');
        }
        Url::parse(&self.origin)?.join(&base_path)
    }

    /// Resolve an asset path relative to the deployment root.
    pub fn asset_url(&self, relative: &str) -> Result<Url, url::ParseError> {
        self.base_url()?.join(relative.trim_start_matches('/'))
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.ttl_days))
    }
}

impl AssociationConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/word-ocean/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, with the same fallback rules as [`load`](Self::load).
    pub fn load_from(config_path: &Path) -> Self {
        match std::fs::read_to_string(config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e}, using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {}, using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("word-ocean"))
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir().join("logs")
    }

    pub fn asset_cache_dir(&self) -> PathBuf {
        self.data_dir().join("asset-cache")
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("word-ocean").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
