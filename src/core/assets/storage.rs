//! On-disk named caches for asset responses.
//!
//! Layout: one directory per named cache under the storage root, and per
//! stored URL a `<hash>.json` metadata file plus a `<hash>.body` payload.
//! The hash is the first 16 bytes of SHA-256 over the URL, hex encoded.
//! Both files are written to a `.tmp-*` sibling and renamed into place.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::fs;
use tracing::debug;
use url::Url;

use super::error::{AssetError, AssetResult};
use super::fetcher::AssetResponse;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredMeta {
    url: String,
    status: u16,
    content_type: Option<String>,
    stored_at: DateTime<Utc>,
}

fn entry_key(url: &Url) -> String {
    let digest = Sha256::digest(url.as_str().as_bytes());
    hex::encode(&digest[..16])
}

fn is_not_found(err: &std::io::Error) -> bool {
    err.kind() == std::io::ErrorKind::NotFound
}

/// Root of all named caches.
#[derive(Debug, Clone)]
pub struct AssetStorage {
    root: PathBuf,
}

impl AssetStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Open a named cache, creating it when missing.
    pub async fn open(&self, name: &str) -> AssetResult<NamedCache> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(AssetError::InvalidCacheName(name.to_string()));
        }
        let dir = self.root.join(name);
        fs::create_dir_all(&dir).await?;
        Ok(NamedCache {
            name: name.to_string(),
            dir,
        })
    }

    /// Names of all existing caches, sorted.
    pub async fn keys(&self) -> AssetResult<Vec<String>> {
        let mut names = Vec::new();
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if is_not_found(&e) => return Ok(names),
            Err(e) => return Err(e.into()),
        };
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Delete a named cache. Returns whether it existed.
    pub async fn delete(&self, name: &str) -> AssetResult<bool> {
        match fs::remove_dir_all(self.root.join(name)).await {
            Ok(()) => Ok(true),
            Err(e) if is_not_found(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Look `url` up across every cache, in name order.
    pub async fn match_url(&self, url: &Url) -> AssetResult<Option<AssetResponse>> {
        for name in self.keys().await? {
            let cache = NamedCache {
                dir: self.root.join(&name),
                name,
            };
            if let Some(response) = cache.get(url).await? {
                return Ok(Some(response));
            }
        }
        Ok(None)
    }
}

/// A single named cache directory.
#[derive(Debug, Clone)]
pub struct NamedCache {
    name: String,
    dir: PathBuf,
}

impl NamedCache {
    fn paths(&self, url: &Url) -> (PathBuf, PathBuf) {
        let key = entry_key(url);
        (
            self.dir.join(format!("{key}.json")),
            self.dir.join(format!("{key}.body")),
        )
    }

    /// Store `response` for `url`, replacing any previous entry.
    pub async fn put(&self, url: &Url, response: &AssetResponse) -> AssetResult<()> {
        let (meta_path, body_path) = self.paths(url);
        let meta = StoredMeta {
            url: url.to_string(),
            status: response.status,
            content_type: response.content_type.clone(),
            stored_at: Utc::now(),
        };
        // Readers only ever see whole files; body lands before its metadata.
        self.replace(&body_path, &response.body).await?;
        self.replace(&meta_path, &serde_json::to_vec(&meta)?).await?;
        debug!(cache = %self.name, url = %url, "Stored asset");
        Ok(())
    }

    /// Write `contents` to a temp file next to `target`, then rename it over `target`.
    async fn replace(&self, target: &Path, contents: &[u8]) -> AssetResult<()> {
        let tmp = self.dir.join(format!(".tmp-{:016x}", rand::random::<u64>()));
        if let Err(e) = fs::write(&tmp, contents).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&tmp, target).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }

    pub async fn get(&self, url: &Url) -> AssetResult<Option<AssetResponse>> {
        let (meta_path, body_path) = self.paths(url);
        let meta_bytes = match fs::read(&meta_path).await {
            Ok(bytes) => bytes,
            Err(e) if is_not_found(&e) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let meta: StoredMeta = serde_json::from_slice(&meta_bytes)?;
        if meta.url != url.as_str() {
            return Ok(None);
        }
        let body = match fs::read(&body_path).await {
            Ok(body) => body,
            Err(e) if is_not_found(&e) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(AssetResponse {
            status: meta.status,
            content_type: meta.content_type,
            body: Bytes::from(body),
        }))
    }

    pub async fn delete(&self, url: &Url) -> AssetResult<bool> {
        let (meta_path, body_path) = self.paths(url);
        let existed = match fs::remove_file(&meta_path).await {
            Ok(()) => true,
            Err(e) if is_not_found(&e) => false,
            Err(e) => return Err(e.into()),
        };
        if let Err(e) = fs::remove_file(&body_path).await {
            if !is_not_found(&e) {
                return Err(e.into());
            }
        }
        Ok(existed)
    }
}
