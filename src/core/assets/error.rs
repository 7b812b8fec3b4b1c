//! Error types for the network asset cache.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    /// The request never produced a response (offline, DNS, refused).
    #[error("Network error: {0}")]
    Network(String),

    /// A response arrived but is not usable for the operation.
    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid cache name: {0}")]
    InvalidCacheName(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AssetError {
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }
}

impl From<reqwest::Error> for AssetError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

pub type AssetResult<T> = Result<T, AssetError>;
