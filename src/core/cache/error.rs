//! Error types for the structured cache store.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    /// The storage backend rejected or failed the operation.
    #[error("Cache backend error: {0}")]
    Backend(String),

    /// The backend could not be opened.
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CacheError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

impl From<sqlx::Error> for CacheError {
    fn from(err: sqlx::Error) -> Self {
        Self::Backend(err.to_string())
    }
}

pub type CacheResult<T> = Result<T, CacheError>;
