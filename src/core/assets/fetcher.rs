//! Requests, responses and the network seam.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use url::Url;

use super::error::{AssetError, AssetResult};

/// How the request was initiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    /// Top-level page load; gets an offline fallback page on network failure.
    Navigate,
    /// Anything else (data files, scripts, images).
    Subresource,
}

#[derive(Debug, Clone)]
pub struct AssetRequest {
    pub url: Url,
    pub method: Method,
    pub mode: RequestMode,
}

impl AssetRequest {
    pub fn get(url: Url) -> Self {
        Self {
            url,
            method: Method::GET,
            mode: RequestMode::Subresource,
        }
    }

    pub fn navigate(url: Url) -> Self {
        Self {
            url,
            method: Method::GET,
            mode: RequestMode::Navigate,
        }
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn is_navigation(&self) -> bool {
        self.mode == RequestMode::Navigate
    }
}

/// A fully buffered response. Cloning shares the body.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl AssetResponse {
    pub fn new(status: u16, content_type: Option<String>, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            content_type,
            body: body.into(),
        }
    }

    /// Synthesized reply for a navigation that could not be served at all.
    pub fn offline() -> Self {
        Self::new(
            503,
            Some("text/plain".to_string()),
            "Offline: please check your network connection",
        )
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> AssetResult<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Performs the actual network round trip.
///
/// A non-success status is still a response; only transport failures are
/// errors.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, request: &AssetRequest) -> AssetResult<AssetResponse>;
}

/// `reqwest`-backed fetcher.
#[derive(Clone, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: &AssetRequest) -> AssetResult<AssetResponse> {
        let response = self
            .client
            .request(request.method.clone(), request.url.clone())
            .send()
            .await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.map_err(AssetError::from)?;

        Ok(AssetResponse {
            status,
            content_type,
            body,
        })
    }
}
