use crate::models::{LegacyRecord, MaterialDetail, MaterialIndex};
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::{env, fmt};

pub const DEFAULT_BASE_URL: &str =
    "https://raw.githubusercontent.com/Echony/echony-data-storage/main";

pub fn resolve_base_url() -> String {
    env::var("DATA_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

pub fn resolve_legacy_url(base_url: &str) -> String {
    env::var("LEGACY_DATA_URL").unwrap_or_else(|_| format!("{base_url}/data.json"))
}

/// Failure of one remote fetch. A 404 stays recognizable so an id search can
/// be answered with "not found" rather than a gateway error.
#[derive(Debug)]
pub enum SourceError {
    Request {
        url: String,
        source: reqwest::Error,
    },
    Status {
        url: String,
        status: StatusCode,
    },
    Decode {
        url: String,
        source: serde_json::Error,
    },
}

impl SourceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request { url, source } => write!(f, "request to {url} failed: {source}"),
            Self::Status { url, status } => write!(f, "{url} returned {status}"),
            Self::Decode { url, source } => write!(f, "invalid JSON from {url}: {source}"),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Request { source, .. } => Some(source),
            Self::Status { .. } => None,
            Self::Decode { source, .. } => Some(source),
        }
    }
}

/// Read-only client for the remote static host: an index document plus one
/// detail document per material id, and the flat legacy feed.
#[derive(Clone)]
pub struct MaterialSource {
    client: Client,
    base_url: String,
    legacy_url: String,
}

impl MaterialSource {
    pub fn new(base_url: String, legacy_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            legacy_url,
        }
    }

    pub async fn fetch_index(&self) -> Result<MaterialIndex, SourceError> {
        self.fetch_json(format!("{}/data/index.json", self.base_url))
            .await
    }

    pub async fn fetch_detail(&self, id: &str) -> Result<MaterialDetail, SourceError> {
        self.fetch_json(format!("{}/data/ids/{id}.json", self.base_url))
            .await
    }

    /// The legacy feed sits behind a CDN; the millisecond timestamp query
    /// defeats its cache.
    pub async fn fetch_legacy(&self) -> Result<Vec<LegacyRecord>, SourceError> {
        let url = format!("{}?{}", self.legacy_url, Utc::now().timestamp_millis());
        self.fetch_json(url).await
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: String) -> Result<T, SourceError> {
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| SourceError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status { url, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| SourceError::Request {
                url: url.clone(),
                source,
            })?;
        serde_json::from_slice(&body).map_err(|source| SourceError::Decode { url, source })
    }
}
