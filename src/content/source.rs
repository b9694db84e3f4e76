//! Where locale datasets come from.
//!
//! The loader only needs "give me the document for locale X, dataset Y";
//! the `DataSource` trait is that capability. Two implementations ship with
//! the crate: a directory of JSON files laid out as `<root>/<locale>/<dataset>.json`
//! and an HTTP content store exposing the same layout.

use crate::config::{Config, DataSourceKind};
use crate::content::Dataset;
use crate::i18n::Locale;
use crate::retry::{with_retry_if, RetryConfig};
use anyhow::{Context, Result};
use serde_json::Value;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request to {url} failed: {message}")]
    Http {
        url: String,
        status: Option<u16>,
        message: String,
    },

    #[error("invalid document {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SourceError {
    /// Network errors and 5xx responses may succeed on a later attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            SourceError::Http { status: None, .. } => true,
            SourceError::Http {
                status: Some(code), ..
            } => *code >= 500,
            _ => false,
        }
    }
}

/// Capability that fetches the raw document for `(locale, dataset)`.
pub trait DataSource: Send + Sync {
    fn fetch(
        &self,
        locale: Locale,
        dataset: Dataset,
    ) -> impl Future<Output = Result<Value, SourceError>> + Send;
}

/// Reads `<root>/<locale>/<dataset>.json` from disk on every call.
#[derive(Debug, Clone)]
pub struct FsDataSource {
    root: PathBuf,
}

impl FsDataSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, locale: Locale, dataset: Dataset) -> PathBuf {
        self.root.join(locale.code()).join(dataset.file_name())
    }
}

impl DataSource for FsDataSource {
    async fn fetch(&self, locale: Locale, dataset: Dataset) -> Result<Value, SourceError> {
        let path = self.path_for(locale, dataset);
        debug!("Reading {} data for '{}' from {}", dataset, locale, path.display());

        let bytes = tokio::fs::read(&path).await.map_err(|source| SourceError::Io {
            path: path.clone(),
            source,
        })?;

        serde_json::from_slice(&bytes).map_err(|source| SourceError::Parse {
            origin: path.display().to_string(),
            source,
        })
    }
}

/// Fetches `<base_url>/<locale>/<dataset>.json` from a content store.
#[derive(Debug, Clone)]
pub struct HttpDataSource {
    client: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
}

impl HttpDataSource {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build content store HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry: RetryConfig::content_fetch(),
        })
    }

    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn url_for(&self, locale: Locale, dataset: Dataset) -> String {
        format!("{}/{}/{}", self.base_url, locale.code(), dataset.file_name())
    }

    async fn fetch_once(&self, url: &str) -> Result<Value, SourceError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Http {
                url: url.to_string(),
                status: None,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Http {
                url: url.to_string(),
                status: Some(status.as_u16()),
                message: format!("HTTP {}", status),
            });
        }

        let body = response.bytes().await.map_err(|e| SourceError::Http {
            url: url.to_string(),
            status: None,
            message: format!("failed to read body: {}", e),
        })?;

        serde_json::from_slice(&body).map_err(|source| SourceError::Parse {
            origin: url.to_string(),
            source,
        })
    }
}

impl DataSource for HttpDataSource {
    async fn fetch(&self, locale: Locale, dataset: Dataset) -> Result<Value, SourceError> {
        let url = self.url_for(locale, dataset);
        let operation = format!("Content {}/{}", locale, dataset);

        with_retry_if(
            &self.retry,
            &operation,
            || self.fetch_once(&url),
            SourceError::is_transient,
        )
        .await
    }
}

/// The data source selected by configuration at start-up.
#[derive(Debug, Clone)]
pub enum ContentSource {
    Fs(FsDataSource),
    Http(HttpDataSource),
}

impl ContentSource {
    /// Pick the source named by `DATA_SOURCE`.
    pub fn from_config(config: &Config) -> Result<Self> {
        match config.data_source {
            DataSourceKind::Fs => {
                info!("Reading content from directory {}", config.data_dir);
                Ok(ContentSource::Fs(FsDataSource::new(&config.data_dir)))
            }
            DataSourceKind::Http => {
                let base = config
                    .content_base_url
                    .as_deref()
                    .context("CONTENT_BASE_URL not set")?;
                info!("Reading content from {}", base);
                Ok(ContentSource::Http(HttpDataSource::new(base)?))
            }
        }
    }
}

impl DataSource for ContentSource {
    async fn fetch(&self, locale: Locale, dataset: Dataset) -> Result<Value, SourceError> {
        match self {
            ContentSource::Fs(source) => source.fetch(locale, dataset).await,
            ContentSource::Http(source) => source.fetch(locale, dataset).await,
        }
    }
}
