use super::{KvStore, NewsletterError};
use crate::retry::{with_retry_if, RetryConfig};
use anyhow::{Context, Result};
use std::time::Duration;
use url::Url;

/// HTTP client for the key-value store.
///
/// Values are written with `PUT <endpoint>/buckets/<bucket>/keys/<key>`.
#[derive(Debug, Clone)]
pub struct KvClient {
    client: reqwest::Client,
    endpoint: Url,
    api_key: Option<String>,
    retry: RetryConfig,
}

impl KvClient {
    pub fn new(endpoint: &str, api_key: Option<&str>) -> Result<Self> {
        let endpoint =
            Url::parse(endpoint).with_context(|| format!("Invalid STORAGE_CLIENT URL: {}", endpoint))?;
        if endpoint.cannot_be_a_base() {
            anyhow::bail!("STORAGE_CLIENT must be a hierarchical URL: {}", endpoint);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build key-value store HTTP client")?;

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.map(str::to_string),
            retry: RetryConfig::storage_write(),
        })
    }

    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// URL of `key` in `bucket`; both are percent-encoded as path segments.
    pub fn key_url(&self, bucket: &str, key: &str) -> Url {
        let mut url = self.endpoint.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["buckets", bucket, "keys", key]);
        }
        url
    }

    async fn put_once(&self, url: &Url, value: &str) -> Result<(), NewsletterError> {
        let mut request = self
            .client
            .put(url.clone())
            .header("Content-Type", "application/json")
            .body(value.to_string());

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| NewsletterError::Storage {
            status: None,
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NewsletterError::Storage {
                status: Some(status.as_u16()),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        Ok(())
    }
}

impl KvStore for KvClient {
    async fn create(&self, bucket: &str, key: &str, value: &str) -> Result<(), NewsletterError> {
        let url = self.key_url(bucket, key);

        with_retry_if(
            &self.retry,
            "KV store write",
            || self.put_once(&url, value),
            NewsletterError::is_transient,
        )
        .await
    }
}
