// src/utils/http.rs

//! HTTP client utilities and the remote fetch seam.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::Result;
use crate::models::ApiConfig;

/// A single request against a named upstream resource.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET `path` with the given query pairs and return the decoded JSON document.
    async fn fetch(&self, path: &str, query: &[(&str, String)]) -> Result<Value>;
}

/// Fetch a resource and decode it into `T`.
pub async fn fetch_as<T: DeserializeOwned>(
    fetcher: &dyn Fetcher,
    path: &str,
    query: &[(&str, String)],
) -> Result<T> {
    let document = fetcher.fetch(path, query).await?;
    Ok(serde_json::from_value(document)?)
}

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &ApiConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(config.user_agent())
        .timeout(config.timeout())
        .build()?;
    Ok(client)
}

/// [`Fetcher`] backed by a reqwest client and a base URL.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpFetcher {
    /// Build a fetcher from API settings.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = create_async_client(config)?;
        Self::with_client(client, &config.base_url)
    }

    /// Use an existing client. A missing trailing slash on `base_url` is added
    /// so that resource paths resolve below it.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self> {
        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        Ok(Self {
            client,
            base_url: Url::parse(&base)?,
        })
    }

    /// Full URL for a resource path and its query pairs.
    pub fn resource_url(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        let mut url = self.base_url.join(path.trim_start_matches('/'))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = self.resource_url(path, query)?;
        log::debug!("GET {}", url);
        let text = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(serde_json::from_str(&text)?)
    }
}
