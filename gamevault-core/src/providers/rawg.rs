//! Cover art lookup against the RAWG video game database.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use super::{ImageLookup, ProviderError};

pub const DEFAULT_RAWG_BASE_URL: &str = "https://api.rawg.io/api";
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct RawgConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl std::fmt::Debug for RawgConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawgConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for RawgConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_RAWG_BASE_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    background_image: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RawgImageLookup {
    client: Client,
    config: RawgConfig,
}

impl RawgImageLookup {
    pub fn new(config: RawgConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("gamevault/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, config })
    }

    /// `{base}/games?key=..&search=..&page_size=1`
    pub fn search_url(&self, name: &str) -> Result<Url, ProviderError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ProviderError::NotConfigured("missing RAWG API key".to_string()))?;

        let endpoint = format!("{}/games", self.config.base_url.trim_end_matches('/'));
        Url::parse_with_params(
            &endpoint,
            &[("key", api_key), ("search", name), ("page_size", "1")],
        )
        .map_err(|e| ProviderError::NotConfigured(format!("invalid RAWG base URL: {e}")))
    }
}

#[async_trait]
impl ImageLookup for RawgImageLookup {
    async fn cover_image(&self, name: &str) -> Result<Option<String>, ProviderError> {
        let url = self.search_url(name)?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, game = name, "RAWG search returned an error status");
            return Err(ProviderError::ApiError(format!(
                "RAWG responded with {status}"
            )));
        }

        let body = response.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let image = parsed
            .results
            .into_iter()
            .next()
            .and_then(|result| result.background_image)
            .filter(|url| !url.is_empty());

        debug!(game = name, found = image.is_some(), "RAWG cover lookup finished");
        Ok(image)
    }
}
