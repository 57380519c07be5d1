pub mod rawg;

use async_trait::async_trait;

pub use rawg::{RawgConfig, RawgImageLookup};

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Image lookup is not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Resolves a cover image URL for a game title.
#[async_trait]
pub trait ImageLookup: Send + Sync {
    /// The best match's image URL, or `None` when nothing matched.
    async fn cover_image(&self, name: &str) -> Result<Option<String>, ProviderError>;
}
