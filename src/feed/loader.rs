use futures::StreamExt;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

use super::types::{decode_feed, Article, DecodedFeed};

const MAX_FEED_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Feed path used when nothing else is configured.
pub const DEFAULT_FEED: &str = "articles26.json";

/// Errors that can occur while loading the article feed.
///
/// Every variant is recovered by the gallery pipeline through its fallback;
/// none of them reaches the user.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Local feed file could not be read
    #[error("Failed to read feed file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Body is not a JSON document with an `articles` array
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
    /// Response body exceeded the 10MB size limit
    #[error("Response too large")]
    ResponseTooLarge,
}

/// Where the feed document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Remote(Url),
    Local(PathBuf),
}

impl FromStr for FeedSource {
    type Err = url::ParseError;

    /// `http://` and `https://` strings are fetched over the network;
    /// anything else is treated as a filesystem path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim_start().to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(FeedSource::Remote(Url::parse(s.trim())?))
        } else {
            Ok(FeedSource::Local(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedSource::Remote(url) => write!(f, "{}", url),
            FeedSource::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

impl Default for FeedSource {
    fn default() -> Self {
        FeedSource::Local(PathBuf::from(DEFAULT_FEED))
    }
}

/// Retrieves and decodes the article feed in a single attempt.
#[derive(Debug, Clone)]
pub struct FeedLoader {
    client: reqwest::Client,
    source: FeedSource,
}

impl FeedLoader {
    pub fn new(source: FeedSource) -> Self {
        Self {
            client: reqwest::Client::new(),
            source,
        }
    }

    pub fn source(&self) -> &FeedSource {
        &self.source
    }

    /// Fetches the feed and decodes its `articles` array.
    ///
    /// No retries and no timeout: a failed attempt is reported immediately so
    /// the caller can switch to its fallback.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Network`] - Connection or TLS errors
    /// - [`FetchError::HttpStatus`] - Non-2xx HTTP response
    /// - [`FetchError::ResponseTooLarge`] - Body exceeded 10MB
    /// - [`FetchError::Io`] - Local file missing or unreadable
    /// - [`FetchError::Decode`] - Invalid JSON or no `articles` array
    pub async fn load(&self) -> Result<DecodedFeed, FetchError> {
        let bytes = match &self.source {
            FeedSource::Remote(url) => self.fetch_remote(url).await?,
            FeedSource::Local(path) => {
                tokio::fs::read(path).await.map_err(|source| FetchError::Io {
                    path: path.clone(),
                    source,
                })?
            }
        };

        let decoded = decode_feed(&bytes)?;
        tracing::debug!(
            source = %self.source,
            articles = decoded.articles.len(),
            malformed = decoded.malformed.len(),
            "Feed decoded"
        );
        Ok(decoded)
    }

    async fn fetch_remote(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status().as_u16()));
        }

        read_limited_bytes(response, MAX_FEED_SIZE).await
    }
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len > limit as u64 {
            return Err(FetchError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}

/// Source of articles used when the feed cannot be loaded.
pub trait Fallback {
    fn load_default_articles(&self) -> Vec<Article>;
}

/// Fallback that shows nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyFallback;

impl Fallback for EmptyFallback {
    fn load_default_articles(&self) -> Vec<Article> {
        tracing::info!("Loading default articles (none configured)");
        Vec::new()
    }
}

/// Fallback backed by a prepared article list.
#[derive(Debug, Clone, Default)]
pub struct FixedFallback(pub Vec<Article>);

impl Fallback for FixedFallback {
    fn load_default_articles(&self) -> Vec<Article> {
        tracing::info!(articles = self.0.len(), "Loading default articles");
        self.0.clone()
    }
}
