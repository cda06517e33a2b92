//! Configuration file parser for `feedwall.toml`.
//!
//! The file is optional; a missing or blank file yields `Config::default()`.
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::feed::DEFAULT_FEED;
use crate::filter::FilterTimings;
use crate::render::{ContentPolicy, DEFAULT_CONTAINER_ID, DEFAULT_EXCERPT, DEFAULT_NEW_BADGE_DAYS};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),

    /// Values parse but contradict each other.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level gallery configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
/// Missing keys fall back to `Default::default()`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Feed location: an http(s) URL or a filesystem path.
    pub feed: String,

    /// Id of the element cards are mounted into.
    pub container_id: String,

    /// Heading and `<title>` of the generated page.
    pub page_title: String,

    /// Articles newer than this many days get the "Nuevo" badge.
    pub new_badge_days: i64,

    /// Delay before a shown card is brought to full opacity.
    pub reveal_delay_ms: u64,

    /// Delay before a hidden card is removed from layout.
    pub collapse_delay_ms: u64,

    /// Escape feed text and validate links instead of trusting the feed.
    pub escape_content: bool,

    /// Excerpt shown for articles without one.
    pub default_excerpt: String,
}

impl Default for Config {
    fn default() -> Self {
        let timings = FilterTimings::default();
        Self {
            feed: DEFAULT_FEED.to_string(),
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            page_title: "Artículos".to_string(),
            new_badge_days: DEFAULT_NEW_BADGE_DAYS,
            reveal_delay_ms: timings.reveal_delay.as_millis() as u64,
            collapse_delay_ms: timings.collapse_delay.as_millis() as u64,
            escape_content: false,
            default_excerpt: DEFAULT_EXCERPT.to_string(),
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 8] = [
        "feed",
        "container_id",
        "page_title",
        "new_badge_days",
        "reveal_delay_ms",
        "collapse_delay_ms",
        "escape_content",
        "default_excerpt",
    ];

    /// Loads `path`, falling back to defaults when the file is missing or
    /// blank. Unknown keys are logged and ignored; a reveal delay that is
    /// not shorter than the collapse delay is rejected.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let size = file.metadata()?.len();
        if size > Self::MAX_FILE_SIZE {
            return Err(ConfigError::TooLarge(format!(
                "{} is {} bytes (max {} bytes)",
                path.display(),
                size,
                Self::MAX_FILE_SIZE
            )));
        }

        let mut content = String::new();
        file.take(Self::MAX_FILE_SIZE).read_to_string(&mut content)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let raw: toml::Table = content.parse()?;
        for key in raw.keys().filter(|k| !Self::KNOWN_KEYS.contains(&k.as_str())) {
            tracing::warn!(key = %key, path = %path.display(), "Ignoring unknown config key");
        }

        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        tracing::info!(path = %path.display(), feed = %config.feed, "Loaded configuration");
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.reveal_delay_ms >= self.collapse_delay_ms {
            return Err(ConfigError::Invalid(format!(
                "reveal_delay_ms ({}) must be shorter than collapse_delay_ms ({})",
                self.reveal_delay_ms, self.collapse_delay_ms
            )));
        }
        Ok(())
    }

    pub fn timings(&self) -> FilterTimings {
        FilterTimings {
            reveal_delay: Duration::from_millis(self.reveal_delay_ms),
            collapse_delay: Duration::from_millis(self.collapse_delay_ms),
        }
    }

    pub fn content_policy(&self) -> ContentPolicy {
        if self.escape_content {
            ContentPolicy::Escaped
        } else {
            ContentPolicy::Trusted
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
