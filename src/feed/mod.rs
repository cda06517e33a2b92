//! Article feed loading and normalization.
//!
//! - [`loader`] - single-attempt retrieval from a URL or local file, plus the
//!   fallback used when that fails
//! - [`types`] - the `Article` record and lenient per-entry decoding
//! - [`date`] - parser for Spanish long dates ("13 de enero 2026")
//! - [`ordering`] - newest-first stable ordering
//!
//! # Example
//!
//! ```ignore
//! use feedwall::feed::{order, FeedLoader};
//!
//! let decoded = FeedLoader::new("articles26.json".parse()?).load().await?;
//! let articles = order(decoded.articles);
//! ```

pub mod date;
mod loader;
mod ordering;
mod types;

pub use date::{parse_date, FLOOR_DATE};
pub use loader::{
    EmptyFallback, Fallback, FeedLoader, FeedSource, FetchError, FixedFallback, DEFAULT_FEED,
};
pub use ordering::order;
pub use types::{decode_feed, Article, ArticleFormat, DecodedFeed, MalformedArticle};
