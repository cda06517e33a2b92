//! feedwall - filterable article card gallery
//!
//! Loads a static JSON article feed, orders it by publication date and
//! renders one card per article into a view, then wires the filter bar so
//! that clicking a category shows only the matching cards.
//!
//! # Modules
//!
//! - `feed`: loading, decoding, date parsing and ordering
//! - `catalog`: fixed category icon/name tables
//! - `view`: the capability trait the pipeline renders through
//! - `render`: card construction and the headless HTML view
//! - `filter`: filter-button behavior and scheduled card transitions
//! - `gallery`: the view-ready pipeline tying everything together
//! - `config`: optional TOML configuration
//! - `util`: link validation

pub mod catalog;
pub mod config;
pub mod feed;
pub mod filter;
pub mod gallery;
pub mod render;
pub mod util;
pub mod view;

pub use config::{Config, ConfigError};
pub use feed::{Article, ArticleFormat, FeedLoader, FeedSource, FetchError};
pub use filter::{FilterController, FilterTimings};
pub use gallery::{Gallery, GalleryOptions};
pub use render::{CardNode, CardRenderer, ContentPolicy, HtmlView};
pub use view::{ButtonId, CardId, ViewError, ViewPort};
