//! Filter-bar behavior.
//!
//! - [`controller`] - binds filter buttons, shows and hides cards, labels
//!   buttons with per-category counts
//! - [`timeline`] - pending card transitions keyed by card, replaced on
//!   every click

mod controller;
mod timeline;

pub use controller::{category_counts, display_stats, FilterController, FilterTimings, FILTER_ALL};
pub use timeline::{Step, Timeline};
