//! Card construction and the headless HTML view.
//!
//! - [`card`] - `CardRenderer` turns ordered articles into `CardNode`s and
//!   mounts them through any [`ViewPort`](crate::view::ViewPort)
//! - [`html`] - `HtmlView`, an in-memory document rendered with Maud

mod card;
mod html;

pub use card::{CardNode, CardRenderer, DEFAULT_EXCERPT, DEFAULT_NEW_BADGE_DAYS};
pub use html::{ContentPolicy, FilterButton, HtmlView, DEFAULT_CONTAINER_ID};
