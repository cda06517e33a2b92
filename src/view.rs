//! Capability interface between the gallery pipeline and a document view.
//!
//! The pipeline never touches a concrete document. It creates cards, mounts
//! them, looks up filter buttons and cards, and requests style changes
//! through [`ViewPort`]. Handles are opaque indices owned by the view.

use thiserror::Error;

use crate::render::CardNode;

/// Handle to a card element created by a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub usize);

/// Handle to a filter button present in a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ButtonId(pub usize);

/// Layout state of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    Flex,
    None,
}

/// Transition target for a card's opacity and vertical offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visual {
    /// Fully opaque, resting position.
    Shown,
    /// Transparent, shifted down 20px.
    Faded,
}

/// Inline style of a card. `None` fields are left to the stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CardStyle {
    pub display: Option<Display>,
    pub visual: Option<Visual>,
}

impl CardStyle {
    /// Whether the card takes part in layout.
    pub fn is_displayed(&self) -> bool {
        self.display != Some(Display::None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("Container '#{0}' not found")]
    MissingContainer(String),

    #[error("Unknown card handle {0:?}")]
    UnknownCard(CardId),
}

/// Operations the gallery needs from a document.
pub trait ViewPort {
    /// Creates a detached card element for `node`.
    fn create_card(&mut self, node: &CardNode) -> CardId;

    /// Replaces the container's content with `cards`, in order.
    fn mount(&mut self, cards: &[CardId]) -> Result<(), ViewError>;

    /// Filter buttons in document order.
    fn query_filter_buttons(&self) -> Vec<ButtonId>;

    /// Mounted cards in document order.
    fn query_cards(&self) -> Vec<CardId>;

    /// The card's `data-category` attribute.
    fn card_category(&self, card: CardId) -> Option<&str>;

    /// The button's `data-filter` attribute.
    fn filter_value(&self, button: ButtonId) -> Option<&str>;

    fn set_active(&mut self, button: ButtonId, active: bool);

    /// Appends a ` (count)` badge to the button label.
    fn append_count(&mut self, button: ButtonId, count: usize);

    fn set_display(&mut self, card: CardId, display: Display);

    fn set_visual(&mut self, card: CardId, visual: Visual);
}
