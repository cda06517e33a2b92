//! Headless [`ViewPort`] backed by an in-memory document.
//!
//! Cards, filter buttons and their inline styles are kept as plain data and
//! serialized to HTML with Maud on demand. Under [`ContentPolicy::Trusted`]
//! feed text is written verbatim, the way a trusted feed is expected to be
//! consumed; [`ContentPolicy::Escaped`] escapes every feed field and
//! neutralizes links with executable schemes.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::catalog::CATALOG;
use crate::filter::FILTER_ALL;
use crate::render::CardNode;
use crate::util::sanitize_link;
use crate::view::{ButtonId, CardId, CardStyle, Display, ViewError, ViewPort, Visual};

/// Id of the element cards are mounted into.
pub const DEFAULT_CONTAINER_ID: &str = "articles-container";

/// How feed-supplied text is written into the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentPolicy {
    /// Feed text is inserted as markup.
    #[default]
    Trusted,
    /// Feed text is escaped and links are validated.
    Escaped,
}

/// A filter button as it exists in the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterButton {
    /// `data-filter`; `None` for a button without the attribute
    pub filter: Option<String>,
    pub label: String,
    pub active: bool,
    pub count: Option<usize>,
}

impl FilterButton {
    pub fn new(filter: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            filter: Some(filter.into()),
            label: label.into(),
            active: false,
            count: None,
        }
    }
}

#[derive(Debug, Clone)]
struct CardElement {
    node: CardNode,
    style: CardStyle,
}

#[derive(Debug, Clone)]
pub struct HtmlView {
    container_id: Option<String>,
    policy: ContentPolicy,
    elements: Vec<CardElement>,
    mounted: Vec<CardId>,
    buttons: Vec<FilterButton>,
}

impl HtmlView {
    /// Empty document with a card container and no filter buttons.
    pub fn new(policy: ContentPolicy) -> Self {
        Self {
            container_id: Some(DEFAULT_CONTAINER_ID.to_string()),
            policy,
            elements: Vec::new(),
            mounted: Vec::new(),
            buttons: Vec::new(),
        }
    }

    /// Document with the standard filter bar: "Todos" plus one button per
    /// catalog category, "Todos" active.
    pub fn with_catalog_filters(policy: ContentPolicy) -> Self {
        let mut all = FilterButton::new(FILTER_ALL, "Todos");
        all.active = true;
        let buttons = std::iter::once(all)
            .chain(CATALOG.iter().map(|e| FilterButton::new(e.key, e.name)))
            .collect();
        Self::new(policy).with_buttons(buttons)
    }

    pub fn with_buttons(mut self, buttons: Vec<FilterButton>) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn with_container_id(mut self, id: impl Into<String>) -> Self {
        self.container_id = Some(id.into());
        self
    }

    /// Document lacking the card container; mounting fails.
    pub fn without_container(mut self) -> Self {
        self.container_id = None;
        self
    }

    pub fn buttons(&self) -> &[FilterButton] {
        &self.buttons
    }

    pub fn button(&self, id: ButtonId) -> Option<&FilterButton> {
        self.buttons.get(id.0)
    }

    /// Button carrying the given `data-filter` value.
    pub fn find_button(&self, filter: &str) -> Option<ButtonId> {
        self.buttons
            .iter()
            .position(|b| b.filter.as_deref() == Some(filter))
            .map(ButtonId)
    }

    pub fn card(&self, id: CardId) -> Option<&CardNode> {
        self.elements.get(id.0).map(|e| &e.node)
    }

    pub fn card_style(&self, id: CardId) -> Option<CardStyle> {
        self.elements.get(id.0).map(|e| e.style)
    }

    /// `data-id` of every mounted card that is not `display: none`, in
    /// document order.
    pub fn displayed_ids(&self) -> Vec<&str> {
        self.mounted
            .iter()
            .filter_map(|id| self.elements.get(id.0))
            .filter(|e| e.style.is_displayed())
            .map(|e| e.node.id.as_str())
            .collect()
    }

    fn text(&self, s: &str) -> Markup {
        match self.policy {
            ContentPolicy::Trusted => PreEscaped(s.to_string()),
            ContentPolicy::Escaped => html! { (s) },
        }
    }

    fn href(&self, link: &str) -> Markup {
        match self.policy {
            ContentPolicy::Trusted => PreEscaped(link.to_string()),
            ContentPolicy::Escaped => html! { (sanitize_link(link).as_ref()) },
        }
    }

    fn render_card(&self, element: &CardElement) -> Markup {
        let node = &element.node;
        html! {
            article class=(node.class_name())
                data-category=(node.category)
                data-id=(node.id)
                style=[style_attribute(&element.style)] {
                @if node.is_new {
                    div class="article-badge" { "Nuevo" }
                }
                div class="article-content" {
                    h3 class="article-title" { (self.text(&node.title)) }
                    div class="article-meta" {
                        span class="article-date" {
                            i class="far fa-calendar-alt" {}
                            " " (self.text(&node.date))
                            @if let Some(location) = &node.location {
                                br;
                                i class="fas fa-map-marker-alt" {}
                                " " (self.text(location))
                            }
                        }
                        span class="article-category" {
                            i class=(node.category_icon) {}
                            " " (node.category_name)
                        }
                    }
                    p class="article-excerpt" { (self.text(&node.excerpt)) }
                    a href=(self.href(&node.link)) target="_blank" rel="noopener noreferrer" class="article-link" {
                        "Leer artículo "
                        i class="fas fa-arrow-right" {}
                        span class="format-indicator" {
                            i class=(format!("fas {}", node.format_icon)) {}
                        }
                    }
                }
            }
        }
    }

    /// Mounted cards.
    pub fn render_cards(&self) -> Markup {
        html! {
            @for id in &self.mounted {
                @if let Some(element) = self.elements.get(id.0) {
                    (self.render_card(element))
                }
            }
        }
    }

    pub fn render_filter_bar(&self) -> Markup {
        html! {
            div class="filter-bar" {
                @for button in &self.buttons {
                    button class=(if button.active { "filter-btn active" } else { "filter-btn" })
                        data-filter=[button.filter.as_deref()] {
                        (button.label)
                        @if let Some(count) = button.count {
                            span class="category-count" { " (" (count) ")" }
                        }
                    }
                }
            }
        }
    }

    /// Complete standalone page.
    pub fn render_page(&self, title: &str) -> String {
        let page = html! {
            (DOCTYPE)
            html lang="es" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { (title) }
                }
                body {
                    h1 { (title) }
                    (self.render_filter_bar())
                    @if let Some(container) = &self.container_id {
                        div id=(container) class="articles-grid" {
                            (self.render_cards())
                        }
                    }
                }
            }
        };
        page.into_string()
    }

    fn element_mut(&mut self, card: CardId) -> Option<&mut CardElement> {
        let element = self.elements.get_mut(card.0);
        if element.is_none() {
            tracing::warn!(card = card.0, "Style change for unknown card ignored");
        }
        element
    }
}

fn style_attribute(style: &CardStyle) -> Option<String> {
    let mut rules = Vec::with_capacity(3);
    match style.display {
        Some(Display::Flex) => rules.push("display: flex"),
        Some(Display::None) => rules.push("display: none"),
        None => {}
    }
    match style.visual {
        Some(Visual::Shown) => rules.extend(["opacity: 1", "transform: translateY(0)"]),
        Some(Visual::Faded) => rules.extend(["opacity: 0", "transform: translateY(20px)"]),
        None => {}
    }
    if rules.is_empty() {
        None
    } else {
        Some(rules.join("; "))
    }
}

impl ViewPort for HtmlView {
    fn create_card(&mut self, node: &CardNode) -> CardId {
        self.elements.push(CardElement {
            node: node.clone(),
            style: CardStyle::default(),
        });
        CardId(self.elements.len() - 1)
    }

    fn mount(&mut self, cards: &[CardId]) -> Result<(), ViewError> {
        let Some(container) = &self.container_id else {
            return Err(ViewError::MissingContainer(DEFAULT_CONTAINER_ID.to_string()));
        };
        if let Some(unknown) = cards.iter().find(|id| id.0 >= self.elements.len()) {
            return Err(ViewError::UnknownCard(*unknown));
        }
        tracing::trace!(container = %container, cards = cards.len(), "Replacing container content");
        self.mounted = cards.to_vec();
        Ok(())
    }

    fn query_filter_buttons(&self) -> Vec<ButtonId> {
        (0..self.buttons.len()).map(ButtonId).collect()
    }

    fn query_cards(&self) -> Vec<CardId> {
        self.mounted.clone()
    }

    fn card_category(&self, card: CardId) -> Option<&str> {
        self.elements.get(card.0).map(|e| e.node.category.as_str())
    }

    fn filter_value(&self, button: ButtonId) -> Option<&str> {
        self.buttons.get(button.0)?.filter.as_deref()
    }

    fn set_active(&mut self, button: ButtonId, active: bool) {
        if let Some(b) = self.buttons.get_mut(button.0) {
            b.active = active;
        }
    }

    fn append_count(&mut self, button: ButtonId, count: usize) {
        if let Some(b) = self.buttons.get_mut(button.0) {
            b.count = Some(count);
        }
    }

    fn set_display(&mut self, card: CardId, display: Display) {
        if let Some(e) = self.element_mut(card) {
            e.style.display = Some(display);
        }
    }

    fn set_visual(&mut self, card: CardId, visual: Visual) {
        if let Some(e) = self.element_mut(card) {
            e.style.visual = Some(visual);
        }
    }
}
