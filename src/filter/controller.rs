use std::collections::BTreeMap;
use std::time::Duration;
use tokio::time::Instant;

use super::timeline::{Step, Timeline};
use crate::feed::Article;
use crate::view::{ButtonId, CardId, Display, ViewPort, Visual};

/// Filter value that matches every card.
pub const FILTER_ALL: &str = "all";

/// Delays for the second phase of card transitions.
///
/// `reveal_delay` must stay shorter than `collapse_delay` so a card shown by
/// a quick second click finishes its reveal before anything else lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterTimings {
    pub reveal_delay: Duration,
    pub collapse_delay: Duration,
}

impl Default for FilterTimings {
    fn default() -> Self {
        Self {
            reveal_delay: Duration::from_millis(10),
            collapse_delay: Duration::from_millis(300),
        }
    }
}

/// Number of articles per category key over the whole, unfiltered set.
/// Articles without a category are not counted.
pub fn category_counts(articles: &[Article]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for category in articles.iter().filter_map(|a| a.category.as_deref()) {
        *counts.entry(category.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Appends a count badge to every category button whose category occurs.
/// The `all` button and categories without articles get no badge.
pub fn display_stats<V: ViewPort>(
    view: &mut V,
    buttons: &[ButtonId],
    counts: &BTreeMap<String, usize>,
) {
    for &button in buttons {
        let count = match view.filter_value(button) {
            Some(FILTER_ALL) | None => continue,
            Some(filter) => counts.get(filter).copied().unwrap_or(0),
        };
        if count > 0 {
            view.append_count(button, count);
        }
    }
}

/// Filter-bar behavior over the cards present at setup time.
#[derive(Debug)]
pub struct FilterController {
    buttons: Vec<ButtonId>,
    cards: Vec<CardId>,
    counts: BTreeMap<String, usize>,
    active: Option<ButtonId>,
    timings: FilterTimings,
    timeline: Timeline,
}

impl FilterController {
    /// Binds the filter buttons and cards currently in `view` and labels the
    /// buttons with per-category counts. Counts are not recomputed later.
    pub fn setup<V: ViewPort>(view: &mut V, articles: &[Article], timings: FilterTimings) -> Self {
        let buttons = view.query_filter_buttons();
        let cards = view.query_cards();
        let counts = category_counts(articles);

        display_stats(view, &buttons, &counts);
        tracing::debug!(
            buttons = buttons.len(),
            cards = cards.len(),
            categories = counts.len(),
            "Filters bound"
        );

        Self {
            buttons,
            cards,
            counts,
            active: None,
            timings,
            timeline: Timeline::new(),
        }
    }

    pub fn counts(&self) -> &BTreeMap<String, usize> {
        &self.counts
    }

    /// Button activated by the most recent click.
    pub fn active(&self) -> Option<ButtonId> {
        self.active
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Handles a click on `button`.
    ///
    /// Matching cards are put back into layout at once and revealed after
    /// `reveal_delay`; the others fade at once and leave layout after
    /// `collapse_delay`. Returns `false` for buttons not bound at setup.
    pub fn click<V: ViewPort>(&mut self, view: &mut V, button: ButtonId, now: Instant) -> bool {
        if !self.buttons.contains(&button) {
            tracing::debug!(button = button.0, "Click on unbound button ignored");
            return false;
        }

        for &b in &self.buttons {
            view.set_active(b, false);
        }
        view.set_active(button, true);
        self.active = Some(button);

        let filter = view.filter_value(button).map(str::to_owned);
        let mut shown = 0usize;

        for &card in &self.cards {
            let matches = match filter.as_deref() {
                Some(FILTER_ALL) => true,
                Some(f) => view.card_category(card) == Some(f),
                None => false,
            };

            if matches {
                view.set_display(card, Display::Flex);
                self.timeline
                    .schedule(card, now + self.timings.reveal_delay, Step::Reveal);
                shown += 1;
            } else {
                view.set_visual(card, Visual::Faded);
                self.timeline
                    .schedule(card, now + self.timings.collapse_delay, Step::Collapse);
            }
        }

        tracing::debug!(
            filter = filter.as_deref().unwrap_or("<none>"),
            shown = shown,
            hidden = self.cards.len() - shown,
            "Filter applied"
        );
        true
    }

    /// Applies every transition due at `now`; returns how many ran.
    pub fn tick<V: ViewPort>(&mut self, view: &mut V, now: Instant) -> usize {
        let due = self.timeline.drain_due(now);
        let ran = due.len();
        for (card, step) in due {
            apply(view, card, step);
        }
        ran
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timeline.next_due()
    }

    /// Applies all pending transitions immediately, as if their delays had
    /// elapsed.
    pub fn settle<V: ViewPort>(&mut self, view: &mut V) {
        for (card, step) in self.timeline.drain_all() {
            apply(view, card, step);
        }
    }

    /// Sleeps until each pending deadline and applies it, until nothing is
    /// pending.
    pub async fn run_until_idle<V: ViewPort>(&mut self, view: &mut V) {
        while let Some(deadline) = self.next_deadline() {
            tokio::time::sleep_until(deadline).await;
            self.tick(view, Instant::now());
        }
    }
}

fn apply<V: ViewPort>(view: &mut V, card: CardId, step: Step) {
    match step {
        Step::Reveal => view.set_visual(card, Visual::Shown),
        Step::Collapse => view.set_display(card, Display::None),
    }
}
