//! The view-ready pipeline: load, order, render, mount, bind filters.

use chrono::NaiveDateTime;

use crate::feed::{order, Article, Fallback, FeedLoader};
use crate::filter::{FilterController, FilterTimings};
use crate::render::{CardRenderer, DEFAULT_EXCERPT, DEFAULT_NEW_BADGE_DAYS};
use crate::view::{ButtonId, CardId, ViewError, ViewPort};

/// Knobs for one pipeline run.
#[derive(Debug, Clone)]
pub struct GalleryOptions {
    /// Reference time for the "new" badge.
    pub now: NaiveDateTime,
    pub new_badge_days: i64,
    pub default_excerpt: String,
    pub timings: FilterTimings,
}

impl GalleryOptions {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now,
            new_badge_days: DEFAULT_NEW_BADGE_DAYS,
            default_excerpt: DEFAULT_EXCERPT.to_string(),
            timings: FilterTimings::default(),
        }
    }

    fn renderer(&self) -> CardRenderer {
        CardRenderer::new(self.now)
            .with_new_window(self.new_badge_days)
            .with_default_excerpt(self.default_excerpt.clone())
    }
}

/// A rendered gallery: the view it was mounted into plus its filter bar.
#[derive(Debug)]
pub struct Gallery<V: ViewPort> {
    view: V,
    articles: Vec<Article>,
    cards: Vec<CardId>,
    filters: FilterController,
}

impl<V: ViewPort> Gallery<V> {
    /// Loads the feed and builds the gallery.
    ///
    /// A failed load is logged and replaced by `fallback`'s articles; the
    /// caller always gets a gallery, possibly an empty one.
    pub async fn load<F: Fallback>(
        loader: &FeedLoader,
        fallback: &F,
        view: V,
        options: &GalleryOptions,
    ) -> Self {
        let articles = match loader.load().await {
            Ok(decoded) => {
                for problem in &decoded.malformed {
                    tracing::warn!(source = %loader.source(), error = %problem, "Malformed article");
                }
                tracing::info!(
                    source = %loader.source(),
                    articles = decoded.articles.len(),
                    "Articles loaded"
                );
                decoded.articles
            }
            Err(e) => {
                tracing::error!(source = %loader.source(), error = %e, "Error loading articles");
                fallback.load_default_articles()
            }
        };

        Self::from_articles(view, articles, options)
    }

    /// Builds the gallery from articles already in memory.
    pub fn from_articles(mut view: V, articles: Vec<Article>, options: &GalleryOptions) -> Self {
        let articles = order(articles);
        let nodes = options.renderer().render(&articles);

        let cards = match CardRenderer::mount(&mut view, &nodes) {
            Ok(cards) => cards,
            Err(e @ ViewError::MissingContainer(_)) => {
                tracing::warn!(error = %e, "No container to render into, skipping cards");
                Vec::new()
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to mount cards");
                Vec::new()
            }
        };

        let filters = FilterController::setup(&mut view, &articles, options.timings);

        Self {
            view,
            articles,
            cards,
            filters,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Articles in display order.
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn cards(&self) -> &[CardId] {
        &self.cards
    }

    pub fn filters(&self) -> &FilterController {
        &self.filters
    }

    /// Routes a filter-button click.
    pub fn click(&mut self, button: ButtonId, now: tokio::time::Instant) -> bool {
        self.filters.click(&mut self.view, button, now)
    }

    /// Applies due transitions.
    pub fn tick(&mut self, now: tokio::time::Instant) -> usize {
        self.filters.tick(&mut self.view, now)
    }

    /// Applies every pending transition now.
    pub fn settle(&mut self) {
        self.filters.settle(&mut self.view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{ArticleFormat, EmptyFallback, FeedSource, FixedFallback};
    use crate::render::{ContentPolicy, HtmlView};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn options() -> GalleryOptions {
        GalleryOptions::new(
            NaiveDate::from_ymd_opt(2026, 1, 20)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        )
    }

    fn article(id: &str, date: &str, category: &str) -> Article {
        Article {
            id: id.to_string(),
            title: id.to_string(),
            excerpt: None,
            date: date.to_string(),
            location: None,
            category: Some(category.to_string()),
            format: ArticleFormat::External,
            link: format!("https://example.com/{}", id),
        }
    }

    fn missing_feed() -> FeedLoader {
        FeedLoader::new(FeedSource::Local(PathBuf::from(
            "/tmp/feedwall_gallery_missing/articles26.json",
        )))
    }

    #[test]
    fn test_from_articles_orders_and_mounts() {
        let gallery = Gallery::from_articles(
            HtmlView::with_catalog_filters(ContentPolicy::Trusted),
            vec![
                article("old", "1 de marzo 2024", "historia"),
                article("new", "13 de enero 2026", "politica"),
            ],
            &options(),
        );

        assert_eq!(gallery.view().displayed_ids(), vec!["new", "old"]);
        assert_eq!(gallery.cards().len(), 2);
        assert_eq!(gallery.articles()[0].id, "new");
        assert_eq!(gallery.filters().counts().len(), 2);
    }

    #[test]
    fn test_missing_container_still_binds_filters() {
        let gallery = Gallery::from_articles(
            HtmlView::with_catalog_filters(ContentPolicy::Trusted).without_container(),
            vec![article("a", "1 de marzo 2024", "historia")],
            &options(),
        );
        assert!(gallery.cards().is_empty());
        let historia = gallery.view().find_button("historia").unwrap();
        assert_eq!(gallery.view().button(historia).unwrap().count, Some(1));
    }

    #[tokio::test]
    async fn test_failed_load_uses_empty_fallback() {
        let gallery = Gallery::load(
            &missing_feed(),
            &EmptyFallback,
            HtmlView::with_catalog_filters(ContentPolicy::Trusted),
            &options(),
        )
        .await;
        assert!(gallery.articles().is_empty());
        assert!(gallery.view().displayed_ids().is_empty());
    }

    #[tokio::test]
    async fn test_failed_load_renders_fixed_fallback() {
        let fallback = FixedFallback(vec![article("respaldo", "2 de enero 2026", "ensayo")]);
        let gallery = Gallery::load(
            &missing_feed(),
            &fallback,
            HtmlView::with_catalog_filters(ContentPolicy::Trusted),
            &options(),
        )
        .await;
        assert_eq!(gallery.view().displayed_ids(), vec!["respaldo"]);
    }

    #[test]
    fn test_click_and_settle() {
        let mut gallery = Gallery::from_articles(
            HtmlView::with_catalog_filters(ContentPolicy::Trusted),
            vec![
                article("p", "3 de enero 2026", "politica"),
                article("e", "2 de enero 2026", "economia"),
            ],
            &options(),
        );
        let economia = gallery.view().find_button("economia").unwrap();
        assert!(gallery.click(economia, tokio::time::Instant::now()));
        gallery.settle();
        assert_eq!(gallery.view().displayed_ids(), vec!["e"]);
    }
}
