use chrono::{NaiveDateTime, TimeDelta};

use crate::catalog;
use crate::feed::{parse_date, Article};
use crate::view::{CardId, ViewError, ViewPort};

/// Excerpt shown when an article has none.
pub const DEFAULT_EXCERPT: &str = "Artículo de análisis y reflexión política.";

/// Days during which an article carries the "new" badge.
pub const DEFAULT_NEW_BADGE_DAYS: i64 = 30;

/// Everything needed to draw one article card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardNode {
    /// `data-id` attribute
    pub id: String,
    /// `data-category` attribute; empty when the article has no category
    pub category: String,
    /// Animation bucket, 1..=4
    pub stagger: u8,
    pub is_new: bool,
    pub title: String,
    pub date: String,
    pub location: Option<String>,
    pub category_icon: &'static str,
    pub category_name: &'static str,
    pub excerpt: String,
    pub link: String,
    pub format_icon: &'static str,
}

impl CardNode {
    pub fn class_name(&self) -> String {
        format!("article-card fade-in stagger-delay-{}", self.stagger)
    }
}

/// Turns ordered articles into card nodes.
#[derive(Debug, Clone)]
pub struct CardRenderer {
    now: NaiveDateTime,
    new_window: TimeDelta,
    default_excerpt: String,
}

impl CardRenderer {
    /// Renderer judging "new" against `now` with the default 30-day window.
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now,
            new_window: TimeDelta::days(DEFAULT_NEW_BADGE_DAYS),
            default_excerpt: DEFAULT_EXCERPT.to_string(),
        }
    }

    pub fn with_new_window(mut self, days: i64) -> Self {
        self.new_window = TimeDelta::try_days(days).unwrap_or(TimeDelta::MAX);
        self
    }

    pub fn with_default_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.default_excerpt = excerpt.into();
        self
    }

    pub fn render(&self, ordered: &[Article]) -> Vec<CardNode> {
        ordered
            .iter()
            .enumerate()
            .map(|(i, article)| self.render_one(i, article))
            .collect()
    }

    fn render_one(&self, index: usize, article: &Article) -> CardNode {
        let category = article.category.as_deref().unwrap_or("");

        CardNode {
            id: article.id.clone(),
            category: category.to_string(),
            stagger: (index % 4) as u8 + 1,
            is_new: self.is_new(&article.date),
            title: article.title.clone(),
            date: article.date.clone(),
            location: article.location.clone(),
            category_icon: catalog::icon_for(category),
            category_name: catalog::name_for(category),
            excerpt: article
                .excerpt
                .clone()
                .unwrap_or_else(|| self.default_excerpt.clone()),
            link: article.link.clone(),
            format_icon: article.format.icon(),
        }
    }

    /// Published after `now - window`, comparing from midnight of the date.
    fn is_new(&self, date: &str) -> bool {
        let published = parse_date(date).and_time(chrono::NaiveTime::MIN);
        match self.now.checked_sub_signed(self.new_window) {
            Some(cutoff) => published > cutoff,
            None => true,
        }
    }

    /// Creates every card in the view, then swaps them into the container in
    /// one step.
    pub fn mount<V: ViewPort>(view: &mut V, cards: &[CardNode]) -> Result<Vec<CardId>, ViewError> {
        let ids: Vec<CardId> = cards.iter().map(|node| view.create_card(node)).collect();
        view.mount(&ids)?;
        tracing::debug!(cards = ids.len(), "Cards mounted");
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::ArticleFormat;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn article(id: &str, date: &str, category: Option<&str>) -> Article {
        Article {
            id: id.to_string(),
            title: format!("Título {}", id),
            excerpt: None,
            date: date.to_string(),
            location: None,
            category: category.map(str::to_string),
            format: ArticleFormat::Document,
            link: format!("https://example.com/{}", id),
        }
    }

    #[test]
    fn test_card_fields() {
        let mut a = article("a1", "13 de enero 2026", Some("economia"));
        a.excerpt = Some("Resumen".into());
        a.location = Some("Lima".into());
        a.format = ArticleFormat::Pdf;

        let cards = CardRenderer::new(now()).render(&[a]);
        assert_eq!(
            cards,
            vec![CardNode {
                id: "a1".into(),
                category: "economia".into(),
                stagger: 1,
                is_new: true,
                title: "Título a1".into(),
                date: "13 de enero 2026".into(),
                location: Some("Lima".into()),
                category_icon: "fas fa-chart-line",
                category_name: "Economía",
                excerpt: "Resumen".into(),
                link: "https://example.com/a1".into(),
                format_icon: "fa-file-pdf",
            }]
        );
    }

    #[test]
    fn test_stagger_cycles_through_four_buckets() {
        let articles: Vec<_> = (0..9)
            .map(|i| article(&i.to_string(), "1 de enero 2020", Some("cultura")))
            .collect();
        let staggers: Vec<u8> = CardRenderer::new(now())
            .render(&articles)
            .iter()
            .map(|c| c.stagger)
            .collect();
        assert_eq!(staggers, vec![1, 2, 3, 4, 1, 2, 3, 4, 1]);
    }

    #[test]
    fn test_class_name() {
        let cards = CardRenderer::new(now()).render(&[
            article("a", "d", None),
            article("b", "d", None),
        ]);
        assert_eq!(cards[1].class_name(), "article-card fade-in stagger-delay-2");
    }

    #[test]
    fn test_new_badge_window() {
        let renderer = CardRenderer::new(now());
        let cards = renderer.render(&[
            article("recent", "20 de enero 2026", None),
            article("old", "20 de diciembre 2025", None),
            article("edge", "2 de enero 2026", None),
            article("undated", "sin fecha", None),
        ]);
        let flags: Vec<bool> = cards.iter().map(|c| c.is_new).collect();
        // Cutoff is 2 Jan 12:00, so midnight of 2 Jan is already too old.
        assert_eq!(flags, vec![true, false, false, false]);
    }

    #[test]
    fn test_custom_new_window() {
        let renderer = CardRenderer::new(now()).with_new_window(60);
        let cards = renderer.render(&[article("old", "20 de diciembre 2025", None)]);
        assert!(cards[0].is_new);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let cards = CardRenderer::new(now()).render(&[article("x", "", None)]);
        let card = &cards[0];
        assert_eq!(card.category, "");
        assert_eq!(card.category_icon, catalog::GENERIC_ICON);
        assert_eq!(card.category_name, catalog::GENERIC_NAME);
        assert_eq!(card.excerpt, DEFAULT_EXCERPT);
        assert_eq!(card.format_icon, "fa-file-alt");
    }

    #[test]
    fn test_unknown_category_keeps_attribute() {
        let cards = CardRenderer::new(now()).render(&[article("x", "", Some("deportes"))]);
        assert_eq!(cards[0].category, "deportes");
        assert_eq!(cards[0].category_name, "General");
    }

    #[test]
    fn test_custom_default_excerpt() {
        let cards = CardRenderer::new(now())
            .with_default_excerpt("Sin resumen")
            .render(&[article("x", "", None)]);
        assert_eq!(cards[0].excerpt, "Sin resumen");
    }
}
