use std::cmp::Reverse;

use super::date::parse_date;
use super::types::Article;

/// Sorts articles newest first by their parsed date.
///
/// The sort is stable, so articles published on the same day keep their
/// feed order. Unparsable dates sort as the floor date and end up last.
pub fn order(mut articles: Vec<Article>) -> Vec<Article> {
    articles.sort_by_cached_key(|a| Reverse(parse_date(&a.date)));
    articles
}
