use serde::Deserialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// How the linked article is published; selects the link indicator icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum ArticleFormat {
    Pdf,
    External,
    #[default]
    Document,
}

impl From<&str> for ArticleFormat {
    fn from(s: &str) -> Self {
        match s {
            "pdf" => ArticleFormat::Pdf,
            "external" => ArticleFormat::External,
            _ => ArticleFormat::Document,
        }
    }
}

impl From<String> for ArticleFormat {
    fn from(s: String) -> Self {
        ArticleFormat::from(s.as_str())
    }
}

impl ArticleFormat {
    /// Font Awesome glyph shown next to the article link.
    pub fn icon(&self) -> &'static str {
        match self {
            ArticleFormat::Pdf => "fa-file-pdf",
            ArticleFormat::External => "fa-external-link-alt",
            ArticleFormat::Document => "fa-file-alt",
        }
    }
}

/// One article from the feed.
///
/// Optional text fields never hold an empty string; decoding maps `""` to
/// `None` so the renderer only has to check for presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub date: String,
    pub location: Option<String>,
    pub category: Option<String>,
    pub format: ArticleFormat,
    pub link: String,
}

/// Diagnostic for a feed entry that was missing fields or was not an object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedArticle {
    #[error("article #{index} is not an object")]
    NotAnObject { index: usize },
    #[error("article #{index} is missing {}", .fields.join(", "))]
    MissingFields {
        index: usize,
        fields: Vec<&'static str>,
    },
}

/// Outcome of decoding a feed document.
#[derive(Debug, Default)]
pub struct DecodedFeed {
    pub articles: Vec<Article>,
    pub malformed: Vec<MalformedArticle>,
}

#[derive(Deserialize)]
struct FeedDocument {
    articles: Vec<Value>,
}

/// Title used when an entry has none.
pub const UNTITLED: &str = "Sin título";

/// Decodes a feed document, keeping every entry that is a JSON object.
///
/// The document must be an object with an `articles` array. Entries with
/// missing fields are kept with defaults and reported in
/// [`DecodedFeed::malformed`]; entries that are not objects are dropped.
pub fn decode_feed(bytes: &[u8]) -> Result<DecodedFeed, serde_json::Error> {
    let doc: FeedDocument = serde_json::from_slice(bytes)?;

    let mut decoded = DecodedFeed {
        articles: Vec::with_capacity(doc.articles.len()),
        malformed: Vec::new(),
    };

    for (index, value) in doc.articles.into_iter().enumerate() {
        let Value::Object(fields) = value else {
            decoded.malformed.push(MalformedArticle::NotAnObject { index });
            continue;
        };

        let (article, missing) = article_from_fields(&fields);
        if !missing.is_empty() {
            decoded.malformed.push(MalformedArticle::MissingFields {
                index,
                fields: missing,
            });
        }
        decoded.articles.push(article);
    }

    Ok(decoded)
}

fn article_from_fields(fields: &Map<String, Value>) -> (Article, Vec<&'static str>) {
    let mut missing = Vec::new();
    let mut required = |name: &'static str| {
        let value = text(fields, name);
        if value.is_none() {
            missing.push(name);
        }
        value
    };

    let title = required("title");
    let date = required("date");
    let link = required("link");
    let id = required("id");
    let category = required("category");
    let format = required("format");

    let id = id.unwrap_or_else(|| {
        derive_id(link.as_deref(), title.as_deref(), date.as_deref())
    });

    let article = Article {
        id,
        title: title.unwrap_or_else(|| UNTITLED.to_string()),
        excerpt: text(fields, "excerpt"),
        date: date.unwrap_or_default(),
        location: text(fields, "location"),
        category,
        format: format.map(ArticleFormat::from).unwrap_or_default(),
        link: link.unwrap_or_else(|| "#".to_string()),
    };

    (article, missing)
}

/// Text value of a field. Numbers and booleans are taken verbatim; empty
/// strings, nulls and structured values count as absent.
fn text(fields: &Map<String, Value>, name: &str) -> Option<String> {
    match fields.get(name)? {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Stable identifier for entries that lack one.
fn derive_id(link: Option<&str>, title: Option<&str>, date: Option<&str>) -> String {
    let input = format!(
        "{}|{}|{}",
        link.unwrap_or(""),
        title.unwrap_or(""),
        date.unwrap_or("")
    );
    let hash = Sha256::digest(input.as_bytes());
    format!("{:x}", hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_complete_article() {
        let json = r#"{"articles": [{
            "id": "a1",
            "title": "La reforma",
            "excerpt": "Resumen",
            "date": "13 de enero 2026",
            "location": "Madrid",
            "category": "politica",
            "format": "pdf",
            "link": "docs/reforma.pdf"
        }]}"#;

        let decoded = decode_feed(json.as_bytes()).unwrap();
        assert!(decoded.malformed.is_empty());
        assert_eq!(
            decoded.articles,
            vec![Article {
                id: "a1".into(),
                title: "La reforma".into(),
                excerpt: Some("Resumen".into()),
                date: "13 de enero 2026".into(),
                location: Some("Madrid".into()),
                category: Some("politica".into()),
                format: ArticleFormat::Pdf,
                link: "docs/reforma.pdf".into(),
            }]
        );
    }

    #[test]
    fn test_numeric_id_is_kept_verbatim() {
        let json = r#"{"articles": [{"id": 17, "title": "t", "date": "1 de mayo 2024",
            "category": "cultura", "format": "external", "link": "https://x.org"}]}"#;
        let decoded = decode_feed(json.as_bytes()).unwrap();
        assert_eq!(decoded.articles[0].id, "17");
        assert_eq!(decoded.articles[0].format, ArticleFormat::External);
    }

    #[test]
    fn test_empty_optionals_count_as_absent() {
        let json = r#"{"articles": [{"id": "x", "title": "t", "date": "d", "excerpt": "",
            "location": "", "category": "ensayo", "format": "pdf", "link": "l"}]}"#;
        let decoded = decode_feed(json.as_bytes()).unwrap();
        assert_eq!(decoded.articles[0].excerpt, None);
        assert_eq!(decoded.articles[0].location, None);
    }

    #[test]
    fn test_missing_fields_degrade_and_are_reported() {
        let json = r#"{"articles": [{"title": "Solo título"}]}"#;
        let decoded = decode_feed(json.as_bytes()).unwrap();

        assert_eq!(decoded.articles.len(), 1);
        let article = &decoded.articles[0];
        assert_eq!(article.title, "Solo título");
        assert_eq!(article.date, "");
        assert_eq!(article.link, "#");
        assert_eq!(article.category, None);
        assert_eq!(article.format, ArticleFormat::Document);
        assert_eq!(article.id.len(), 64);

        assert_eq!(
            decoded.malformed,
            vec![MalformedArticle::MissingFields {
                index: 0,
                fields: vec!["date", "link", "id", "category", "format"],
            }]
        );
    }

    #[test]
    fn test_derived_id_is_stable() {
        let json = r#"{"articles": [{"title": "t", "link": "l", "date": "d"}]}"#;
        let a = decode_feed(json.as_bytes()).unwrap();
        let b = decode_feed(json.as_bytes()).unwrap();
        assert_eq!(a.articles[0].id, b.articles[0].id);
    }

    #[test]
    fn test_non_object_entries_are_skipped() {
        let json = r#"{"articles": [42, {"id": "ok", "title": "t", "date": "d",
            "category": "c", "format": "f", "link": "l"}, null]}"#;
        let decoded = decode_feed(json.as_bytes()).unwrap();
        assert_eq!(decoded.articles.len(), 1);
        assert_eq!(decoded.articles[0].id, "ok");
        assert_eq!(
            decoded.malformed,
            vec![
                MalformedArticle::NotAnObject { index: 0 },
                MalformedArticle::NotAnObject { index: 2 },
            ]
        );
    }

    #[test]
    fn test_missing_articles_field_is_an_error() {
        assert!(decode_feed(br#"{"posts": []}"#).is_err());
        assert!(decode_feed(b"not json").is_err());
        assert!(decode_feed(br#"{"articles": {}}"#).is_err());
    }

    #[test]
    fn test_unknown_format_is_document() {
        assert_eq!(ArticleFormat::from("video"), ArticleFormat::Document);
        assert_eq!(ArticleFormat::from("PDF"), ArticleFormat::Document);
        assert_eq!(ArticleFormat::Pdf.icon(), "fa-file-pdf");
        assert_eq!(ArticleFormat::External.icon(), "fa-external-link-alt");
        assert_eq!(ArticleFormat::Document.icon(), "fa-file-alt");
    }

    #[test]
    fn test_malformed_display() {
        let err = MalformedArticle::MissingFields {
            index: 3,
            fields: vec!["date", "link"],
        };
        assert_eq!(err.to_string(), "article #3 is missing date, link");
    }
}
