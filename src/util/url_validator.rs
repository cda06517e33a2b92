use std::borrow::Cow;
use thiserror::Error;
use url::Url;

/// Href substituted for links that fail validation.
pub const INERT_LINK: &str = "#";

/// Reasons an article link is refused by the escaped content policy.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LinkError {
    /// The URL string could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme that can execute or embed content.
    #[error("Unsupported scheme: {0} (only http, https and mailto allowed)")]
    UnsupportedScheme(String),
}

/// Validates an article link.
///
/// Relative references (`docs/a.pdf`, `/blog/x`, `#top`) are accepted as is,
/// they resolve against the page. Absolute URLs must use `http`, `https` or
/// `mailto`, which rules out `javascript:` and `data:` links.
///
/// # Examples
///
/// ```
/// use feedwall::util::validate_link;
///
/// assert!(validate_link("https://example.com/a.pdf").is_ok());
/// assert!(validate_link("pdfs/ensayo.pdf").is_ok());
/// assert!(validate_link("javascript:alert(1)").is_err());
/// ```
pub fn validate_link(raw: &str) -> Result<(), LinkError> {
    // Browsers ignore leading whitespace and control characters in hrefs.
    let trimmed = raw.trim_start_matches(|c: char| c.is_whitespace() || c.is_control());

    match Url::parse(trimmed) {
        Ok(url) => match url.scheme() {
            "http" | "https" | "mailto" => Ok(()),
            scheme => Err(LinkError::UnsupportedScheme(scheme.to_owned())),
        },
        Err(url::ParseError::RelativeUrlWithoutBase) => Ok(()),
        Err(e) => Err(LinkError::InvalidUrl(e)),
    }
}

/// Returns the link unchanged when valid, otherwise [`INERT_LINK`].
pub fn sanitize_link(raw: &str) -> Cow<'_, str> {
    match validate_link(raw) {
        Ok(()) => Cow::Borrowed(raw),
        Err(e) => {
            tracing::warn!(link = %raw, error = %e, "Replacing unsafe article link");
            Cow::Borrowed(INERT_LINK)
        }
    }
}
