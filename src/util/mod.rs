//! Utility functions for common operations.
//!
//! - **Link validation**: scheme checks applied to article links when the
//!   feed is rendered with the escaped content policy

mod url_validator;

pub use url_validator::{sanitize_link, validate_link, LinkError, INERT_LINK};
