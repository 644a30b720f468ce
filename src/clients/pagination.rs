//! Cursor pagination from the REST `Link` header.
//!
//! A paginated response carries up to two links:
//!
//! ```text
//! <https://shop.myshopify.com/admin/api/2021-10/products.json?limit=50&page_info=abc>; rel="next", <...?page_info=xyz>; rel="previous"
//! ```
//!
//! The `page_info` value of each link is the cursor. Cursors are opaque and
//! only ever passed back as the `page_info` query parameter of the next call.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use url::Url;

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^<([^<>]+)>;\s*rel="(previous|next)"$"#).expect("Invalid regex")
});

/// Error returned when a `Link` header does not have the expected format.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaginationError {
    /// A comma-separated segment is not `<url>; rel="previous"|"next"` with a
    /// `page_info` parameter.
    #[error("Invalid pagination link header segment: {segment}")]
    MalformedHeader {
        /// The offending segment.
        segment: String,
    },
}

/// Forward and backward cursors for a REST collection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pagination {
    /// Cursor for the previous page.
    pub previous: Option<String>,
    /// Cursor for the next page.
    pub next: Option<String>,
}

impl Pagination {
    /// Parses a `Link` header value.
    ///
    /// An empty header yields an empty `Pagination`.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::MalformedHeader`] if any segment fails to match.
    ///
    /// # Example
    ///
    /// ```rust
    /// use shopify_admin::clients::Pagination;
    ///
    /// let pagination =
    ///     Pagination::parse(r#"<https://x.myshopify.com/a.json?page_info=c1>; rel="next""#).unwrap();
    /// assert_eq!(pagination.next.as_deref(), Some("c1"));
    /// assert!(pagination.previous.is_none());
    /// ```
    pub fn parse(link_header: &str) -> Result<Self, PaginationError> {
        let mut pagination = Self::default();
        if link_header.trim().is_empty() {
            return Ok(pagination);
        }

        for segment in link_header.split(',') {
            let segment = segment.trim();
            let malformed = || PaginationError::MalformedHeader {
                segment: segment.to_string(),
            };

            let captures = LINK_RE.captures(segment).ok_or_else(malformed)?;
            let url = Url::parse(&captures[1]).map_err(|_| malformed())?;
            let cursor = url
                .query_pairs()
                .find(|(key, _)| key == "page_info")
                .map(|(_, value)| value.into_owned())
                .ok_or_else(malformed)?;

            if &captures[2] == "next" {
                pagination.next = Some(cursor);
            } else {
                pagination.previous = Some(cursor);
            }
        }

        Ok(pagination)
    }

    /// Returns `true` if neither cursor is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.previous.is_none() && self.next.is_none()
    }
}
