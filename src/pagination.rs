//! Pagination utilities for Bugsnag API responses.
//!
//! The Bugsnag API paginates with an opaque cursor: each page carries an
//! RFC-5988 `Link` response header whose `rel="next"` entry points at the
//! following page. The cursor URL embeds the original query parameters, so
//! it must be followed verbatim.

use reqwest::header::{HeaderMap, LINK};
use serde::Serialize;
use url::Url;

use crate::error::Result;

/// Query parameters for the first page of a listing request.
///
/// Subsequent pages are requested through the cursor URL from the `Link`
/// header, which already encodes these parameters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageParams {
    /// Number of records per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,

    /// Field to sort by (server-side).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,

    /// Sort direction, `asc` or `desc`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,

    /// Request full event reports rather than summaries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_reports: Option<bool>,
}

impl PageParams {
    /// Params requesting a specific page size and nothing else.
    #[must_use]
    pub fn with_per_page(per_page: u32) -> Self {
        Self {
            per_page: Some(per_page),
            ..Self::default()
        }
    }
}

/// Extract the `rel="next"` cursor URL from a `Link` response header.
///
/// Parses the conventional format: comma-separated entries of
/// `<url>; rel="name"`. Returns `Ok(None)` when the header is missing or
/// carries no `next` relation; a `next` entry whose URL does not parse is
/// an error.
pub fn next_link(headers: &HeaderMap) -> Result<Option<Url>> {
    let value = match headers.get(LINK).and_then(|v| v.to_str().ok()) {
        Some(value) => value,
        None => return Ok(None),
    };

    for entry in value.split(',') {
        let mut parts = entry.split(';');
        let target = match parts.next() {
            Some(target) => target.trim(),
            None => continue,
        };
        if !(target.starts_with('<') && target.ends_with('>')) {
            continue;
        }

        let is_next = parts.any(|param| {
            param
                .trim()
                .strip_prefix("rel=")
                .map(|rel| rel.trim_matches('"') == "next")
                .unwrap_or(false)
        });

        if is_next {
            let url = Url::parse(&target[1..target.len() - 1])?;
            return Ok(Some(url));
        }
    }

    Ok(None)
}
