//! Axum handlers backing the mock routes.
//!
//! All list endpoints share the same behaviors: queued 429 responses are
//! served first, then the auth token is checked, then one page of results
//! is returned with a `Link` cursor when more remain.

pub mod events;
pub mod organisations;
pub mod projects;

pub use events::*;
pub use organisations::*;
pub use projects::*;

use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::state::MockState;

/// Query parameters shared by all list endpoints.
///
/// `offset` is the mock's pagination cursor; the client never sends it
/// directly, it only follows `Link` headers that embed it.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub per_page: Option<usize>,
    pub offset: Option<usize>,
}

/// Serve a queued 429 response, if any are pending.
pub(super) fn check_rate_limit(state: &mut MockState) -> Option<Response> {
    let retry_after = state.take_rate_limit()?;

    let response = (
        StatusCode::TOO_MANY_REQUESTS,
        [(header::RETRY_AFTER, format!("{retry_after}"))],
        Json(json!({"errors": ["Rate limit exceeded"]})),
    )
        .into_response();
    Some(response)
}

/// Reject requests that do not carry the required auth token.
pub(super) fn check_auth(state: &MockState, headers: &HeaderMap) -> Option<Response> {
    let required = state.required_token.as_ref()?;
    let expected = format!("token {required}");

    let provided = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    if provided == Some(expected.as_str()) {
        return None;
    }

    let response = (
        StatusCode::UNAUTHORIZED,
        Json(json!({"errors": ["Authorization token is invalid"]})),
    )
        .into_response();
    Some(response)
}

/// Serve one page of `items`, attaching a `Link` next cursor when more
/// remain. The cursor URL embeds the effective page size, so following it
/// verbatim keeps paging consistently.
pub(super) fn paginated_response<T: Serialize>(
    items: &[T],
    query: &PageQuery,
    state: &MockState,
    host: &str,
    path: &str,
) -> Response {
    let mut per_page = query.per_page.unwrap_or(30);
    if let Some(cap) = state.page_size_cap {
        per_page = per_page.min(cap);
    }
    let per_page = per_page.max(1);

    let offset = query.offset.unwrap_or(0);
    let end = (offset + per_page).min(items.len());
    let page = items.get(offset..end).unwrap_or(&[]);

    if end < items.len() {
        let link = format!("<http://{host}{path}?offset={end}&per_page={per_page}>; rel=\"next\"");
        (StatusCode::OK, [(header::LINK, link)], Json(page)).into_response()
    } else {
        (StatusCode::OK, Json(page)).into_response()
    }
}
