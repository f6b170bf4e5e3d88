//! Serves the per-error event list.

use std::sync::Arc;

use axum::extract::{Host, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tokio::sync::RwLock;

use super::{check_auth, check_rate_limit, paginated_response, PageQuery};
use crate::mock_server::state::MockState;

/// GET /projects/{project_id}/errors/{error_id}/events
pub async fn list_events(
    State(state): State<Arc<RwLock<MockState>>>,
    Host(host): Host,
    Path(key): Path<(String, String)>,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.write().await;

    if let Some(response) = check_rate_limit(&mut state) {
        return response;
    }
    if let Some(response) = check_auth(&state, &headers) {
        return response;
    }

    let events = match state.events_for(&key.0, &key.1) {
        Some(events) => events,
        None => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({"errors": ["Error not found"]})),
            )
                .into_response();
        }
    };

    let path = format!(
        "/projects/{}/errors/{}/events",
        urlencoding::encode(&key.0),
        urlencoding::encode(&key.1)
    );
    paginated_response(events, &query, &state, &host, &path)
}
