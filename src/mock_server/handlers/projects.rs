//! Serves the per-organisation project list.

use std::sync::Arc;

use axum::extract::{Host, Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use tokio::sync::RwLock;

use super::{check_auth, check_rate_limit, paginated_response, PageQuery};
use crate::mock_server::state::MockState;

/// GET /organizations/{organisation_id}/projects
///
/// An unknown organisation id serves an empty list rather than a 404,
/// which keeps not-found resolution scenarios easy to stage.
pub async fn list_projects(
    State(state): State<Arc<RwLock<MockState>>>,
    Host(host): Host,
    Path(organisation_id): Path<String>,
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

    let path = format!(
        "/organizations/{}/projects",
        urlencoding::encode(&organisation_id)
    );
    paginated_response(
        state.projects_for(&organisation_id),
        &query,
        &state,
        &host,
        &path,
    )
}
