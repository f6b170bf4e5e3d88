//! Serves the organisation list endpoint.

use std::sync::Arc;

use axum::extract::{Host, Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use tokio::sync::RwLock;

use super::{check_auth, check_rate_limit, paginated_response, PageQuery};
use crate::mock_server::state::MockState;

/// GET /user/organizations
pub async fn list_organisations(
    State(state): State<Arc<RwLock<MockState>>>,
    Host(host): Host,
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

    paginated_response(
        &state.organisations,
        &query,
        &state,
        &host,
        "/user/organizations",
    )
}
