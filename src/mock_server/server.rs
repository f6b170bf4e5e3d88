//! Axum server wrapper for the mock Bugsnag API.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::Fixtures;
use super::handlers;
use super::state::MockState;

/// An in-process Bugsnag API double listening on a random local port.
///
/// Handlers share a [`MockState`] behind `Arc<RwLock<_>>`, so a test can
/// reshape the data while the server is running.
pub struct MockServer {
    url: String,
    handle: JoinHandle<()>,
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a server preloaded with [`Fixtures::default_scenario`].
    pub async fn start() -> Self {
        Self::with_state(Fixtures::default_scenario().into_state()).await
    }

    /// Start a server holding no data at all.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a server over caller-built state.
    pub async fn with_state(state: MockState) -> Self {
        let state = state.shared();
        let router = routes(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("mock server could not bind a local port");
        let url = listener
            .local_addr()
            .map(|addr| format!("http://{addr}"))
            .expect("mock server has no local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("mock server exited");
        });

        Self { url, handle, state }
    }

    /// Base URL for pointing a `BugsnagClient` at this server.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Shared state handle, for inspecting or mutating data mid-test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Stop serving. Safe to call on an already-stopped server.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }
}

fn routes(state: Arc<RwLock<MockState>>) -> Router {
    Router::new()
        .route("/user/organizations", get(handlers::list_organisations))
        .route(
            "/organizations/:organisation_id/projects",
            get(handlers::list_projects),
        )
        .route(
            "/projects/:project_id/errors/:error_id/events",
            get(handlers::list_events),
        )
        .route("/health", get(|| async { "ok" }))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{get_events, get_organisations, BugsnagClient, ExportTarget};

    #[tokio::test]
    async fn test_health_endpoint() {
        let server = MockServer::start_empty().await;

        let body = reqwest::get(format!("{}/health", server.url()))
            .await
            .expect("request failed")
            .text()
            .await
            .expect("no response body");
        assert_eq!(body, "ok");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_default_scenario_is_served() {
        let server = MockServer::start().await;
        let client = BugsnagClient::new("test-token", server.url()).unwrap();

        let organisations = get_organisations(&client).await.unwrap();
        let slugs: Vec<_> = organisations.iter().map(|o| o.slug.as_str()).collect();
        assert_eq!(slugs, vec!["acme", "globex"]);

        let events = get_events(&client, "proj-web", "err-checkout", None)
            .await
            .unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].id(), Some("evt-3"));

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_empty_server_lists_nothing() {
        let server = MockServer::start_empty().await;
        let client = BugsnagClient::new("test-token", server.url()).unwrap();

        assert!(get_organisations(&client).await.unwrap().is_empty());

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_resolves_against_custom_state() {
        let state = MockState::new()
            .with_organisation(Fixtures::organisation("org-9", "initech", "Initech"))
            .with_project("org-9", Fixtures::project("proj-9", "tps", "TPS Reports"));

        let server = MockServer::with_state(state).await;
        let client = BugsnagClient::new("test-token", server.url()).unwrap();

        let target = ExportTarget::resolve(&client, Some("initech"), "tps", vec!["err".into()])
            .await
            .unwrap();
        assert_eq!(target.organisation.id, "org-9");
        assert_eq!(target.project.id, "proj-9");

        server.shutdown().await;
    }
}
