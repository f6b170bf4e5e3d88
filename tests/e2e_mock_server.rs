//! E2E tests using the mock Bugsnag server.
//!
//! Each test drives a whole workflow, resolve through export, against the
//! stateful in-process server rather than stubbing single responses.

#![cfg(feature = "test-server")]

use bugsnag_export::mock_server::{Fixtures, MockServer, MockState};
use bugsnag_export::{
    get_events, get_organisations, BugsnagClient, BugsnagError, ExportTarget, Exporter,
    ValueEncodings,
};

// =============================================================================
// Server Lifecycle
// =============================================================================

#[tokio::test]
async fn test_servers_bind_distinct_ports() {
    let server1 = MockServer::start().await;
    let server2 = MockServer::start().await;

    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_shutdown_stops_serving() {
    let server = MockServer::start().await;
    let url = server.url().to_string();

    server.shutdown().await;

    let result = reqwest::get(format!("{url}/health")).await;
    assert!(result.is_err());
}

// =============================================================================
// Export Workflows
// =============================================================================

#[tokio::test]
async fn test_full_export_workflow() {
    let server = MockServer::start().await;
    let client = BugsnagClient::new("test-token", server.url()).unwrap();

    // Resolve by slug, then export events for two errors as CSV
    let target = ExportTarget::resolve(
        &client,
        Some("acme"),
        "acme-web",
        vec!["err-checkout".to_string(), "err-signup".to_string()],
    )
    .await
    .expect("Failed to resolve target");

    assert_eq!(target.organisation.id, "org-1");
    assert_eq!(target.project.id, "proj-web");

    let columns = vec![
        "metaData.subscription.plan:plan".to_string(),
        "app.releaseStage:stage".to_string(),
    ];
    let csv = Exporter::new(&client, target)
        .export_csv(Some(100), &columns, &ValueEncodings::default())
        .await
        .expect("Failed to export CSV");

    assert_eq!(
        csv,
        "id,received_at,plan,stage\n\
         evt-3,2024-03-03T08:15:00Z,pro,production\n\
         evt-2,2024-03-02T12:00:00Z,pro,production\n\
         evt-1,2024-03-01T09:30:00Z,pro,production\n\
         evt-s1,2024-02-20T16:45:00Z,pro,production\n"
    );

    server.shutdown().await;
}

#[tokio::test]
async fn test_resolve_by_raw_ids() {
    let server = MockServer::start().await;
    let client = BugsnagClient::new("test-token", server.url()).unwrap();

    let target = ExportTarget::resolve(
        &client,
        Some("org-2"),
        "proj-site",
        vec!["err-x".to_string()],
    )
    .await
    .expect("Failed to resolve target");

    assert_eq!(target.organisation.slug, "globex");
    assert_eq!(target.project.slug, "globex-site");

    server.shutdown().await;
}

#[tokio::test]
async fn test_unknown_error_id_is_an_api_error() {
    let server = MockServer::start().await;
    let client = BugsnagClient::new("test-token", server.url()).unwrap();

    let error = get_events(&client, "proj-web", "err-nope", None)
        .await
        .unwrap_err();

    match error {
        BugsnagError::Api {
            message,
            status_code,
        } => {
            assert_eq!(message, "Error not found");
            assert_eq!(status_code, Some(404));
        }
        other => panic!("Expected Api error, got {other:?}"),
    }

    server.shutdown().await;
}

// =============================================================================
// Pagination
// =============================================================================

#[tokio::test]
async fn test_export_follows_pagination_cursors() {
    // Cap the page size so five events arrive over three pages
    let state = MockState::new()
        .with_organisation(Fixtures::organisation("org-9", "initech", "Initech"))
        .with_project("org-9", Fixtures::project("proj-9", "tps", "TPS Reports"))
        .with_events(
            "proj-9",
            "err-9",
            vec![
                Fixtures::event("evt-5", "2024-03-05T00:00:00Z"),
                Fixtures::event("evt-4", "2024-03-04T00:00:00Z"),
                Fixtures::event("evt-3", "2024-03-03T00:00:00Z"),
                Fixtures::event("evt-2", "2024-03-02T00:00:00Z"),
                Fixtures::event("evt-1", "2024-03-01T00:00:00Z"),
            ],
        )
        .with_page_size_cap(2);

    let server = MockServer::with_state(state).await;
    let client = BugsnagClient::new("test-token", server.url()).unwrap();

    let events = get_events(&client, "proj-9", "err-9", None)
        .await
        .expect("Failed to list events");
    let ids: Vec<_> = events.iter().filter_map(|e| e.id()).collect();
    assert_eq!(ids, vec!["evt-5", "evt-4", "evt-3", "evt-2", "evt-1"]);

    // A record limit still applies across page boundaries
    let events = get_events(&client, "proj-9", "err-9", Some(3))
        .await
        .expect("Failed to list events");
    assert_eq!(events.len(), 3);

    server.shutdown().await;
}

#[tokio::test]
async fn test_organisations_across_pages() {
    let state = MockState::new()
        .with_organisation(Fixtures::organisation("org-1", "acme", "Acme"))
        .with_organisation(Fixtures::organisation("org-2", "globex", "Globex"))
        .with_organisation(Fixtures::organisation("org-3", "initech", "Initech"))
        .with_page_size_cap(1);

    let server = MockServer::with_state(state).await;
    let client = BugsnagClient::new("test-token", server.url()).unwrap();

    let organisations = get_organisations(&client)
        .await
        .expect("Failed to list organisations");
    let slugs: Vec<_> = organisations.iter().map(|o| o.slug.as_str()).collect();
    assert_eq!(slugs, vec!["acme", "globex", "initech"]);

    server.shutdown().await;
}

// =============================================================================
// Rate Limiting
// =============================================================================

#[tokio::test]
async fn test_rate_limited_requests_eventually_succeed() {
    let state = MockState::new()
        .with_organisation(Fixtures::organisation("org-1", "acme", "Acme"))
        .with_rate_limits(2, 0.01);

    let server = MockServer::with_state(state).await;
    let client = BugsnagClient::new("test-token", server.url()).unwrap();

    let organisations = get_organisations(&client)
        .await
        .expect("Failed to list organisations");
    assert_eq!(organisations.len(), 1);

    // Both queued 429 responses were consumed along the way
    assert_eq!(server.state().read().await.pending_rate_limits, 0);

    server.shutdown().await;
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_required_token_is_enforced() {
    let state = MockState::new()
        .with_organisation(Fixtures::organisation("org-1", "acme", "Acme"))
        .with_required_token("sekrit");

    let server = MockServer::with_state(state).await;

    let client = BugsnagClient::new("sekrit", server.url()).unwrap();
    let organisations = get_organisations(&client)
        .await
        .expect("Correct token should be accepted");
    assert_eq!(organisations.len(), 1);

    let client = BugsnagClient::new("wrong", server.url()).unwrap();
    let error = get_organisations(&client).await.unwrap_err();
    match error {
        BugsnagError::Api {
            message,
            status_code,
        } => {
            assert_eq!(message, "Authorization token is invalid");
            assert_eq!(status_code, Some(401));
        }
        other => panic!("Expected Api error, got {other:?}"),
    }

    server.shutdown().await;
}

// =============================================================================
// State Mutation
// =============================================================================

#[tokio::test]
async fn test_state_can_be_modified_mid_test() {
    let server = MockServer::start_empty().await;
    let client = BugsnagClient::new("test-token", server.url()).unwrap();

    let organisations = get_organisations(&client).await.unwrap();
    assert!(organisations.is_empty());

    server
        .state()
        .write()
        .await
        .organisations
        .push(Fixtures::organisation("org-1", "acme", "Acme"));

    let organisations = get_organisations(&client).await.unwrap();
    assert_eq!(organisations.len(), 1);

    server.shutdown().await;
}
