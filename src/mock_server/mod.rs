//! In-memory Bugsnag API double for end-to-end tests.
//!
//! Where wiremock stubs individual responses per test, this server keeps
//! real state: organisations own projects, errors own event lists, and
//! every list endpoint pages through that data with `Link` cursors the
//! same way the hosted API does. Knobs on [`MockState`] add token
//! enforcement and queued 429 responses for exercising the retry path.
//!
//! # Example
//!
//! ```ignore
//! use bugsnag_export::mock_server::MockServer;
//! use bugsnag_export::{get_organisations, BugsnagClient};
//!
//! #[tokio::test]
//! async fn test_lists_organisations() {
//!     let server = MockServer::start().await;
//!     let client = BugsnagClient::new("test-token", server.url()).unwrap();
//!
//!     // The default scenario ships two organisations
//!     let organisations = get_organisations(&client).await.unwrap();
//!     assert_eq!(organisations[0].slug, "acme");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::Fixtures;
pub use server::MockServer;
pub use state::MockState;
