//! Bugsnag event export library.
//!
//! A Rust library for exporting error events from the Bugsnag Data Access
//! API as CSV. Listing is defined by the [`List`] trait, which entity
//! types implement with their own paths and default query parameters;
//! pagination cursors and rate-limit retries are handled transparently.
//!
//! # Quick Start
//!
//! ```no_run
//! use bugsnag_export::{BugsnagClient, ExportTarget, Exporter, ValueEncodings};
//!
//! #[tokio::main]
//! async fn main() -> bugsnag_export::Result<()> {
//!     // Reads BUGSNAG_API_KEY, and BUGSNAG_API_URL if set
//!     let client = BugsnagClient::from_env()?;
//!
//!     // Resolve organisation and project by id or slug
//!     let target = ExportTarget::resolve(
//!         &client,
//!         Some("acme"),
//!         "my-app",
//!         vec!["61e8b0f0a3e1b20009000001".to_string()],
//!     )
//!     .await?;
//!
//!     // Render the most recent events as CSV
//!     let csv = Exporter::new(&client, target)
//!         .export_csv(
//!             Some(100),
//!             &["metaData.user.id:user_id".to_string()],
//!             &ValueEncodings::default(),
//!         )
//!         .await?;
//!     print!("{csv}");
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The library is organized around two traits:
//!
//! - [`List`] - Fetch a collection of entities, following pagination
//!   cursors from `Link` response headers
//! - [`Resolve`] - Match an entity against an id-or-slug filter
//!
//! [`Organisation`], [`Project`], and [`Event`] implement the traits
//! their API endpoints support. [`ExportTarget`] resolves user-supplied
//! filters into concrete identifiers, and [`Exporter`] turns the
//! resulting events into CSV via [`ColumnSpec`] and [`ValueEncodings`].
//!
//! # Configuration
//!
//! Two environment variables configure the client:
//!
//! - `BUGSNAG_API_KEY` (required) - Personal auth token for the API
//! - `BUGSNAG_API_URL` (optional) - Base URL (defaults to `https://api.bugsnag.com`)

mod client;
mod error;
mod exporter;
mod models;
mod output;
mod pagination;
mod traits;

pub mod cli;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Client and error types
pub use client::{BugsnagClient, DEFAULT_API_URL};
pub use error::{BugsnagError, Result};
pub use pagination::{next_link, PageParams};

// Listing and resolution traits
pub use traits::{select_by_filter, List, Resolve, DEFAULT_PAGE_SIZE};

// API entities
pub use models::{Event, Organisation, Project};

// Export machinery
pub use exporter::{ExportTarget, Exporter};
pub use output::{encode_value, write_row, ColumnSpec, ValueEncodings};

// One-call listing helpers
pub use models::{get_events, get_organisations, get_projects};
