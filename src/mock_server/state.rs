//! Data store behind the mock server.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{Event, Organisation, Project};

/// Everything the mock server serves, plus its behavior knobs.
///
/// Built up with the `with_*` methods and handed to the server, which
/// keeps it behind `Arc<RwLock<_>>` so tests can still reach in.
#[derive(Debug, Default)]
pub struct MockState {
    /// Organisations in listing order. The first entry is what an
    /// unfiltered resolve falls back to.
    pub organisations: Vec<Organisation>,

    /// Projects indexed by organisation id, in listing order.
    pub projects: HashMap<String, Vec<Project>>,

    /// Events indexed by (project id, error id), newest first.
    pub events: HashMap<(String, String), Vec<Event>>,

    /// Optional authentication token. If set, requests must carry
    /// `Authorization: token <value>`.
    pub required_token: Option<String>,

    /// Server-side ceiling on `per_page`. Lets tests force multi-page
    /// responses without building large fixture sets.
    pub page_size_cap: Option<usize>,

    /// Number of upcoming requests to answer with `429 Too Many Requests`
    /// before serving normally.
    pub pending_rate_limits: u32,

    /// `Retry-After` value sent with rate-limited responses, in seconds.
    pub retry_after: f64,
}

impl MockState {
    /// Empty state: no data, no knobs engaged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap the state for sharing with handlers.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add an organisation to the state.
    pub fn with_organisation(mut self, organisation: Organisation) -> Self {
        self.organisations.push(organisation);
        self
    }

    /// Add a project under an organisation.
    pub fn with_project(mut self, organisation_id: &str, project: Project) -> Self {
        self.projects
            .entry(organisation_id.to_string())
            .or_default()
            .push(project);
        self
    }

    /// Add events for an error within a project, newest first.
    pub fn with_events(mut self, project_id: &str, error_id: &str, events: Vec<Event>) -> Self {
        self.events
            .insert((project_id.to_string(), error_id.to_string()), events);
        self
    }

    /// Require requests to carry this auth token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Cap the page size the server will honour.
    pub fn with_page_size_cap(mut self, cap: usize) -> Self {
        self.page_size_cap = Some(cap);
        self
    }

    /// Answer the next `count` requests with 429, sending `retry_after`
    /// seconds in the `Retry-After` header.
    pub fn with_rate_limits(mut self, count: u32, retry_after: f64) -> Self {
        self.pending_rate_limits = count;
        self.retry_after = retry_after;
        self
    }

    /// Whether an organisation with this id exists.
    pub fn organisation_exists(&self, organisation_id: &str) -> bool {
        self.organisations.iter().any(|o| o.id == organisation_id)
    }

    /// Projects under an organisation. Empty when none were added.
    pub fn projects_for(&self, organisation_id: &str) -> &[Project] {
        self.projects
            .get(organisation_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Events for an error within a project, or None when the pair is unknown.
    pub fn events_for(&self, project_id: &str, error_id: &str) -> Option<&Vec<Event>> {
        self.events
            .get(&(project_id.to_string(), error_id.to_string()))
    }

    /// Consume one pending rate limit, if any remain.
    pub fn take_rate_limit(&mut self) -> Option<f64> {
        if self.pending_rate_limits > 0 {
            self.pending_rate_limits -= 1;
            Some(self.retry_after)
        } else {
            None
        }
    }
}
