//! The Event entity and its listing behaviour.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::BugsnagClient;
use crate::error::Result;
use crate::pagination::PageParams;
use crate::traits::{List, DEFAULT_PAGE_SIZE};

/// A single occurrence of an error in a Bugsnag project.
///
/// Events are deeply nested and their shape varies with the reporting
/// notifier, so the payload is kept as a raw JSON tree rather than a
/// fixed struct. Fields are reached with [`lookup`](Event::lookup) using
/// dotted paths such as `metaData.request.url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Event(Value);

impl Event {
    /// Wrap a raw JSON value as an event.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The event id, if present.
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    /// When the event was received by Bugsnag, as reported by the API.
    pub fn received_at(&self) -> Option<&str> {
        self.0.get("received_at").and_then(Value::as_str)
    }

    /// Resolve a dotted path against the event tree.
    ///
    /// Each segment indexes into a nested object by key; segments that
    /// parse as integers also index into arrays. Returns `None` when any
    /// segment is absent, which is distinct from a present JSON `null`
    /// (`Some(&Value::Null)`).
    ///
    /// # Example
    ///
    /// ```
    /// use bugsnag_export::Event;
    /// use serde_json::json;
    ///
    /// let event = Event::new(json!({
    ///     "metaData": {"user": {"id": "u-1", "plan": null}}
    /// }));
    /// assert_eq!(event.lookup("metaData.user.id"), Some(&json!("u-1")));
    /// assert_eq!(event.lookup("metaData.user.plan"), Some(&json!(null)));
    /// assert_eq!(event.lookup("metaData.user.email"), None);
    /// ```
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut current = &self.0;
        for segment in path.split('.') {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => {
                    let index: usize = segment.parse().ok()?;
                    items.get(index)?
                }
                _ => return None,
            };
        }
        Some(current)
    }

    /// Borrow the underlying JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

#[async_trait]
impl List for Event {
    /// Project id and error id the events belong to.
    type Scope = (String, String);

    fn path(scope: &(String, String)) -> String {
        let (project_id, error_id) = scope;
        let project_id = urlencoding::encode(project_id);
        let error_id = urlencoding::encode(error_id);
        format!("projects/{project_id}/errors/{error_id}/events")
    }

    fn page_params() -> PageParams {
        PageParams {
            per_page: Some(DEFAULT_PAGE_SIZE),
            sort: Some("timestamp".to_string()),
            direction: Some("desc".to_string()),
            full_reports: Some(true),
        }
    }
}

/// Fetch events for one error, newest first, bounded by `max_events`.
///
/// Full report detail is requested so that `metaData` and other nested
/// sections are present on every event.
#[tracing::instrument(skip(client))]
pub async fn get_events(
    client: &BugsnagClient,
    project_id: &str,
    error_id: &str,
    max_events: Option<usize>,
) -> Result<Vec<Event>> {
    let scope = (project_id.to_string(), error_id.to_string());
    Event::list(client, &scope, max_events).await
}
