//! Canned entities for mock server scenarios.

use chrono::{DateTime, Utc};
use serde_json::json;

use super::state::MockState;
use crate::{Event, Organisation, Project};

/// Factories for the entities the mock server serves.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Organisation Fixtures
    // =========================================================================

    /// Create an organisation with the given identifiers.
    pub fn organisation(id: &str, slug: &str, name: &str) -> Organisation {
        Organisation {
            id: id.to_string(),
            slug: slug.to_string(),
            name: Some(name.to_string()),
            created_at: parse_time("2023-06-01T00:00:00Z"),
        }
    }

    // =========================================================================
    // Project Fixtures
    // =========================================================================

    /// Create a project with the given identifiers.
    pub fn project(id: &str, slug: &str, name: &str) -> Project {
        Project {
            id: id.to_string(),
            slug: slug.to_string(),
            name: Some(name.to_string()),
            created_at: parse_time("2023-07-15T09:00:00Z"),
        }
    }

    // =========================================================================
    // Event Fixtures
    // =========================================================================

    /// Create an event with only an id.
    pub fn minimal_event(id: &str) -> Event {
        Event::new(json!({ "id": id }))
    }

    /// Create a full-report style event with nested sections that exercise
    /// dotted-path lookups.
    pub fn event(id: &str, received_at: &str) -> Event {
        Event::new(json!({
            "id": id,
            "received_at": received_at,
            "severity": "error",
            "unhandled": true,
            "context": "GET /checkout",
            "app": {
                "releaseStage": "production",
                "version": "1.4.2"
            },
            "device": {
                "hostname": "web-1",
                "osName": "linux"
            },
            "user": {
                "id": "u-1001",
                "email": "jo@example.com"
            },
            "metaData": {
                "request": {
                    "url": "https://shop.example.com/checkout"
                },
                "subscription": {
                    "plan": "pro",
                    "seats": 5,
                    "trial": null
                }
            },
            "exceptions": [
                {
                    "errorClass": "RuntimeError",
                    "message": "boom"
                }
            ]
        }))
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// The stock dataset most tests run against: two organisations, three
    /// projects, and events for two errors under `proj-web`.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario::new()
    }
}

fn parse_time(value: &str) -> Option<DateTime<Utc>> {
    value.parse().ok()
}

/// Related organisations, projects, and events forming one dataset.
pub struct DefaultScenario {
    pub organisations: Vec<Organisation>,
    /// Projects paired with the id of their owning organisation.
    pub projects: Vec<(String, Project)>,
    /// Events keyed by (project id, error id), newest first.
    pub events: Vec<(String, String, Vec<Event>)>,
}

impl DefaultScenario {
    fn new() -> Self {
        let organisations = vec![
            Fixtures::organisation("org-1", "acme", "Acme Corp"),
            Fixtures::organisation("org-2", "globex", "Globex Corporation"),
        ];

        let projects = vec![
            (
                "org-1".to_string(),
                Fixtures::project("proj-web", "acme-web", "Acme Web"),
            ),
            (
                "org-1".to_string(),
                Fixtures::project("proj-api", "acme-api", "Acme API"),
            ),
            (
                "org-2".to_string(),
                Fixtures::project("proj-site", "globex-site", "Globex Site"),
            ),
        ];

        let events = vec![
            (
                "proj-web".to_string(),
                "err-checkout".to_string(),
                vec![
                    Fixtures::event("evt-3", "2024-03-03T08:15:00Z"),
                    Fixtures::event("evt-2", "2024-03-02T12:00:00Z"),
                    Fixtures::event("evt-1", "2024-03-01T09:30:00Z"),
                ],
            ),
            (
                "proj-web".to_string(),
                "err-signup".to_string(),
                vec![Fixtures::event("evt-s1", "2024-02-20T16:45:00Z")],
            ),
        ];

        Self {
            organisations,
            projects,
            events,
        }
    }

    /// Load the scenario into server state.
    pub fn into_state(self) -> MockState {
        let mut state = MockState::new();
        state.organisations = self.organisations;

        for (organisation_id, project) in self.projects {
            state
                .projects
                .entry(organisation_id)
                .or_default()
                .push(project);
        }

        for (project_id, error_id, events) in self.events {
            state.events.insert((project_id, error_id), events);
        }

        state
    }
}
