//! The Project entity and its listing behaviour.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::BugsnagClient;
use crate::error::Result;
use crate::pagination::PageParams;
use crate::traits::{List, Resolve, DEFAULT_PAGE_SIZE};

/// A Bugsnag project.
///
/// Projects sit under an organisation and group errors by application.
/// Exported events always belong to one project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Stable identifier assigned by the API.
    pub id: String,

    /// URL slug, accepted interchangeably with the id when resolving.
    pub slug: String,

    /// Display name.
    #[serde(default)]
    pub name: Option<String>,

    /// When the project was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[async_trait]
impl List for Project {
    /// Organisation id the projects belong to.
    type Scope = String;

    fn path(organisation_id: &String) -> String {
        let encoded = urlencoding::encode(organisation_id);
        format!("organizations/{encoded}/projects")
    }

    fn page_params() -> PageParams {
        PageParams {
            per_page: Some(DEFAULT_PAGE_SIZE),
            sort: Some("created_at".to_string()),
            direction: Some("desc".to_string()),
            ..Default::default()
        }
    }
}

impl Resolve for Project {
    fn id(&self) -> &str {
        &self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }
}

/// Fetch all projects under an organisation, newest first.
#[tracing::instrument(skip(client))]
pub async fn get_projects(client: &BugsnagClient, organisation_id: &str) -> Result<Vec<Project>> {
    Project::list_all(client, &organisation_id.to_string()).await
}
