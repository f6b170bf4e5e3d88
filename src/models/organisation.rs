//! The Organisation entity and its listing behaviour.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::BugsnagClient;
use crate::error::Result;
use crate::traits::{List, Resolve};

/// A Bugsnag organisation.
///
/// Organisations are the top-level grouping an auth token can see; each
/// one owns the projects whose events can be exported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organisation {
    /// Stable identifier assigned by the API.
    pub id: String,

    /// URL slug, accepted interchangeably with the id when resolving.
    pub slug: String,

    /// Display name.
    #[serde(default)]
    pub name: Option<String>,

    /// When the organisation was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[async_trait]
impl List for Organisation {
    type Scope = ();

    fn path(_scope: &()) -> String {
        // The API spells this endpoint with a z
        "user/organizations".to_string()
    }
}

impl Resolve for Organisation {
    fn id(&self) -> &str {
        &self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }
}

/// Fetch all organisations visible to the auth token.
///
/// # Example
///
/// ```ignore
/// let client = BugsnagClient::from_env()?;
/// for org in get_organisations(&client).await? {
///     println!("{} ({})", org.slug, org.id);
/// }
/// ```
#[tracing::instrument(skip(client))]
pub async fn get_organisations(client: &BugsnagClient) -> Result<Vec<Organisation>> {
    Organisation::list_all(client, &()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organisation_deserialize() {
        let json = r#"{
            "id": "515fb9337c1074f6fd000009",
            "name": "Acme Co",
            "slug": "acme-co",
            "created_at": "2013-04-05T12:00:00Z"
        }"#;
        let org: Organisation = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(org.id, "515fb9337c1074f6fd000009");
        assert_eq!(org.slug, "acme-co");
        assert_eq!(org.name.as_deref(), Some("Acme Co"));
        assert!(org.created_at.is_some());
    }

    #[test]
    fn test_organisation_deserialize_minimal() {
        let json = r#"{"id": "abc", "slug": "abc-slug"}"#;
        let org: Organisation = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(org.id, "abc");
        assert!(org.name.is_none());
        assert!(org.created_at.is_none());
    }

    #[test]
    fn test_organisation_ignores_unknown_fields() {
        let json = r#"{"id": "abc", "slug": "s", "billing_emails": ["a@example.com"]}"#;
        let org: Organisation = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(org.id, "abc");
    }

    #[test]
    fn test_list_path() {
        assert_eq!(Organisation::path(&()), "user/organizations");
    }
}
