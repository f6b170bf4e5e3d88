//! List trait for fetching paginated collections of entities.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::client::BugsnagClient;
use crate::error::Result;
use crate::pagination::{self, PageParams};

/// Page size requested from the API for list operations.
pub const DEFAULT_PAGE_SIZE: u32 = 30;

/// List entities with cursor pagination.
///
/// Implement this trait for entity types that can be listed. The API
/// returns pages as bare JSON arrays and signals continuation through a
/// `Link` response header; the provided [`list`](List::list) method
/// follows those cursors.
///
/// # Example
///
/// ```ignore
/// use bugsnag_export::{BugsnagClient, Organisation, List};
///
/// let client = BugsnagClient::from_env()?;
///
/// // Fetch every organisation the token can see
/// let organisations = Organisation::list_all(&client, &()).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send + DeserializeOwned {
    /// Parent identifiers needed to build the collection path.
    type Scope: Send + Sync;

    /// Collection path relative to the API base URL.
    fn path(scope: &Self::Scope) -> String;

    /// Query parameters sent with the first page request.
    ///
    /// Cursor URLs already embed these, so they are only attached once.
    fn page_params() -> PageParams {
        PageParams::with_per_page(DEFAULT_PAGE_SIZE)
    }

    /// List entities, following pagination cursors.
    ///
    /// Stops once `max_records` entries have been collected or the last
    /// page is reached, whichever comes first. `None` and `Some(0)` both
    /// mean unlimited.
    ///
    /// # Errors
    ///
    /// Fails when any page request fails; results gathered before the
    /// failure are discarded.
    async fn list(
        client: &BugsnagClient,
        scope: &Self::Scope,
        max_records: Option<usize>,
    ) -> Result<Vec<Self>> {
        // Zero is conflated with "unlimited", not "nothing".
        let limit = max_records.filter(|&max| max > 0);
        let path = Self::path(scope);

        let mut items: Vec<Self> = Vec::new();
        let mut response = client.get_with_query(&path, &Self::page_params()).await?;

        loop {
            // Read the cursor before the body consumes the response.
            let next = pagination::next_link(response.headers())?;

            let page: Vec<Self> = response.json().await?;
            let received = page.len();
            items.extend(page);

            if let Some(limit) = limit {
                if items.len() >= limit {
                    items.truncate(limit);
                    break;
                }
            }

            let next = match next {
                Some(url) => url,
                None => break,
            };

            // Safety stop: a next link on an empty page would loop forever
            if received == 0 {
                tracing::warn!(url = %next, "ignoring pagination cursor on empty page");
                break;
            }

            response = client.get_url(next).await?;
        }

        Ok(items)
    }

    /// List all entities, following pagination to the last page.
    ///
    /// # Errors
    ///
    /// Fails when any page request fails.
    async fn list_all(client: &BugsnagClient, scope: &Self::Scope) -> Result<Vec<Self>> {
        Self::list(client, scope, None).await
    }
}
