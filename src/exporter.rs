//! Event export orchestration.
//!
//! [`ExportTarget::resolve`] turns user-supplied organisation and project
//! filters into concrete API identifiers, and [`Exporter`] fetches the
//! matching events and renders them as CSV.

use crate::client::BugsnagClient;
use crate::error::{BugsnagError, Result};
use crate::models::{get_events, get_organisations, get_projects, Event, Organisation, Project};
use crate::output::{self, ColumnSpec, ValueEncodings};
use crate::traits::select_by_filter;

/// A fully resolved export target.
///
/// Holding resolved entities rather than raw filters means an `Exporter`
/// can only be built once the organisation and project lookups have
/// succeeded.
#[derive(Debug, Clone)]
pub struct ExportTarget {
    /// The resolved organisation.
    pub organisation: Organisation,
    /// The resolved project.
    pub project: Project,
    /// Error ids whose events will be exported.
    pub error_ids: Vec<String>,
}

impl ExportTarget {
    /// Resolve organisation and project filters into a concrete target.
    ///
    /// Filters match on exact id or slug. An absent (or empty)
    /// organisation filter selects the first organisation on the account,
    /// which covers accounts that only have one.
    ///
    /// # Errors
    ///
    /// Fails with a precondition error when `error_ids` is empty, and
    /// with a not-found error when either lookup has no match.
    #[tracing::instrument(skip(client))]
    pub async fn resolve(
        client: &BugsnagClient,
        organisation_filter: Option<&str>,
        project_filter: &str,
        error_ids: Vec<String>,
    ) -> Result<Self> {
        if error_ids.is_empty() {
            return Err(BugsnagError::Precondition(
                "at least one error id must be set before events can be fetched",
            ));
        }

        // An empty filter string behaves like no filter at all
        let organisation_filter = organisation_filter.filter(|f| !f.is_empty());

        let organisations = get_organisations(client).await?;
        let organisation = select_by_filter(&organisations, organisation_filter)
            .ok_or_else(|| BugsnagError::not_found("organisation", organisation_filter))?
            .clone();
        tracing::debug!(id = %organisation.id, slug = %organisation.slug, "resolved organisation");

        let projects = get_projects(client, &organisation.id).await?;
        let project = select_by_filter(&projects, Some(project_filter))
            .ok_or_else(|| BugsnagError::not_found("project", Some(project_filter)))?
            .clone();
        tracing::debug!(id = %project.id, slug = %project.slug, "resolved project");

        Ok(Self {
            organisation,
            project,
            error_ids,
        })
    }
}

/// Fetches and renders events for a resolved target.
///
/// # Example
///
/// ```ignore
/// let client = BugsnagClient::from_env()?;
/// let target = ExportTarget::resolve(&client, Some("acme"), "my-app", error_ids).await?;
/// let csv = Exporter::new(&client, target)
///     .export_csv(Some(100), &columns, &ValueEncodings::default())
///     .await?;
/// ```
#[derive(Debug)]
pub struct Exporter<'a> {
    client: &'a BugsnagClient,
    target: ExportTarget,
}

impl<'a> Exporter<'a> {
    /// Create an exporter for a resolved target.
    pub fn new(client: &'a BugsnagClient, target: ExportTarget) -> Self {
        Self { client, target }
    }

    /// The target this exporter fetches from.
    pub fn target(&self) -> &ExportTarget {
        &self.target
    }

    /// Fetch events for every error id on the target, in the order the
    /// ids were given. Each error contributes at most `max_events` events.
    #[tracing::instrument(skip(self))]
    pub async fn events(&self, max_events: Option<usize>) -> Result<Vec<Event>> {
        let mut events = Vec::new();
        for error_id in &self.target.error_ids {
            let batch =
                get_events(self.client, &self.target.project.id, error_id, max_events).await?;
            events.extend(batch);
        }
        Ok(events)
    }

    /// Fetch events and render them as CSV.
    ///
    /// Two fixed columns, `id` and `received_at`, always lead the row;
    /// the caller's columns follow in order, without deduplication. Each
    /// entry in `columns` uses the `path[:name]` syntax of
    /// [`ColumnSpec::parse`].
    pub async fn export_csv(
        &self,
        max_events: Option<usize>,
        columns: &[String],
        encodings: &ValueEncodings,
    ) -> Result<String> {
        let column_list = column_list(columns);
        let events = self.events(max_events).await?;

        let mut csv = String::new();

        let header: Vec<String> = column_list.iter().map(|c| c.name.clone()).collect();
        output::write_row(&mut csv, &header);

        for event in &events {
            let row: Vec<String> = column_list
                .iter()
                .map(|column| output::encode_value(event.lookup(&column.path), encodings))
                .collect();
            output::write_row(&mut csv, &row);
        }

        Ok(csv)
    }
}

/// Prepend the fixed `id` and `received_at` columns and parse the rest.
fn column_list(columns: &[String]) -> Vec<ColumnSpec> {
    ["id", "received_at"]
        .iter()
        .copied()
        .chain(columns.iter().map(String::as_str))
        .map(ColumnSpec::parse)
        .collect()
}
