//! Error types for Bugsnag API operations.

use thiserror::Error;

/// Errors that can occur while talking to the Bugsnag API or exporting events.
#[derive(Debug, Error)]
pub enum BugsnagError {
    /// Required configuration was not supplied.
    #[error("Bugsnag configuration required: {0}")]
    ConfigMissing(String),

    /// Organisation or project lookup failed.
    #[error("{} not found{}", .entity_type, .filter.as_ref().map(|f| format!(": no match for '{f}'")).unwrap_or_default())]
    NotFound {
        entity_type: &'static str,
        filter: Option<String>,
    },

    /// An export step was called before the identifier chain was resolved.
    #[error("{0}")]
    Precondition(&'static str),

    /// API request failed with a non-success, non-rate-limit status.
    #[error("Bugsnag API error: {message}")]
    Api {
        message: String,
        status_code: Option<u16>,
    },

    /// Transport-level failure from reqwest.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A response body did not match the expected shape.
    #[error("could not decode response: {0}")]
    Parse(#[from] serde_json::Error),

    /// A base or pagination URL failed to parse.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl BugsnagError {
    pub(crate) fn not_found(entity_type: &'static str, filter: Option<&str>) -> Self {
        Self::NotFound {
            entity_type,
            filter: filter.map(str::to_string),
        }
    }
}

/// Result type alias for Bugsnag operations.
pub type Result<T> = core::result::Result<T, BugsnagError>;
