//! Bugsnag API client.
//!
//! Low-level HTTP client that handles authentication, rate-limit retries,
//! and raw requests. Listing operations are implemented via the [`List`]
//! trait on model types.
//!
//! [`List`]: crate::traits::List

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, AUTHORIZATION, RETRY_AFTER};
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use url::Url;

use crate::error::{BugsnagError, Result};

/// Base URL used when `BUGSNAG_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "https://api.bugsnag.com";

const USER_AGENT: &str = concat!("bugsnag-export/", env!("CARGO_PKG_VERSION"));

/// Data Access API version, sent as `X-Version` on every request.
const API_VERSION_HEADER: &str = "X-Version";
const API_VERSION: &str = "2";

/// Low-level Bugsnag API client.
///
/// Handles authentication and HTTP requests, transparently retrying when
/// the API answers with HTTP 429. Listing operations live on the model
/// types via the [`List`](crate::traits::List) trait.
///
/// Cloning is cheap: clones share one connection pool.
///
/// # Example
///
/// ```no_run
/// use bugsnag_export::BugsnagClient;
///
/// # fn example() -> bugsnag_export::Result<()> {
/// // From the BUGSNAG_API_KEY / BUGSNAG_API_URL env vars
/// let client = BugsnagClient::from_env()?;
///
/// // Or with explicit settings
/// let client = BugsnagClient::new("your-api-key", "https://api.bugsnag.com")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct BugsnagClient {
    http: Client,
    base_url: Arc<Url>,
    token: String,
}

impl std::fmt::Debug for BugsnagClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BugsnagClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl BugsnagClient {
    /// Build a client from the environment.
    ///
    /// `BUGSNAG_API_KEY` supplies the auth token; `BUGSNAG_API_URL`
    /// overrides the default base URL when set.
    ///
    /// # Errors
    ///
    /// Fails with `ConfigMissing` when `BUGSNAG_API_KEY` is absent.
    pub fn from_env() -> Result<Self> {
        let token = env::var("BUGSNAG_API_KEY").map_err(|_| {
            BugsnagError::ConfigMissing("BUGSNAG_API_KEY environment variable not set".to_string())
        })?;

        let base_url = env::var("BUGSNAG_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::new(&token, &base_url)
    }

    /// Build a client for `base_url`, authenticating with `token`.
    ///
    /// The token is a Bugsnag personal auth token. The URL may be given
    /// with or without a trailing slash.
    ///
    /// # Errors
    ///
    /// Fails when `base_url` does not parse as a URL.
    pub fn new(token: &str, base_url: &str) -> Result<Self> {
        // Url::join needs the trailing slash to keep the full path
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(BugsnagError::Http)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token: token.to_string(),
        })
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Make a GET request with query parameters against a path relative to
    /// the base URL.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Response> {
        let url = self.base_url.join(path)?;
        self.execute(url, Some(query)).await
    }

    /// Make a GET request against an absolute URL, typically a pagination
    /// cursor. The URL is used verbatim; no query parameters are attached.
    #[tracing::instrument(skip(self))]
    pub async fn get_url(&self, url: Url) -> Result<Response> {
        self.execute::<()>(url, None).await
    }

    /// Send one authenticated GET, retrying for as long as the server
    /// answers with HTTP 429.
    ///
    /// The retry loop is deliberately unbounded: against a well-behaved
    /// server every request eventually succeeds. Each wait is logged so a
    /// stuck loop is visible with `RUST_LOG=debug`.
    async fn execute<Q: Serialize + ?Sized>(&self, url: Url, query: Option<&Q>) -> Result<Response> {
        loop {
            let mut request = self
                .http
                .get(url.clone())
                .header(AUTHORIZATION, format!("token {}", self.token))
                .header(API_VERSION_HEADER, API_VERSION);
            if let Some(query) = query {
                request = request.query(query);
            }

            let response = request.send().await.map_err(BugsnagError::Http)?;

            if response.status() == StatusCode::TOO_MANY_REQUESTS {
                let wait = retry_after_delay(response.headers());
                tracing::debug!(?wait, url = %url, "rate limited, waiting before retry");
                tokio::time::sleep(wait).await;
                continue;
            }

            return Self::check_response(response).await;
        }
    }

    /// Turn non-success responses into `Api` errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let message = Self::extract_error_message(response, status).await;
        Err(BugsnagError::Api {
            message,
            status_code: Some(status.as_u16()),
        })
    }

    /// Extract an error message from a failed response.
    ///
    /// Bugsnag error bodies carry an `errors` array of strings, joined here
    /// with `", "`. Unreadable or unrecognised bodies fall back to a generic
    /// `HTTP <status>` message.
    async fn extract_error_message(response: Response, status: StatusCode) -> String {
        let generic = format!("HTTP {status}");

        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return generic,
        };

        if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
            if let Some(errors) = json.get("errors").and_then(|e| e.as_array()) {
                let joined = errors
                    .iter()
                    .filter_map(|e| e.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                if !joined.is_empty() {
                    return joined;
                }
            }
        }

        generic
    }
}

/// Parse a `Retry-After` header into the wait before the next attempt.
///
/// Missing, malformed, or negative values collapse to zero, which retries
/// immediately; the server is free to rate limit the retry again. Finite
/// values too large for a `Duration` saturate to `Duration::MAX`.
fn retry_after_delay(headers: &HeaderMap) -> Duration {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .map(|secs| Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX))
        .unwrap_or(Duration::ZERO)
}
