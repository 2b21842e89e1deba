//! Authenticated HTTP client for the Kinescope REST API.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::credentials::Credentials;
use super::error::ApiError;

/// Default base URL for the API.
pub const DEFAULT_BASE_URL: &str = "https://api.kinescope.io";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP client for JSON API endpoints.
///
/// Attaches the bearer token to every request and maps non-success
/// responses onto [`ApiError`]. Designed to be created once and shared;
/// cloning is cheap (the underlying connection pool is reused).
///
/// # Example
///
/// ```no_run
/// use kinescope_client::{ApiClient, Credentials};
///
/// let credentials = Credentials::new("my-api-key").unwrap();
/// let client = ApiClient::new(credentials);
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

impl ApiClient {
    /// Creates a client against the production API.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self::with_base_url(credentials, DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom base URL.
    ///
    /// Used for staging environments and mock servers in tests.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_base_url(credentials: Credentials, base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .gzip(true)
            .user_agent(default_user_agent())
            .build()
            .expect("failed to build HTTP client with static configuration");

        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        }
    }

    /// Returns the configured base URL (no trailing slash).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues an authenticated GET and decodes the JSON response.
    ///
    /// `query` pairs are appended to the URL; callers skip unset filters
    /// rather than sending empty values.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] on transport failures,
    /// [`ApiError::Status`] for non-2xx responses, and
    /// [`ApiError::Decode`] when a success body does not match `T`.
    #[instrument(level = "debug", skip(self, query), fields(endpoint = %endpoint))]
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.endpoint_url(endpoint);
        debug!(url = %url, "sending API request");

        let mut request = self
            .http
            .get(&url)
            .header(
                reqwest::header::AUTHORIZATION,
                self.credentials.authorization_header(),
            )
            .header(reqwest::header::ACCEPT, "application/json");

        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::network(&url, e))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::network(&url, e))?;

        if !status.is_success() {
            debug!(status = status.as_u16(), "API request failed");
            return Err(ApiError::from_response(status.as_u16(), body, headers));
        }

        serde_json::from_str(&body).map_err(|e| ApiError::decode(&url, e))
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

/// Default User-Agent identifying the client library.
fn default_user_agent() -> String {
    format!("kinescope-client-rs/{}", env!("CARGO_PKG_VERSION"))
}
