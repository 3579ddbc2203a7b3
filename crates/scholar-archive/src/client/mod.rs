//! SerpAPI Google Scholar author client.
//!
//! Provides the pipeline's fetch step:
//! - Input validation before any network I/O
//! - One GET per call, bounded by the configured timeout
//! - Status-code classification into [`FetchError`]
//!
//! There is no retry and no response cache. The credential travels with each
//! request and is never stored on the client.

mod request;

pub use request::{FetchRequest, redact_url};

use std::time::Instant;

use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde_json::Value;

use crate::config::{Config, api};
use crate::error::{FetchError, FetchResult, ValidationError};
use crate::models::RawPayload;

/// Google Scholar author client.
#[derive(Clone)]
pub struct ScholarClient {
    /// HTTP client; safe to share across concurrent fetches.
    http: Client,

    /// Endpoint settings, with the central API key stripped.
    endpoint: Config,
}

impl ScholarClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        url::Url::parse(&config.search_api_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        Ok(Self { http, endpoint: config.with_api_key(None) })
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.endpoint.search_api_url
    }

    /// Fetch an author profile by subject id and credential.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Validation`] without any network I/O if either
    /// argument is blank; otherwise see [`ScholarClient::fetch_author`].
    pub async fn fetch(&self, subject_id: &str, credential: &str) -> FetchResult<RawPayload> {
        let request = FetchRequest::new(subject_id, credential)?;
        self.fetch_author(&request).await
    }

    /// Fetch an author profile with a validated request.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Auth`] on 401/403
    /// - [`FetchError::NotFound`] on 404
    /// - [`FetchError::UnexpectedStatus`] on any other non-200 status
    /// - [`FetchError::Parse`] if a 200 body is not JSON
    /// - [`FetchError::Transport`] if no response arrived (including timeout)
    #[tracing::instrument(name = "fetch_author", skip_all, fields(subject_id = %request.subject_id()))]
    pub async fn fetch_author(&self, request: &FetchRequest) -> FetchResult<RawPayload> {
        let url = request
            .search_url(&self.endpoint)
            .map_err(|e| ValidationError::new("searchApiUrl", e.to_string()))?;

        tracing::debug!(url = %redact_url(&url), "Requesting author profile");
        let started = Instant::now();

        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, timeout = e.is_timeout(), "Search API unreachable");
                return Err(FetchError::Transport(e));
            }
        };

        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(
            status,
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            bytes = body.len(),
            "Search API responded"
        );

        let result = classify_response(status, body);
        if let Err(ref e) = result {
            tracing::warn!(kind = %e.kind(), status, "Author fetch failed");
        }
        result
    }
}

/// Map an HTTP status and body to the fetch outcome.
fn classify_response(status: u16, body: String) -> FetchResult<RawPayload> {
    match status {
        200 => serde_json::from_str::<Value>(&body)
            .map(RawPayload::new)
            .map_err(|e| FetchError::parse(e.to_string())),
        401 | 403 => Err(FetchError::auth(status, body)),
        404 => Err(FetchError::not_found(status, body)),
        _ => Err(FetchError::unexpected_status(status, body)),
    }
}

impl std::fmt::Debug for ScholarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScholarClient").field("base_url", &self.base_url()).finish()
    }
}
