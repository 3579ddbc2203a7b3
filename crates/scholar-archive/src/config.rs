//! Configuration for the scholar archive.

use std::time::Duration;

use anyhow::Context;

/// Search API constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for SerpAPI.
    pub const BASE_URL: &str = "https://serpapi.com";

    /// Search endpoint path, relative to the base URL.
    pub const SEARCH_PATH: &str = "search.json";

    /// Engine id for Google Scholar author profiles.
    pub const ENGINE: &str = "google_scholar_author";

    /// Interface language requested from the API.
    pub const LOCALE: &str = "en";

    /// Total request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// Environment variable names read by [`Config::from_env`].
pub mod env {
    /// Central API key, used when a request carries none.
    pub const API_KEY: &str = "SERPAPI_API_KEY";

    /// Override for the search API base URL.
    pub const API_URL: &str = "SCHOLAR_API_URL";

    /// Override for the total request timeout, in seconds.
    pub const REQUEST_TIMEOUT_SECS: &str = "SCHOLAR_REQUEST_TIMEOUT_SECS";
}

/// Archive configuration.
#[derive(Clone)]
pub struct Config {
    /// Centrally configured SerpAPI key (optional).
    pub api_key: Option<String>,

    /// Base URL for the search API (for testing with mock servers).
    pub search_api_url: String,

    /// Engine id sent with every request.
    pub engine: String,

    /// Locale sent as the `hl` parameter.
    pub locale: String,

    /// Total request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,
}

impl Config {
    /// Create a new configuration with an optional central API key.
    ///
    /// A blank key is treated as no key.
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            search_api_url: api::BASE_URL.to_string(),
            engine: api::ENGINE.to_string(),
            locale: api::LOCALE.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
        }
    }

    /// Create a test configuration pointing at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            api_key: None,
            search_api_url: base_url.to_string(),
            engine: api::ENGINE.to_string(),
            locale: api::LOCALE.to_string(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Loads a `.env` file first when one exists.
    ///
    /// # Errors
    ///
    /// Returns error if an override variable is present but invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let mut config = Self::new(std::env::var(env::API_KEY).ok());

        if let Ok(url) = std::env::var(env::API_URL) {
            url::Url::parse(&url)
                .with_context(|| format!("{} is not a valid URL: {url}", env::API_URL))?;
            config.search_api_url = url;
        }

        if let Ok(secs) = std::env::var(env::REQUEST_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().with_context(|| {
                format!("{} must be a whole number of seconds", env::REQUEST_TIMEOUT_SECS)
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Check if a central API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Replace the central API key (blank clears it).
    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.trim().is_empty());
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("has_api_key", &self.has_api_key())
            .field("search_api_url", &self.search_api_url)
            .field("engine", &self.engine)
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}
