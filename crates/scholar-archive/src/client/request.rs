//! Validated fetch requests and search URL construction.

use url::Url;

use crate::config::{Config, api};
use crate::error::ValidationError;

/// Query parameter holding the credential; redacted in logs.
const API_KEY_PARAM: &str = "api_key";

/// A subject id and credential, both known to be non-blank.
#[derive(Clone, PartialEq, Eq)]
pub struct FetchRequest {
    subject_id: String,
    credential: String,
}

impl FetchRequest {
    /// Validate and build a request. No I/O happens here.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if either value is empty or whitespace.
    pub fn new(
        subject_id: impl Into<String>,
        credential: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let subject_id = subject_id.into();
        let credential = credential.into();

        if subject_id.trim().is_empty() {
            return Err(ValidationError::blank("authorId"));
        }
        if credential.trim().is_empty() {
            return Err(ValidationError::blank("apiKey"));
        }

        Ok(Self { subject_id, credential })
    }

    #[must_use]
    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    #[must_use]
    pub fn credential(&self) -> &str {
        &self.credential
    }

    /// Build the search URL, percent-encoding every parameter.
    ///
    /// # Errors
    ///
    /// Returns error if the configured base URL cannot be parsed.
    pub fn search_url(&self, config: &Config) -> Result<Url, url::ParseError> {
        let base = format!("{}/", config.search_api_url.trim_end_matches('/'));
        let mut url = Url::parse(&base)?.join(api::SEARCH_PATH)?;

        url.query_pairs_mut()
            .append_pair("engine", &config.engine)
            .append_pair("author_id", &self.subject_id)
            .append_pair(API_KEY_PARAM, &self.credential)
            .append_pair("hl", &config.locale);

        Ok(url)
    }
}

impl std::fmt::Debug for FetchRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchRequest").field("subject_id", &self.subject_id).finish_non_exhaustive()
    }
}

/// Copy of `url` with the credential replaced by `***`, safe to log.
#[must_use]
pub fn redact_url(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == API_KEY_PARAM { "***".into() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();

    if !pairs.is_empty() {
        redacted.query_pairs_mut().clear().extend_pairs(pairs);
    }
    redacted.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_inputs_rejected() {
        assert_eq!(FetchRequest::new("", "key").unwrap_err().field, "authorId");
        assert_eq!(FetchRequest::new("  \t", "key").unwrap_err().field, "authorId");
        assert_eq!(FetchRequest::new("abc", "").unwrap_err().field, "apiKey");
        assert_eq!(FetchRequest::new("abc", "\n").unwrap_err().field, "apiKey");
        assert!(FetchRequest::new("abc", "key").is_ok());
    }

    #[test]
    fn test_search_url_encodes_parameters() {
        let config = Config::default();
        let request = FetchRequest::new("4bah YMk&AAAAJ", "k=y").unwrap();
        let url = request.search_url(&config).unwrap();

        assert_eq!(url.path(), "/search.json");
        let query = url.query().unwrap();
        assert!(query.starts_with("engine=google_scholar_author&author_id="));
        assert!(query.contains("author_id=4bah+YMk%26AAAAJ"));
        assert!(query.contains("api_key=k%3Dy"));
        assert!(query.ends_with("hl=en"));
    }

    #[test]
    fn test_search_url_with_path_prefix() {
        let config = Config::for_testing("http://127.0.0.1:9000/serp/");
        let request = FetchRequest::new("a", "b").unwrap();
        let url = request.search_url(&config).unwrap();
        assert_eq!(url.path(), "/serp/search.json");
    }

    #[test]
    fn test_redact_url_hides_credential() {
        let config = Config::default();
        let request = FetchRequest::new("abc", "super-secret").unwrap();
        let url = request.search_url(&config).unwrap();

        let redacted = redact_url(&url);
        assert!(!redacted.contains("super-secret"));
        assert!(redacted.contains("api_key=***") || redacted.contains("api_key=%2A%2A%2A"));
        assert!(redacted.contains("author_id=abc"));
    }

    #[test]
    fn test_debug_hides_credential() {
        let request = FetchRequest::new("abc", "super-secret").unwrap();
        assert!(!format!("{request:?}").contains("super-secret"));
    }
}
