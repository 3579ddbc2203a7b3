//! Error types for the scholar archive pipeline.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.
//! Every failure is scoped to the request that produced it; nothing here is retried.

use std::fmt;

use crate::store::StoreError;

/// Required input was missing or blank.
///
/// Raised before any I/O by the fetcher, and by the mapper for articles without a title.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Validation error: '{field}' {message}")]
pub struct ValidationError {
    /// Field that failed validation
    pub field: String,
    /// Validation error message
    pub message: String,
}

impl ValidationError {
    /// Create a validation error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }

    /// Error for a required string that is empty or whitespace.
    #[must_use]
    pub fn blank(field: impl Into<String>) -> Self {
        Self::new(field, "is required and cannot be blank")
    }
}

/// Coarse error classification, stable across message wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Auth,
    NotFound,
    Parse,
    UnexpectedStatus,
    Transport,
    Storage,
}

impl ErrorKind {
    /// Snake-case name used in HTTP error bodies and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Auth => "auth",
            Self::NotFound => "not_found",
            Self::Parse => "parse",
            Self::UnexpectedStatus => "unexpected_status",
            Self::Transport => "transport",
            Self::Storage => "storage",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from fetching an author profile.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    /// Subject id or credential was blank; no request was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Credential rejected by the search API (401/403 response)
    #[error("Authentication/authorization failed (HTTP {status}). Check your API key. Response: {body}")]
    Auth {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Author id not recognized by the search API (404 response)
    #[error("Not found (HTTP {status}). The author id may not exist. Response: {body}")]
    NotFound {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// 200 response whose body is not valid JSON
    #[error("Failed to parse JSON response: {message}")]
    Parse {
        /// Parser message
        message: String,
    },

    /// Any other HTTP status
    #[error("Unexpected HTTP status {status}. Response: {body}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// HTTP transport error (connection, DNS, TLS, timeout, etc.)
    #[error("Transport error while calling the search API: {0}")]
    Transport(#[from] reqwest::Error),
}

impl FetchError {
    /// Create an auth error.
    #[must_use]
    pub fn auth(status: u16, body: impl Into<String>) -> Self {
        Self::Auth { status, body: body.into() }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(status: u16, body: impl Into<String>) -> Self {
        Self::NotFound { status, body: body.into() }
    }

    /// Create an unexpected status error.
    #[must_use]
    pub fn unexpected_status(status: u16, body: impl Into<String>) -> Self {
        Self::UnexpectedStatus { status, body: body.into() }
    }

    /// Create a parse error from the parser's message.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse { message: message.into() }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Auth { .. } => ErrorKind::Auth,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::UnexpectedStatus { .. } => ErrorKind::UnexpectedStatus,
            Self::Transport(_) => ErrorKind::Transport,
        }
    }

    /// Upstream HTTP status, when one was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Auth { status, .. }
            | Self::NotFound { status, .. }
            | Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Parse { .. } => Some(200),
            Self::Validation(_) | Self::Transport(_) => None,
        }
    }

    /// Returns true if the request hit the configured timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}

/// Errors from the archive service and its HTTP surface.
#[derive(thiserror::Error, Debug)]
pub enum ArchiveError {
    /// Error from the search API client
    #[error("API error: {0}")]
    Fetch(#[from] FetchError),

    /// Article input failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Storage collaborator failed
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// Neither the request nor the configuration supplied an API key
    #[error("No API key supplied and none configured (set SERPAPI_API_KEY)")]
    MissingCredential,
}

impl ArchiveError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Fetch(e) => e.kind(),
            Self::Validation(_) | Self::MissingCredential => ErrorKind::Validation,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }

    /// HTTP status the routing layer answers with.
    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Fetch(e) if e.is_timeout() => 504,
            _ => match self.kind() {
                ErrorKind::Validation => 400,
                ErrorKind::Auth => 401,
                ErrorKind::NotFound => 404,
                ErrorKind::Parse | ErrorKind::UnexpectedStatus | ErrorKind::Transport => 502,
                ErrorKind::Storage => 500,
            },
        }
    }

    /// Convert to a user-friendly error message for HTTP and CLI output.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::Fetch(FetchError::Validation(e)) | Self::Validation(e) => {
                format!("Invalid input for '{}': {}", e.field, e.message)
            }
            Self::Fetch(e @ FetchError::Transport(_)) if e.is_timeout() => {
                "The search API did not respond in time. Please try again later.".to_string()
            }
            Self::Fetch(e) => e.to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type alias for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Result type alias for service operations.
pub type ArchiveResult<T> = Result<T, ArchiveError>;
