//! Output formatters for Markdown and JSON.

mod markdown;

pub use markdown::*;

use serde::{Deserialize, Serialize};

use crate::models::CanonicalProfile;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Human-readable Markdown format.
    #[default]
    Markdown,
    /// Machine-readable JSON format.
    Json,
}

impl ResponseFormat {
    /// Check if this is JSON format.
    #[must_use]
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Render a canonical profile in the requested format.
///
/// # Errors
///
/// Returns error if JSON serialization fails.
pub fn render_profile(
    profile: &CanonicalProfile,
    format: ResponseFormat,
) -> serde_json::Result<String> {
    match format {
        ResponseFormat::Markdown => Ok(format_profile_markdown(profile)),
        ResponseFormat::Json => serde_json::to_string_pretty(profile),
    }
}
