//! Reshape a raw author payload into the canonical flat profile.
//!
//! Pure and synchronous. The rules are fixed to the `google_scholar_author`
//! response shape:
//! - every key under `author` is promoted to the top level
//! - `articles` is always present (empty when the payload has none)
//! - inside each article, an object-valued `cited_by` becomes `citedBy`

use serde_json::{Map, Value};

use crate::models::{CanonicalProfile, RawPayload};

/// Key used by the search API for the nested citation object.
pub const RAW_CITED_BY: &str = "cited_by";

/// Key the canonical schema uses for the same object.
pub const CANONICAL_CITED_BY: &str = "citedBy";

/// What [`rename_cited_by`] did to one article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameOutcome {
    /// `cited_by` object moved to `citedBy`.
    Renamed,
    /// No `cited_by`, and `citedBy` already present.
    AlreadyCanonical,
    /// Neither key present.
    Absent,
    /// `cited_by` present but not an object; left untouched.
    NotAnObject,
    /// The article itself is not a JSON object; left untouched.
    NotARecord,
}

/// Normalize a fetched payload.
#[must_use]
pub fn normalize(raw: RawPayload) -> CanonicalProfile {
    let mut root = match raw.into_inner() {
        Value::Object(root) => root,
        other => {
            tracing::debug!(kind = json_kind(&other), "Payload is not an object; nothing to normalize");
            Map::new()
        }
    };

    let mut author = match root.remove("author") {
        Some(Value::Object(author)) => author,
        Some(other) => {
            tracing::debug!(kind = json_kind(&other), "Ignoring non-object author");
            Map::new()
        }
        None => Map::new(),
    };
    // The payload's own list always owns the `articles` name.
    author.remove("articles");

    let articles = match root.remove("articles") {
        Some(Value::Array(articles)) => articles.into_iter().map(canonicalize_article).collect(),
        Some(other) => {
            tracing::debug!(kind = json_kind(&other), "Ignoring non-array articles");
            Vec::new()
        }
        None => Vec::new(),
    };

    CanonicalProfile { author, articles }
}

/// Apply the per-article key rename, returning the (possibly) updated article.
#[must_use]
pub fn canonicalize_article(mut article: Value) -> Value {
    rename_cited_by(&mut article);
    article
}

/// Move an object-valued `cited_by` to `citedBy`, in place.
///
/// Case-exact and idempotent. Other keys are never touched. If both keys are
/// present and `cited_by` is an object, it replaces the existing `citedBy`.
pub fn rename_cited_by(article: &mut Value) -> RenameOutcome {
    let Some(fields) = article.as_object_mut() else {
        return RenameOutcome::NotARecord;
    };

    match fields.get(RAW_CITED_BY).map(Value::is_object) {
        Some(true) => {
            if let Some(cited_by) = fields.remove(RAW_CITED_BY) {
                fields.insert(CANONICAL_CITED_BY.to_string(), cited_by);
            }
            RenameOutcome::Renamed
        }
        Some(false) => RenameOutcome::NotAnObject,
        None if fields.contains_key(CANONICAL_CITED_BY) => RenameOutcome::AlreadyCanonical,
        None => RenameOutcome::Absent,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
