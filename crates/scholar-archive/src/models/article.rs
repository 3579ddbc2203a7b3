//! Article models: the client-facing DTO and the persisted record.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::normalize::{RAW_CITED_BY, RenameOutcome, rename_cited_by};

/// One article as received from a client (or a canonical profile) for archiving.
///
/// Fields outside this set are ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDto {
    /// Article title (required by the mapper).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Venue and volume line, e.g. "Nature 521 (7553), 436-444".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication: Option<String>,

    /// Link to the article page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Publication year as text. JSON numbers are accepted too.
    #[serde(default, deserialize_with = "year_text", skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,

    /// Citation summary. Accepts the un-normalized `cited_by` key as well.
    #[serde(default, alias = "cited_by", skip_serializing_if = "Option::is_none")]
    pub cited_by: Option<CitedBy>,

    /// Author list as a single comma-separated string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<String>,
}

impl ArticleDto {
    /// Create a DTO with just a title.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self { title: Some(title.into()), ..Default::default() }
    }

    /// Deserialize an article written in either key convention.
    ///
    /// An object `cited_by` replaces `citedBy`, as in normalization. A non-object
    /// `cited_by` carries no citation summary and is dropped.
    ///
    /// # Errors
    ///
    /// Returns error if a declared field has the wrong JSON type.
    pub fn from_json(mut value: Value) -> serde_json::Result<Self> {
        if rename_cited_by(&mut value) == RenameOutcome::NotAnObject {
            if let Some(fields) = value.as_object_mut() {
                fields.remove(RAW_CITED_BY);
            }
        }
        serde_json::from_value(value)
    }

    /// Citation count, if the nested citation object carries one.
    #[must_use]
    pub fn citation_value(&self) -> Option<i64> {
        self.cited_by.as_ref()?.value
    }
}

/// Nested citation summary (`{"value": 123, "link": .., "cites_id": ..}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CitedBy {
    #[serde(default)]
    pub value: Option<i64>,

    /// Links and ids the archive does not use.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CitedBy {
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self { value: Some(value), extra: Map::new() }
    }
}

/// Persistence-ready article, one row of `scholarly_articles`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorableArticle {
    /// Database-assigned identifier; `None` until stored.
    #[serde(default)]
    pub id: Option<i64>,

    pub title: String,

    pub authors: String,

    /// Publication venue combined with the year, e.g. "Annals of Physics, 1905".
    pub publication_date: String,

    pub abstract_text: String,

    pub link: String,

    pub keywords: String,

    pub cited_by: i64,
}

impl StorableArticle {
    /// Check if the storage layer has assigned an identifier.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

fn year_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Text(String),
        Number(i64),
    }

    Ok(Option::<Year>::deserialize(deserializer)?.map(|year| match year {
        Year::Text(text) => text,
        Year::Number(n) => n.to_string(),
    }))
}
