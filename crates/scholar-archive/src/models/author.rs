//! Canonical author profile produced by the normalizer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ArticleDto;

/// Flattened author profile.
///
/// Every field found under the payload's `author` object sits at the top level,
/// next to an always-present `articles` list whose elements use `citedBy`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalProfile {
    /// Promoted author fields, including ones outside [`AuthorInfo`].
    #[serde(flatten)]
    pub author: Map<String, Value>,

    /// Canonical articles.
    #[serde(default)]
    pub articles: Vec<Value>,
}

impl CanonicalProfile {
    /// Look up a promoted author field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.author.get(key)
    }

    /// Author name, if the payload had one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.get("name")?.as_str()
    }

    /// Affiliations line, if the payload had one.
    #[must_use]
    pub fn affiliations(&self) -> Option<&str> {
        self.get("affiliations")?.as_str()
    }

    /// True when the payload carried no author fields at all.
    #[must_use]
    pub fn has_author(&self) -> bool {
        !self.author.is_empty()
    }

    /// Typed view of the author fields. Unknown fields land in [`AuthorInfo::extra`].
    ///
    /// # Errors
    ///
    /// Returns error if a declared field has the wrong JSON type.
    pub fn author_info(&self) -> serde_json::Result<AuthorInfo> {
        serde_json::from_value(Value::Object(self.author.clone()))
    }

    /// Deserialize each article into an [`ArticleDto`], keeping per-article failures.
    #[must_use]
    pub fn article_dtos(&self) -> Vec<serde_json::Result<ArticleDto>> {
        self.articles.iter().map(|a| ArticleDto::from_json(a.clone())).collect()
    }
}

/// Typed author fields of a canonical profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorInfo {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub affiliations: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub website: Option<String>,

    #[serde(default)]
    pub thumbnail: Option<String>,

    #[serde(default)]
    pub interests: Option<Vec<Interest>>,

    /// Fields the typed view does not declare.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AuthorInfo {
    /// Get the author name, falling back to "Unknown author" if not available.
    #[must_use]
    pub fn name_or_default(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown author")
    }

    /// Interest titles in payload order.
    #[must_use]
    pub fn interest_titles(&self) -> Vec<&str> {
        self.interests
            .iter()
            .flatten()
            .filter_map(|i| i.title.as_deref())
            .collect()
    }
}

/// Research interest tag on a scholar profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interest {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub link: Option<String>,

    #[serde(default)]
    pub serpapi_link: Option<String>,
}
