//! Raw search API response.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSON document returned by the search API on HTTP 200.
///
/// Expected shape is `{ "author": {..}, "articles": [..], .. }`, but nothing is
/// enforced here: either key may be missing or carry an unexpected type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawPayload(pub Value);

impl RawPayload {
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    /// The `author` object, if present and an object.
    #[must_use]
    pub fn author(&self) -> Option<&Map<String, Value>> {
        self.0.get("author")?.as_object()
    }

    /// The `articles` list, if present and an array.
    #[must_use]
    pub fn articles(&self) -> Option<&[Value]> {
        self.0.get("articles")?.as_array().map(Vec::as_slice)
    }

    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<Value> for RawPayload {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
