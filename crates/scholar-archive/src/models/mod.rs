//! Data models for the search API payload and the archive.
//!
//! Raw and canonical profiles stay as `serde_json` trees so unknown fields survive
//! normalization; articles use typed structs with `#[serde(default)]` optional fields.

mod article;
mod author;
mod payload;

pub use article::{ArticleDto, CitedBy, StorableArticle};
pub use author::{AuthorInfo, CanonicalProfile, Interest};
pub use payload::RawPayload;
