//! Storage collaborator for archived articles.
//!
//! The archive only needs `save` and `find_all`; any backend that assigns
//! identifiers on save can implement [`ArticleStore`].

mod memory;

pub use memory::MemoryArticleStore;

use crate::models::StorableArticle;

/// Errors from a storage backend.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// Record already carries an identifier
    #[error("Article already persisted with id {0}")]
    AlreadyPersisted(i64),

    /// Backend-specific failure
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Result type alias for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for storable articles.
#[async_trait::async_trait]
pub trait ArticleStore: Send + Sync {
    /// Persist a new article, returning it with its identifier populated.
    async fn save(&self, article: StorableArticle) -> StoreResult<StorableArticle>;

    /// All persisted articles, in insertion order.
    async fn find_all(&self) -> StoreResult<Vec<StorableArticle>>;
}
