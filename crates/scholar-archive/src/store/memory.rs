//! In-memory article store.

use std::sync::Arc;

use tokio::sync::RwLock;

use super::{ArticleStore, StoreError, StoreResult};
use crate::models::StorableArticle;

#[derive(Debug, Default)]
struct Table {
    rows: Vec<StorableArticle>,
    next_id: i64,
}

/// Article store backed by a vector, with auto-increment ids starting at 1.
#[derive(Debug, Clone, Default)]
pub struct MemoryArticleStore {
    table: Arc<RwLock<Table>>,
}

impl MemoryArticleStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored articles.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait::async_trait]
impl ArticleStore for MemoryArticleStore {
    async fn save(&self, mut article: StorableArticle) -> StoreResult<StorableArticle> {
        if let Some(id) = article.id {
            return Err(StoreError::AlreadyPersisted(id));
        }

        let mut table = self.table.write().await;
        table.next_id += 1;
        article.id = Some(table.next_id);
        table.rows.push(article.clone());

        tracing::debug!(id = table.next_id, title = %article.title, "Stored article");
        Ok(article)
    }

    async fn find_all(&self) -> StoreResult<Vec<StorableArticle>> {
        Ok(self.table.read().await.rows.clone())
    }
}
