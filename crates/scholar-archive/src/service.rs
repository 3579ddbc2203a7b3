//! Archive service: wires fetch, normalize, map and store together.

use std::sync::Arc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::client::ScholarClient;
use crate::error::{ArchiveError, ArchiveResult};
use crate::mapper;
use crate::models::{ArticleDto, CanonicalProfile, StorableArticle};
use crate::normalize::normalize;
use crate::store::ArticleStore;

/// Outcome of importing a profile's articles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    /// Subject the articles were fetched for.
    pub author_id: String,

    /// Articles persisted, with their new identifiers.
    pub saved: Vec<StorableArticle>,

    /// Articles that could not be mapped.
    pub skipped: Vec<SkippedArticle>,

    /// Mappable articles the store refused.
    #[serde(default)]
    pub failed: Vec<SkippedArticle>,
}

impl ImportReport {
    /// True when every mappable article was stored.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// An article left out of an import, by position and reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedArticle {
    /// Position in the canonical `articles` list.
    pub index: usize,
    pub reason: String,
}

/// Pipeline entry points shared by the HTTP routes and the CLI.
#[derive(Clone)]
pub struct ArchiveService {
    client: Arc<ScholarClient>,
    store: Arc<dyn ArticleStore>,
    /// Fallback when a request carries no credential.
    default_credential: Option<String>,
}

impl ArchiveService {
    /// Create a new service.
    #[must_use]
    pub fn new(
        client: Arc<ScholarClient>,
        store: Arc<dyn ArticleStore>,
        default_credential: Option<String>,
    ) -> Self {
        let default_credential = default_credential.filter(|k| !k.trim().is_empty());
        Self { client, store, default_credential }
    }

    /// Pick the request credential when it is non-blank, else the configured one.
    pub fn resolve_credential(&self, credential: Option<&str>) -> ArchiveResult<String> {
        credential
            .filter(|c| !c.trim().is_empty())
            .or(self.default_credential.as_deref())
            .map(str::to_string)
            .ok_or(ArchiveError::MissingCredential)
    }

    /// Fetch and normalize one author profile.
    pub async fn author_profile(
        &self,
        subject_id: &str,
        credential: Option<&str>,
    ) -> ArchiveResult<CanonicalProfile> {
        let credential = self.resolve_credential(credential)?;
        let raw = self.client.fetch(subject_id, &credential).await?;
        let profile = normalize(raw);

        tracing::info!(
            subject_id,
            has_author = profile.has_author(),
            articles = profile.articles.len(),
            "Normalized author profile"
        );
        Ok(profile)
    }

    /// Fetch several profiles concurrently. Results keep the input order.
    pub async fn fetch_profiles(
        &self,
        subject_ids: &[String],
        credential: Option<&str>,
    ) -> Vec<(String, ArchiveResult<CanonicalProfile>)> {
        let fetches = subject_ids.iter().map(move |id| async move {
            (id.clone(), self.author_profile(id, credential).await)
        });
        join_all(fetches).await
    }

    /// Map one article and persist it.
    pub async fn save_article(&self, dto: &ArticleDto) -> ArchiveResult<StorableArticle> {
        let article = mapper::to_storable(dto)?;
        let saved = self.store.save(article).await?;

        tracing::info!(id = ?saved.id, title = %saved.title, "Saved article");
        Ok(saved)
    }

    /// All archived articles.
    pub async fn list_articles(&self) -> ArchiveResult<Vec<StorableArticle>> {
        Ok(self.store.find_all().await?)
    }

    /// Run the whole pipeline for a subject and persist every mappable article.
    ///
    /// Articles that fail to deserialize or map are reported as skipped, and
    /// articles the store refuses as failed; neither stops the import. Only a
    /// failed fetch aborts it, before anything is stored.
    pub async fn import_articles(
        &self,
        subject_id: &str,
        credential: Option<&str>,
    ) -> ArchiveResult<ImportReport> {
        let profile = self.author_profile(subject_id, credential).await?;
        let mut report = ImportReport { author_id: subject_id.to_string(), ..Default::default() };

        for (index, parsed) in profile.article_dtos().into_iter().enumerate() {
            let mapped = parsed
                .map_err(|e| e.to_string())
                .and_then(|dto| mapper::to_storable(&dto).map_err(|e| e.to_string()));

            match mapped {
                Ok(article) => match self.store.save(article).await {
                    Ok(saved) => report.saved.push(saved),
                    Err(e) => {
                        tracing::error!(subject_id, index, error = %e, "Failed to store article");
                        report.failed.push(SkippedArticle { index, reason: e.to_string() });
                    }
                },
                Err(reason) => {
                    tracing::warn!(subject_id, index, %reason, "Skipping article");
                    report.skipped.push(SkippedArticle { index, reason });
                }
            }
        }

        tracing::info!(
            subject_id,
            saved = report.saved.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "Imported articles"
        );
        Ok(report)
    }
}

impl std::fmt::Debug for ArchiveService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveService")
            .field("client", &self.client)
            .field("has_default_credential", &self.default_credential.is_some())
            .finish_non_exhaustive()
    }
}
