//! Map an article DTO to its storable record.

use crate::error::ValidationError;
use crate::models::{ArticleDto, StorableArticle};

/// Base used for `publicationDate` when the article names no publication.
pub const PUBLICATION_PLACEHOLDER: &str = "N/A Publication Info";

/// Build the storable record for one article.
///
/// `authors` and `link` fall back to the empty string, as do `abstractText` and
/// `keywords`, which the search API never supplies. Missing citations store `0`.
///
/// # Errors
///
/// Returns [`ValidationError`] if the title is absent or blank.
pub fn to_storable(dto: &ArticleDto) -> Result<StorableArticle, ValidationError> {
    let title = match dto.title.as_deref() {
        Some(title) if !title.trim().is_empty() => title.to_string(),
        _ => return Err(ValidationError::new("title", "Article title cannot be empty.")),
    };

    Ok(StorableArticle {
        id: None,
        title,
        authors: dto.authors.clone().unwrap_or_default(),
        publication_date: publication_date(dto.publication.as_deref(), dto.year.as_deref()),
        abstract_text: String::new(),
        link: dto.link.clone().unwrap_or_default(),
        keywords: String::new(),
        cited_by: dto.citation_value().unwrap_or(0),
    })
}

/// `"<publication>, <year>"`, with the placeholder standing in for a missing publication.
#[must_use]
pub fn publication_date(publication: Option<&str>, year: Option<&str>) -> String {
    let base = publication.filter(|p| !p.trim().is_empty()).unwrap_or(PUBLICATION_PLACEHOLDER);

    match year.filter(|y| !y.trim().is_empty()) {
        Some(year) => format!("{base}, {year}"),
        None => base.to_string(),
    }
}
