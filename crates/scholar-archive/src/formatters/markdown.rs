//! Markdown output formatting.

use serde_json::Value;

use crate::models::{CanonicalProfile, StorableArticle};

const NOT_AVAILABLE: &str = "N/A";

/// Format a canonical profile as a heading plus an article table.
#[must_use]
pub fn format_profile_markdown(profile: &CanonicalProfile) -> String {
    let name = profile.name().unwrap_or("Unknown author");
    let mut output = format!("# {} Articles\n\n", cell(name));

    output.push_str(&format!(
        "**Affiliations**: {}\n\n",
        profile.affiliations().map_or(NOT_AVAILABLE.into(), cell)
    ));

    if profile.articles.is_empty() {
        output.push_str("No articles found for this author.\n");
        return output;
    }

    output.push_str(&format!("## Articles ({})\n\n", profile.articles.len()));
    output.push_str("| Title | Authors | Publication | Link | Year | Cited By |\n");
    output.push_str("|---|---|---|---|---|---|\n");

    for article in &profile.articles {
        let cited_by = article
            .get("citedBy")
            .and_then(|c| c.get("value"))
            .and_then(Value::as_i64)
            .unwrap_or(0);

        output.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            text_field(article, "title"),
            text_field(article, "authors"),
            text_field(article, "publication"),
            text_field(article, "link"),
            text_field(article, "year"),
            cited_by,
        ));
    }

    output
}

/// Format archived articles as a table.
#[must_use]
pub fn format_stored_articles_markdown(articles: &[StorableArticle]) -> String {
    let mut output = String::from("# Saved Articles\n\n");

    if articles.is_empty() {
        output.push_str("The database currently contains no saved articles.\n");
        return output;
    }

    output.push_str(&format!("Showing {} saved articles.\n\n", articles.len()));
    output.push_str("| ID | Title | Authors | Publication Info | Cited By | Link |\n");
    output.push_str("|---|---|---|---|---|---|\n");

    for article in articles {
        output.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            article.id.map_or(NOT_AVAILABLE.into(), |id| id.to_string()),
            or_na(&article.title),
            or_na(&article.authors),
            or_na(&article.publication_date),
            article.cited_by,
            or_na(&article.link),
        ));
    }

    output
}

fn text_field(article: &Value, key: &str) -> String {
    match article.get(key) {
        Some(Value::String(s)) if !s.is_empty() => cell(s),
        Some(Value::Number(n)) => n.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn or_na(text: &str) -> String {
    if text.is_empty() { NOT_AVAILABLE.to_string() } else { cell(text) }
}

/// Escape table delimiters and flatten line breaks.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}
