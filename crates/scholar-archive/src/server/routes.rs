//! HTTP routes for the archive.
//!
//! - `GET /api/scholar`: fetch and normalize a profile
//! - `POST /db/save`: map and store one article
//! - `GET /db/articles`: list stored articles
//! - `POST /db/import`: fetch a profile and store all its articles

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::{ArchiveError, ErrorKind, ValidationError};
use crate::models::ArticleDto;
use crate::service::ArchiveService;

/// Query parameters naming a subject and, optionally, its credential.
#[derive(Debug, Deserialize)]
pub struct ScholarQuery {
    #[serde(rename = "authorId", default)]
    author_id: String,
    #[serde(rename = "apiKey")]
    api_key: Option<String>,
}

/// Shared state for HTTP handlers.
pub struct HttpState {
    pub service: ArchiveService,
}

/// Create the HTTP router.
pub fn create_router(service: ArchiveService) -> Router {
    let state = Arc::new(HttpState { service });

    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .route("/api/scholar", get(handle_scholar))
        .route("/db/save", post(handle_save))
        .route("/db/articles", get(handle_articles))
        .route("/db/import", post(handle_import))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "scholar-archive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn handle_scholar(
    State(state): State<Arc<HttpState>>,
    Query(query): Query<ScholarQuery>,
) -> Response {
    match state.service.author_profile(&query.author_id, query.api_key.as_deref()).await {
        Ok(profile) => Json(profile).into_response(),
        Err(e) => error_response(&e),
    }
}

async fn handle_save(
    State(state): State<Arc<HttpState>>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Response {
    let dto = match parse_article(payload) {
        Ok(dto) => dto,
        Err(e) => return error_response(&e),
    };

    match state.service.save_article(&dto).await {
        Ok(saved) => (StatusCode::CREATED, Json(saved)).into_response(),
        Err(e) => error_response(&e),
    }
}

async fn handle_articles(State(state): State<Arc<HttpState>>) -> Response {
    match state.service.list_articles().await {
        Ok(articles) => Json(articles).into_response(),
        Err(e) => error_response(&e),
    }
}

async fn handle_import(
    State(state): State<Arc<HttpState>>,
    Query(query): Query<ScholarQuery>,
) -> Response {
    match state.service.import_articles(&query.author_id, query.api_key.as_deref()).await {
        Ok(report) if report.is_complete() => (StatusCode::CREATED, Json(report)).into_response(),
        Ok(report) => {
            let message = format!(
                "{} of {} mappable articles could not be stored",
                report.failed.len(),
                report.failed.len() + report.saved.len()
            );
            tracing::error!(author_id = %report.author_id, %message, "Import incomplete");

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": message,
                    "kind": ErrorKind::Storage.as_str(),
                    "report": report
                })),
            )
                .into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// Body rejections and type mismatches are validation failures like any other.
fn parse_article(
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<ArticleDto, ArchiveError> {
    let Json(value) =
        payload.map_err(|rejection| ValidationError::new("body", rejection.body_text()))?;

    ArticleDto::from_json(value).map_err(|e| ValidationError::new("body", e.to_string()).into())
}

fn error_response(err: &ArchiveError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if status.is_server_error() {
        tracing::error!(kind = %err.kind(), error = %err, "Request failed");
    } else {
        tracing::debug!(kind = %err.kind(), error = %err, "Request rejected");
    }

    (
        status,
        Json(serde_json::json!({
            "error": err.to_user_message(),
            "kind": err.kind().as_str()
        })),
    )
        .into_response()
}
