//! HTTP route tests, driven through the router with `oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scholar_archive::models::StorableArticle;
use scholar_archive::server::routes::create_router;
use scholar_archive::store::{ArticleStore, MemoryArticleStore, StoreError, StoreResult};
use scholar_archive::{ArchiveService, Config, ScholarClient};

const AUTHOR_ID: &str = "4bahYMkAAAAJ";

fn build_service(base_url: &str, store: Arc<dyn ArticleStore>, key: Option<&str>) -> ArchiveService {
    let client = ScholarClient::new(Config::for_testing(base_url)).unwrap();
    ArchiveService::new(Arc::new(client), store, key.map(str::to_string))
}

fn offline_service() -> ArchiveService {
    build_service("http://unused.localhost", Arc::new(MemoryArticleStore::new()), Some("default-key"))
}

fn scholar_uri(author_id: &str, api_key: Option<&str>) -> String {
    let mut params = vec![("authorId", author_id)];
    if let Some(key) = api_key {
        params.push(("apiKey", key));
    }
    format!("/api/scholar?{}", serde_urlencoded::to_string(params).unwrap())
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(service: &ArchiveService, request: Request<Body>) -> (StatusCode, Value) {
    let response = create_router(service.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

struct FailingStore;

#[async_trait::async_trait]
impl ArticleStore for FailingStore {
    async fn save(&self, _article: StorableArticle) -> StoreResult<StorableArticle> {
        Err(StoreError::Backend("disk full".into()))
    }

    async fn find_all(&self) -> StoreResult<Vec<StorableArticle>> {
        Err(StoreError::Backend("connection lost".into()))
    }
}

// ─── Health ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_health_endpoints() {
    let service = offline_service();

    for uri in ["/", "/health"] {
        let (status, json) = send(&service, Request::get(uri).body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "scholar-archive");
    }
}

// ─── /api/scholar ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_scholar_returns_canonical_profile() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("author_id", AUTHOR_ID))
        .and(query_param("api_key", "request-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "search_metadata": {"status": "Success"},
            "author": {"name": "A", "affiliations": "Lab"},
            "articles": [{"title": "T", "cited_by": {"value": 5}}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service =
        build_service(&mock_server.uri(), Arc::new(MemoryArticleStore::new()), Some("default-key"));
    let request = Request::get(scholar_uri(AUTHOR_ID, Some("request-key"))).body(Body::empty()).unwrap();

    let (status, json) = send(&service, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "A");
    assert_eq!(json["affiliations"], "Lab");
    assert_eq!(json["articles"][0]["citedBy"]["value"], 5);
    assert!(json["articles"][0].get("cited_by").is_none());
    assert!(json.get("author").is_none());
    assert!(json.get("search_metadata").is_none());
}

#[tokio::test]
async fn test_scholar_falls_back_to_configured_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("api_key", "default-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"author": {"name": "A"}})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service =
        build_service(&mock_server.uri(), Arc::new(MemoryArticleStore::new()), Some("default-key"));
    let request = Request::get(scholar_uri(AUTHOR_ID, Some(""))).body(Body::empty()).unwrap();

    let (status, json) = send(&service, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["articles"], json!([]));
}

#[tokio::test]
async fn test_scholar_missing_author_id_is_bad_request() {
    let (status, json) =
        send(&offline_service(), Request::get("/api/scholar").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "validation");
    assert!(json["error"].as_str().unwrap().contains("authorId"));
}

#[tokio::test]
async fn test_scholar_without_any_key_is_bad_request() {
    let service =
        build_service("http://unused.localhost", Arc::new(MemoryArticleStore::new()), None);
    let request = Request::get(scholar_uri(AUTHOR_ID, None)).body(Body::empty()).unwrap();

    let (status, json) = send(&service, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("SERPAPI_API_KEY"));
}

#[tokio::test]
async fn test_scholar_upstream_auth_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"error":"Invalid API key."}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = build_service(&mock_server.uri(), Arc::new(MemoryArticleStore::new()), None);
    let request = Request::get(scholar_uri(AUTHOR_ID, Some("wrong"))).body(Body::empty()).unwrap();

    let (status, json) = send(&service, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["kind"], "auth");
    assert!(json["error"].as_str().unwrap().contains("401"));
}

#[tokio::test]
async fn test_scholar_upstream_server_error_is_bad_gateway() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = build_service(&mock_server.uri(), Arc::new(MemoryArticleStore::new()), None);
    let request = Request::get(scholar_uri(AUTHOR_ID, Some("k"))).body(Body::empty()).unwrap();

    let (status, json) = send(&service, request).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(json["error"].as_str().unwrap().contains("503"));
}

// ─── /db/save and /db/articles ──────────────────────────────────────────────

#[tokio::test]
async fn test_save_then_list() {
    let service = offline_service();

    let article = json!({
        "title": "Notes",
        "authors": "A Lovelace",
        "publication": "",
        "year": "1843",
        "citedBy": {"value": 120}
    });
    let (status, saved) = send(&service, post_json("/db/save", &article)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(saved["id"], 1);
    assert_eq!(saved["publicationDate"], "N/A Publication Info, 1843");
    assert_eq!(saved["citedBy"], 120);

    let (status, listed) =
        send(&service, Request::get("/db/articles").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["title"], "Notes");
}

#[tokio::test]
async fn test_save_empty_title_is_bad_request() {
    let service = offline_service();

    let (status, json) = send(&service, post_json("/db/save", &json!({"title": ""}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("title"));

    let (_, listed) =
        send(&service, Request::get("/db/articles").body(Body::empty()).unwrap()).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_save_wrong_field_type_is_bad_request() {
    let service = offline_service();

    let (status, json) = send(&service, post_json("/db/save", &json!({"title": 5}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "validation");
    assert!(json["error"].as_str().unwrap().contains("invalid type"));
}

#[tokio::test]
async fn test_save_malformed_body_is_bad_request() {
    let service = offline_service();
    let request = Request::post("/db/save")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let (status, json) = send(&service, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "validation");
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_save_accepts_both_citation_keys() {
    let service = offline_service();
    let article = json!({"title": "T", "citedBy": {"value": 1}, "cited_by": {"value": 7}});

    let (status, saved) = send(&service, post_json("/db/save", &article)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(saved["citedBy"], 7);
}

#[tokio::test]
async fn test_store_failure_is_internal_error() {
    let service = build_service("http://unused.localhost", Arc::new(FailingStore), None);

    let (status, json) = send(&service, post_json("/db/save", &json!({"title": "T"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["kind"], "storage");

    let (status, _) =
        send(&service, Request::get("/db/articles").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

// ─── /db/import ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_import_saves_articles_and_reports_skips() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "author": {"name": "A"},
            "articles": [
                {"title": "First", "year": "2001", "cited_by": {"value": 3}},
                {"title": "", "year": "2002"},
                {"title": "Third", "publication": "Nature"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service =
        build_service(&mock_server.uri(), Arc::new(MemoryArticleStore::new()), Some("k"));
    let uri = format!(
        "/db/import?{}",
        serde_urlencoded::to_string([("authorId", AUTHOR_ID)]).unwrap()
    );

    let (status, report) = send(&service, Request::post(uri).body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(report["authorId"], AUTHOR_ID);
    assert_eq!(report["saved"].as_array().unwrap().len(), 2);
    assert_eq!(report["saved"][0]["citedBy"], 3);
    assert_eq!(report["saved"][1]["publicationDate"], "Nature");
    assert_eq!(report["skipped"][0]["index"], 1);

    let (_, listed) =
        send(&service, Request::get("/db/articles").body(Body::empty()).unwrap()).await;
    assert_eq!(listed.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_import_with_store_failure_returns_partial_report() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "articles": [{"title": "A"}, {"title": "B"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = build_service(&mock_server.uri(), Arc::new(FailingStore), Some("k"));
    let uri = format!("/db/import?{}", serde_urlencoded::to_string([("authorId", AUTHOR_ID)]).unwrap());

    let (status, json) = send(&service, Request::post(uri).body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["kind"], "storage");
    assert!(json["error"].as_str().unwrap().contains("2 of 2"));
    assert_eq!(json["report"]["failed"].as_array().unwrap().len(), 2);
    assert_eq!(json["report"]["saved"], json!([]));
}
