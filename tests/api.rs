//! HTTP API routes over an in-memory provider

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use goear_rs::config::{ProviderConfig, Settings};
use goear_rs::providers::ProviderRegistry;
use goear_rs::search::{Page, TrackDetails};
use goear_rs::web::{create_router, AppState};
use goear_rs::{LookupTarget, SearchError, SearchProvider, Track};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

struct StaticProvider;

#[async_trait]
impl SearchProvider for StaticProvider {
    fn name(&self) -> &str {
        "goear"
    }

    async fn fetch_page(&self, _term: &str, page_index: u32) -> goear_rs::Result<Page> {
        if page_index > 2 {
            return Ok(Page::empty());
        }
        let items = (0..10)
            .map(|i| {
                Track::new(format!("{}-{}", page_index, i), "Song")
                    .with_quality(if i % 2 == 0 { 320 } else { 128 })
            })
            .collect();
        Ok(Page::new(items, 20))
    }

    async fn lookup_one(&self, target: &LookupTarget) -> goear_rs::Result<TrackDetails> {
        if target.id() == "nope" {
            return Err(SearchError::NotFound("no extended info found".to_string()));
        }
        Ok(TrackDetails {
            title: "Looked up".to_string(),
            artist: None,
            link: format!("http://cdn.example/{}", target.id()),
        })
    }
}

fn app() -> axum::Router {
    let mut registry = ProviderRegistry::new();
    registry.register(Arc::new(StaticProvider), ProviderConfig::default());
    create_router(AppState::new(Settings::default(), registry))
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_stats_lists_providers() {
    let (status, body) = send(get("/stats")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["providers"], json!(["goear"]));
    assert_eq!(body["available_providers"], json!(["goear"]));
    assert_eq!(body["total_calls"], 0);
}

#[tokio::test]
async fn test_search_unfiltered() {
    let (status, body) = send(get("/search?q=u2&results_count=5")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_count"], 20);
    assert_eq!(body["tracks"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_search_filtered_omits_total() {
    let (status, body) = send(get("/search?q=u2&min_quality=256&offset=2&results_count=4")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("total_count").is_none());

    let tracks = body["tracks"].as_array().unwrap();
    assert_eq!(tracks.len(), 4);
    assert_eq!(tracks[0]["id"], "1-8");
    assert!(tracks.iter().all(|t| t["quality"] == 320));
}

#[tokio::test]
async fn test_search_requires_term() {
    let (status, body) = send(get("/search?q=%20")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("search term"));
}

#[tokio::test]
async fn test_search_unknown_provider() {
    let (status, _) = send(get("/search?q=u2&provider=elsewhere")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_lookup_by_single_id() {
    let (status, body) = send(get("/lookup?id=abc")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "abc");
    assert_eq!(body["title"], "Looked up");
}

#[tokio::test]
async fn test_lookup_by_id_list() {
    let (status, body) = send(get("/lookup?id=a,b")).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["a", "b"]);
}

#[tokio::test]
async fn test_lookup_not_found() {
    let (status, _) = send(get("/lookup?id=nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_lookup_json_body_keeps_track_fields() {
    let payload = json!([{ "id": "x1", "title": "old", "quality": 192, "duration": "2:30" }]);
    let request = Request::builder()
        .method("POST")
        .uri("/lookup")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();

    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], "x1");
    assert_eq!(body[0]["title"], "Looked up");
    assert_eq!(body[0]["quality"], 192);
    assert_eq!(body[0]["duration"], "2:30");
}
