use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use trendtracker_core::{ApiError, FilterState, FilterUpdate, ScrapeRequest};
use trends_client::TrendsClient;

#[derive(Clone, Default)]
struct Recorded {
    queries: Arc<Mutex<Vec<Option<String>>>>,
    bodies: Arc<Mutex<Vec<Value>>>,
}

fn init_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

async fn spawn_backend(router: Router) -> TrendsClient {
    init_logging();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    TrendsClient::with_base_url(&format!("http://{}", addr)).unwrap()
}

fn sample_trend() -> Value {
    json!({
        "id": 1,
        "title": "X",
        "url": "https://youtube.com/watch?v=x",
        "platform": "youtube",
        "platform_id": "x",
        "category": "funny",
        "author": "Someone",
        "thumbnail_url": null,
        "view_count": 100,
        "like_count": 10,
        "comment_count": null,
        "engagement_score": 42,
        "published_at": "2024-03-01T08:00:00",
        "duration": 30,
        "created_at": "2024-03-02T09:00:00",
        "description": null
    })
}

async fn trends_handler(
    State(recorded): State<Recorded>,
    RawQuery(query): RawQuery,
) -> Json<Value> {
    recorded.queries.lock().unwrap().push(query);
    Json(json!([sample_trend()]))
}

#[tokio::test]
async fn test_fetch_trends_sends_filter_query() {
    let recorded = Recorded::default();
    let router = Router::new()
        .route("/api/trends", get(trends_handler))
        .with_state(recorded.clone());
    let client = spawn_backend(router).await;

    let mut filters = FilterState::new();
    filters.merge(FilterUpdate::Platforms(vec!["youtube".to_string()]));
    filters.merge(FilterUpdate::Category("funny".to_string()));

    let trends = client.fetch_trends(&filters).await.unwrap();
    assert_eq!(trends.len(), 1);
    assert_eq!(trends[0].title, "X");
    assert_eq!(trends[0].view_count, Some(100));
    assert_eq!(trends[0].comment_count, None);

    let queries = recorded.queries.lock().unwrap().clone();
    assert_eq!(
        queries,
        vec![Some("platforms=youtube&category=funny".to_string())]
    );
}

#[tokio::test]
async fn test_empty_filter_sends_no_query() {
    let recorded = Recorded::default();
    let router = Router::new()
        .route("/api/trends", get(trends_handler))
        .with_state(recorded.clone());
    let client = spawn_backend(router).await;

    client.fetch_trends(&FilterState::new()).await.unwrap();

    let queries = recorded.queries.lock().unwrap().clone();
    assert_eq!(queries, vec![None]);
}

#[tokio::test]
async fn test_server_error_status() {
    let router = Router::new().route(
        "/api/trends",
        get(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
        }),
    );
    let client = spawn_backend(router).await;

    let error = client.fetch_trends(&FilterState::new()).await.unwrap_err();
    assert_eq!(
        error,
        ApiError::Http {
            status: 500,
            server_message: Some("Internal server error".to_string()),
        }
    );
    assert_eq!(error.to_string(), "API request failed with status 500");
}

#[tokio::test]
async fn test_error_status_without_json_body() {
    let router = Router::new().route(
        "/api/trends",
        get(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
    );
    let client = spawn_backend(router).await;

    let error = client.fetch_trends(&FilterState::new()).await.unwrap_err();
    assert_eq!(error.status(), Some(502));
    assert_eq!(error.server_message(), None);
}

#[tokio::test]
async fn test_invalid_json_is_parse_failure() {
    let router = Router::new().route("/api/trends", get(|| async { "<html>oops</html>" }));
    let client = spawn_backend(router).await;

    let error = client.fetch_trends(&FilterState::new()).await.unwrap_err();
    assert!(matches!(error, ApiError::Parse { .. }));
}

#[tokio::test]
async fn test_unreachable_backend_is_network_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = TrendsClient::with_base_url(&format!("http://{}", addr)).unwrap();
    let error = client.fetch_config().await.unwrap_err();
    assert!(matches!(error, ApiError::Network { .. }));
}

#[tokio::test]
async fn test_scrape_enabled_platforms() {
    let recorded = Recorded::default();
    let router = Router::new()
        .route(
            "/api/config",
            get(|| async {
                Json(json!({
                    "platforms": {
                        "youtube": {"enabled": true},
                        "reddit": {"enabled": false},
                        "twitter": {"enabled": false},
                        "tiktok": {"enabled": false}
                    },
                    "scheduler_enabled": false,
                    "scheduler_interval": 3600,
                    "debug": true
                }))
            }),
        )
        .route(
            "/api/scrape",
            post(
                |State(recorded): State<Recorded>, Json(body): Json<Value>| async move {
                    recorded.bodies.lock().unwrap().push(body);
                    Json(json!({
                        "message": "Successfully scraped and saved 3 new trends",
                        "trends_scraped": 5,
                        "trends_saved": 3,
                        "platforms_scraped": 1
                    }))
                },
            ),
        )
        .with_state(recorded.clone());
    let client = spawn_backend(router).await;

    let outcome = client.scrape_enabled_platforms().await.unwrap();
    assert_eq!(outcome.message, "Successfully scraped and saved 3 new trends");
    assert_eq!(outcome.trends_saved, Some(3));

    let bodies = recorded.bodies.lock().unwrap().clone();
    assert_eq!(
        bodies,
        vec![json!({"platforms": ["youtube"], "limit_per_platform": 15})]
    );
}

#[tokio::test]
async fn test_scrape_failure_carries_server_error() {
    let router = Router::new().route(
        "/api/scrape",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error during scraping: quota"})),
            )
        }),
    );
    let client = spawn_backend(router).await;

    let request = ScrapeRequest::for_platforms(vec!["reddit".to_string()]);
    let error = client.trigger_scrape(&request).await.unwrap_err();
    assert_eq!(
        error.server_message(),
        Some("Internal server error during scraping: quota")
    );
}

#[tokio::test]
async fn test_platform_connection_test() {
    let router = Router::new().route(
        "/api/config/test",
        post(|Json(body): Json<Value>| async move {
            match body["platform"].as_str() {
                Some("youtube") => (
                    StatusCode::OK,
                    Json(json!({"message": "YouTube API connection successful!"})),
                ),
                _ => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"error": "Reddit API credentials not configured."})),
                ),
            }
        }),
    );
    let client = spawn_backend(router).await;

    let ok = client.test_platform("youtube").await.unwrap();
    assert_eq!(ok.message, "YouTube API connection successful!");

    let error = client.test_platform("reddit").await.unwrap_err();
    assert_eq!(error.status(), Some(400));
    assert_eq!(
        error.server_message(),
        Some("Reddit API credentials not configured.")
    );
}

#[tokio::test]
async fn test_thumbnail_download() {
    let router = Router::new()
        .route("/thumb.png", get(|| async { vec![0x89u8, b'P', b'N', b'G'] }))
        .route("/missing.png", get(|| async { StatusCode::NOT_FOUND }));
    let client = spawn_backend(router).await;

    let base = client.base_url().clone();
    let bytes = client
        .fetch_thumbnail(base.join("/thumb.png").unwrap().as_str())
        .await
        .unwrap();
    assert_eq!(bytes, vec![0x89, b'P', b'N', b'G']);

    let error = client
        .fetch_thumbnail(base.join("/missing.png").unwrap().as_str())
        .await
        .unwrap_err();
    assert_eq!(error.status(), Some(404));
}

#[test]
fn test_blocking_invalid_thumbnail_url() {
    let client = TrendsClient::with_base_url("http://localhost:5000").unwrap();
    let error = tokio_test::block_on(client.fetch_thumbnail("not a url")).unwrap_err();
    assert!(matches!(error, ApiError::Network { .. }));
}
