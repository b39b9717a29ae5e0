mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum_test::TestServer;
use http_body_util::BodyExt;
use serde_json::Value;
use serial_test::serial;
use tower::ServiceExt;

use deadline_tracker::AppConfig;

/// Helper to create a test server over a fixture directory
fn setup(fixture: &str) -> TestServer {
    let app = common::create_test_app(fixture);
    TestServer::new(app).unwrap()
}

fn names(conferences: &[Value]) -> Vec<&str> {
    conferences
        .iter()
        .map(|c| c["name"].as_str().expect("conference should have a name"))
        .collect()
}

// ============================================================================
// JSON API
// ============================================================================

#[tokio::test]
async fn test_api_orders_upcoming_then_passed_then_undated() {
    let server = setup("basic");

    let response = server.get("/api/conferences").await;
    response.assert_status_ok();

    let conferences: Vec<Value> = response.json();
    assert_eq!(names(&conferences), vec!["FUTURE", "LEGACY", "TBD"]);
}

#[tokio::test]
async fn test_api_enriched_fields() {
    let server = setup("basic");
    let conferences: Vec<Value> = server.get("/api/conferences").await.json();

    let future = &conferences[0];
    assert_eq!(future["full_name"], "Future Systems Conference");
    assert_eq!(future["website"], "https://future.example.org");
    assert_eq!(future["deadlines"]["abstract"], "2099-01-01");
    assert!(future["deadlines"]["camera_ready"].is_null());

    let all = future["all_deadlines"].as_array().expect("all_deadlines should be an array");
    assert_eq!(all.len(), 2, "undated camera_ready should be skipped");
    assert_eq!(all[0]["type"], "abstract");
    assert_eq!(all[1]["type"], "paper");
    assert!(all[0]["days"].as_i64().unwrap() < all[1]["days"].as_i64().unwrap());

    assert_eq!(future["next_deadline"], all[0]);
    assert!(future["conference_days"].as_i64().unwrap() > 0);

    let legacy = &conferences[1];
    assert!(legacy["next_deadline"]["days"].as_i64().unwrap() < 0);
    assert!(legacy["conference_days"].as_i64().unwrap() < 0);

    let tbd = &conferences[2];
    assert!(tbd["next_deadline"].is_null());
    assert!(tbd["conference_days"].is_null());
    assert_eq!(tbd["all_deadlines"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_api_missing_key_is_empty_list() {
    let server = setup("no_key");

    let response = server.get("/api/conferences").await;
    response.assert_status_ok();
    let conferences: Vec<Value> = response.json();
    assert!(conferences.is_empty());
}

#[tokio::test]
async fn test_api_missing_file_is_server_error() {
    let server = setup("missing");

    let response = server.get("/api/conferences").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_api_malformed_yaml_is_server_error() {
    let server = setup("broken_yaml");

    let response = server.get("/api/conferences").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_api_malformed_date_is_server_error() {
    let server = setup("bad_date");

    let response = server.get("/api/conferences").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!response.text().contains("2099-13-45"), "error detail should not leak");
}

// ============================================================================
// HTML page
// ============================================================================

#[tokio::test]
async fn test_home_renders_in_order() {
    let server = setup("basic");

    let response = server.get("/").await;
    response.assert_status_ok();

    let content_type = response.header(header::CONTENT_TYPE);
    assert!(content_type.to_str().unwrap().starts_with("text/html"));

    let html = response.text();
    let future = html.find("Future Systems Conference").expect("FUTURE should be listed");
    let legacy = html.find("Legacy Workshop").expect("LEGACY should be listed");
    let tbd = html.find("To Be Decided Symposium").expect("TBD should be listed");
    assert!(future < legacy && legacy < tbd);

    assert!(html.contains("tracker-fixture-repo"), "repository link should be rendered");
    assert!(html.contains("1 of 3 conferences"));
}

#[tokio::test]
async fn test_home_empty_list() {
    let server = setup("no_key");

    let response = server.get("/").await;
    response.assert_status_ok();
    assert!(response.text().contains("No conferences listed yet."));
}

#[tokio::test]
async fn test_home_missing_file_is_server_error() {
    let server = setup("missing");

    let response = server.get("/").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

// ============================================================================
// Headers and auxiliary routes
// ============================================================================

#[tokio::test]
async fn test_security_headers_on_every_route() {
    let server = setup("basic");

    for path in ["/", "/api/conferences", "/health"] {
        let response = server.get(path).await;
        response.assert_status_ok();
        assert_eq!(response.header("x-content-type-options"), "nosniff", "{}", path);
        assert_eq!(response.header("x-frame-options"), "DENY", "{}", path);
        assert_eq!(response.header("x-xss-protection"), "1; mode=block", "{}", path);
        assert_eq!(response.header("referrer-policy"), "strict-origin-when-cross-origin", "{}", path);
        assert_eq!(
            response.header("content-security-policy"),
            "default-src 'self'; style-src 'unsafe-inline' 'self'; script-src 'self'",
            "{}",
            path
        );
    }
}

#[tokio::test]
async fn test_security_headers_on_error_response() {
    let app = common::create_test_app("missing");

    let response = app
        .oneshot(Request::builder().uri("/api/conferences").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.headers()["x-frame-options"], "DENY");

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_health() {
    let server = setup("basic");

    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_text("ok");
}

#[tokio::test]
async fn test_openapi_document_lists_conferences_path() {
    let server = setup("basic");

    let response = server.get("/api-docs/openapi.json").await;
    response.assert_status_ok();
    let doc: Value = response.json();
    assert!(doc["paths"]["/api/conferences"]["get"].is_object());
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
#[serial]
fn test_config_from_env_overrides() {
    std::env::set_var("GITHUB_REPO_URL", "https://github.com/acme/deadlines");
    std::env::set_var("TRACKER_BASE_DIR", "/srv/tracker");
    std::env::set_var("BIND_ADDR", "127.0.0.1:9000");

    let config = AppConfig::from_env();
    assert_eq!(config.github_repo_url, "https://github.com/acme/deadlines");
    assert_eq!(config.base_dir, std::path::PathBuf::from("/srv/tracker"));
    assert_eq!(config.bind_addr, "127.0.0.1:9000");

    std::env::remove_var("GITHUB_REPO_URL");
    std::env::remove_var("TRACKER_BASE_DIR");
    std::env::remove_var("BIND_ADDR");
}

#[test]
#[serial]
fn test_config_from_env_defaults() {
    std::env::remove_var("GITHUB_REPO_URL");
    std::env::remove_var("TRACKER_BASE_DIR");
    std::env::remove_var("BIND_ADDR");

    let config = AppConfig::from_env();
    assert_eq!(config.github_repo_url, "https://github.com/YOUR_USERNAME/conference-tracker");
    assert_eq!(config.bind_addr, "0.0.0.0:8000");
    assert_eq!(config.base_dir, std::path::PathBuf::from("."));
}
