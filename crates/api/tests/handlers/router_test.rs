//! Router-level checks. None of these requests reach the database: each one
//! is answered by routing, an extractor or input validation.

use axum::http::{HeaderName, HeaderValue, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::test_utils::test_server;

fn error_message(body: &Value) -> &str {
    body["error"].as_str().unwrap_or_default()
}

#[tokio::test]
async fn test_health_at_root_and_under_prefix() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(dir.path());

    for path in ["/health", "/api/v1/health"] {
        let response = server.get(path).await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
    }
}

#[tokio::test]
async fn test_version_reports_crate_version() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(dir.path());

    let body: Value = server.get("/version").await.json();
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(dir.path());

    server.get("/api/v1/nope").await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_numeric_ids_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(dir.path());

    let cases = [
        ("/api/v1/categories/abc", "Invalid category ID"),
        ("/api/v1/services/1.5", "Invalid service ID"),
        ("/api/v1/cars/-3", "Invalid car ID"),
        ("/api/v1/masters/0", "Invalid master ID"),
        ("/api/v1/masters/x/reviews", "Invalid master ID"),
    ];

    for (path, expected) in cases {
        let response = server.get(path).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(
            error_message(&body).contains(expected),
            "{} returned {:?}",
            path,
            body
        );
    }
}

#[tokio::test]
async fn test_services_filter_must_be_an_id() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(dir.path());

    server
        .get("/api/v1/services")
        .add_query_param("category_id", "brakes")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_available_slots_rejects_bad_date() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(dir.path());

    let response = server
        .get("/api/v1/masters/1/available-slots")
        .add_query_param("date", "2024-13-40")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(error_message(&body).contains("Invalid date format. Use YYYY-MM-DD"));
}

#[tokio::test]
async fn test_price_request_needs_both_ids() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(dir.path());

    let response = server
        .post("/api/v1/pricing/calculate")
        .json(&json!({ "service_id": 0, "car_id": 4 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(dir.path());

    let response = server
        .post("/api/v1/auth/register")
        .json(&json!({
            "name": "Aida",
            "email": "aida@example.com",
            "password": "123"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(error_message(&body).contains("at least 6 characters"));
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(dir.path());

    for path in [
        "/api/v1/appointments",
        "/api/v1/user/profile",
        "/api/v1/user/subscription",
        "/api/v1/master/profile",
        "/api/v1/master/works",
    ] {
        let response = server.get(path).await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: Value = response.json();
        assert_eq!(
            error_message(&body),
            "Authentication error: Authorization header required"
        );
    }
}

#[tokio::test]
async fn test_non_bearer_scheme_is_unauthorized() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(dir.path());

    server
        .post("/api/v1/reviews")
        .add_header(
            HeaderName::from_static("authorization"),
            HeaderValue::from_static("Basic YWlkYTpzZWNyZXQ="),
        )
        .json(&json!({ "master_id": 1, "rating": 5 }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_static_files_are_served() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("uploads")).unwrap();
    std::fs::write(dir.path().join("uploads/hello.txt"), "hi").unwrap();
    let server = test_server(dir.path());

    let response = server.get("/static/uploads/hello.txt").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "hi");
}
