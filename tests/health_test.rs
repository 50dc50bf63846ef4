mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn health_returns_200() {
    let app = common::test_app().await;
    let (status, json) = common::get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["database"], "connected");
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = common::test_app().await;
    let (status, _) = common::get(&app, "/api/nonexistent").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
