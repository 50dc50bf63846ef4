#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;

use pokedex_api::config::{Config, Environment};
use pokedex_api::state::AppState;

/// A fresh in-memory `SQLite` database with all migrations applied.
pub async fn test_db() -> DatabaseConnection {
    let db = sea_orm::Database::connect("sqlite::memory:")
        .await
        .unwrap_or_default();
    Migrator::up(&db, None).await.unwrap_or_default();
    db
}

pub fn test_state(db: DatabaseConnection) -> AppState {
    AppState {
        db,
        config: Config {
            database_url: String::new(),
            server_host: std::net::IpAddr::from([127, 0, 0, 1]),
            server_port: 0,
            environment: Environment::Development,
            log_level: "warn".to_string(),
            frontend_url: "http://localhost:3000".to_string(),
        },
    }
}

/// Build the app router backed by a fresh migrated database.
pub async fn test_app() -> Router {
    pokedex_api::routes::router().with_state(test_state(test_db().await))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap_or_default();

    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .map(http_body_util::Collected::to_bytes)
        .unwrap_or_default();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);

    (status, json)
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap_or_default()
}

/// Test helper: send a GET request and return (status, JSON body).
pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap_or_default();
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap_or_default();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    send(app, json_request("POST", uri, body)).await
}

pub async fn patch_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    send(app, json_request("PATCH", uri, body)).await
}

pub async fn put_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    send(app, json_request("PUT", uri, body)).await
}

/// Send a raw body with an optional content type.
pub async fn post_raw(
    app: &Router,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    let request = builder
        .body(Body::from(body.to_string()))
        .unwrap_or_default();
    send(app, request).await
}

/// A valid flat camelCase pokemon body.
pub fn pokemon_body(number: i64, name: &str) -> Value {
    serde_json::json!({
        "number": number,
        "name": name,
        "attack": 49,
        "defense": 49,
        "type": "grass",
        "imageUrl": format!("/images/pokemon_snaps/{number}.svg"),
        "moves": ["tackle", "vine whip"],
    })
}

/// Create a pokemon through the API and return its id.
pub async fn create_pokemon(app: &Router, number: i64, name: &str) -> i64 {
    let (status, body) = post_json(app, "/api/pokemon", &pokemon_body(number, name)).await;
    assert_eq!(status, StatusCode::CREATED, "create pokemon failed: {body}");
    body["id"].as_i64().unwrap_or_default()
}
