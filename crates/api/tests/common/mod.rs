#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use taskboard_api::auth::jwt::{generate_access_token, JwtConfig};
use taskboard_api::config::{LogFormat, ServerConfig};
use taskboard_api::router::build_app_router;
use taskboard_api::state::AppState;
use taskboard_core::roles::Role;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        log_format: LogFormat::Text,
        jwt: JwtConfig {
            secret: "integration-test-secret-with-enough-bytes".to_string(),
            audience: None,
            expiry_mins: 15,
        },
    }
}

/// Build the full application router, with every middleware layer, over
/// the given pool.
pub fn build_test_app(pool: SqlitePool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Mint a bearer token accepted by [`build_test_app`].
pub fn token_for(role: Role) -> String {
    let subject = format!("{}-user", role.as_str());
    let email = format!("{}@example.com", role.as_str());
    generate_access_token(&subject, Some(&email), role, &test_config().jwt)
        .expect("token generation should succeed")
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    role: Option<Role>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(role) = role {
        builder = builder.header(AUTHORIZATION, format!("Bearer {}", token_for(role)));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

/// GET without credentials.
pub async fn get_anon(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get(app: Router, uri: &str, role: Role) -> Response {
    send(app, Method::GET, uri, Some(role), None).await
}

pub async fn post_json(app: Router, uri: &str, role: Role, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(role), Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, role: Role, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(role), Some(body)).await
}

pub async fn delete(app: Router, uri: &str, role: Role) -> Response {
    send(app, Method::DELETE, uri, Some(role), None).await
}

/// Send a raw, possibly malformed, JSON body.
pub async fn post_raw(app: Router, uri: &str, role: Role, body: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {}", token_for(role)))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a project as a manager and return its id.
pub async fn seed_project(pool: &SqlitePool, name: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/projects",
        Role::Manager,
        serde_json::json!({ "name": name }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a task and return its id.
pub async fn seed_task(pool: &SqlitePool, body: serde_json::Value) -> i64 {
    let response = post_json(build_test_app(pool.clone()), "/tasks", Role::Contributor, body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}
