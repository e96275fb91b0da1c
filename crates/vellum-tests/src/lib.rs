// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Vellum Project. All rights reserved.

//! # vellum-tests
//!
//! Shared harness for Vellum's integration tests: an in-memory application
//! state, the assembled router, and request helpers that drive it without a
//! network socket.

#![deny(unsafe_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;
use vellum_api::{ApiConfig, ApiServer, AppState, JwtConfig};

/// Signing secret used by every test state.
pub const TEST_SECRET: &str = "integration-test-secret-key-at-least-32-bytes";

/// Builds an application state backed entirely by in-memory components.
pub fn test_state() -> AppState {
    let config = ApiConfig::default().with_jwt(JwtConfig::new(TEST_SECRET));
    AppState::builder()
        .config(config)
        .build()
        .expect("test state should build")
}

/// Builds the full router (middleware included) over the given state.
pub fn test_router(state: &AppState) -> Router {
    ApiServer::new(state.clone()).router()
}

/// Sends a request through the router and returns status plus parsed body.
///
/// Empty or non-JSON bodies come back as `Value::Null`.
pub async fn send(
    router: &Router,
    method: Method,
    path: &str,
    bearer: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request should build"),
        None => builder.body(Body::empty()).expect("request should build"),
    };

    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("router should not fail");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

/// Registers a user through the API.
pub async fn register(router: &Router, username: &str, password: &str, role: &str) -> (StatusCode, Value) {
    send(
        router,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(serde_json::json!({
            "username": username,
            "password": password,
            "role": role,
        })),
    )
    .await
}

/// Logs a user in through the API, returning the response body.
pub async fn login(router: &Router, username: &str, password: &str) -> (StatusCode, Value) {
    send(
        router,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(serde_json::json!({
            "username": username,
            "password": password,
        })),
    )
    .await
}

/// Registers and logs in a user, returning the bearer token and login body.
pub async fn register_and_login(router: &Router, username: &str, role: &str) -> (String, Value) {
    let (status, _) = register(router, username, "p4ssw0rd!", role).await;
    assert_eq!(status, StatusCode::CREATED, "registration should succeed");

    let (status, body) = login(router, username, "p4ssw0rd!").await;
    assert_eq!(status, StatusCode::OK, "login should succeed");

    let token = body["token"].as_str().expect("login returns a token").to_string();
    (token, body)
}
