// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Vellum Project. All rights reserved.

//! # API Integration Tests
//!
//! Drives the assembled router end to end:
//!
//! - `test_auth_*`: registration, login, logout, revocation
//! - `test_notes_*`: note CRUD and role/ownership enforcement
//! - `test_health_*`: public probes

use axum::http::{Method, StatusCode};
use serde_json::json;
use vellum_tests::{login, register, register_and_login, send, test_router, test_state};

// =============================================================================
// Auth Flow
// =============================================================================

#[tokio::test]
async fn test_auth_lifecycle_with_revocation() {
    let state = test_state();
    let router = test_router(&state);

    // Register an editor and log in.
    let (token, login_body) = register_and_login(&router, "alice", "Editor").await;
    let session_id = login_body["session_id"].as_str().unwrap().to_string();
    assert!(!session_id.is_empty());
    assert_eq!(login_body["username"], "alice");
    assert_eq!(login_body["role"], "editor");

    // The token works against a protected endpoint.
    let (status, note) = send(
        &router,
        Method::POST,
        "/api/v1/notes",
        Some(&token),
        Some(json!({"title": "first", "content": "note body"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(note["title"], "first");

    // Logout revokes the session id carried by the token.
    let (status, logout_body) =
        send(&router, Method::POST, "/api/v1/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(logout_body["session_id"], session_id.as_str());
    assert!(state.revocations().is_revoked(&session_id));

    // The same, still cryptographically valid token is now rejected with the
    // distinct revoked-session code, before any role check.
    let (status, body) = send(
        &router,
        Method::POST,
        "/api/v1/notes",
        Some(&token),
        Some(json!({"title": "second", "content": "never stored"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "SESSION_REVOKED");

    // Logging in again issues a fresh session that is not revoked.
    let (status, body) = login(&router, "alice", "p4ssw0rd!").await;
    assert_eq!(status, StatusCode::OK);
    assert_ne!(body["session_id"], session_id.as_str());
}

#[tokio::test]
async fn test_auth_wrong_password_rejected_without_side_effects() {
    let state = test_state();
    let router = test_router(&state);

    register(&router, "alice", "right-password", "Reader").await;

    let (status, body) = login(&router, "alice", "wrong-password").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["token"].is_null());

    // Unknown user gets the same undifferentiated answer.
    let (status2, body2) = login(&router, "nobody", "whatever").await;
    assert_eq!(status2, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["message"], body2["error"]["message"]);

    // No registry mutation happened on either path.
    assert!(state.revocations().is_empty());
}

#[tokio::test]
async fn test_auth_register_rejects_unknown_role() {
    let state = test_state();
    let router = test_router(&state);

    let (status, body) = register(&router, "eve", "p4ssw0rd!", "SuperAdmin").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    // No user was created.
    assert!(state.users().is_empty());
    let (status, _) = login(&router, "eve", "p4ssw0rd!").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_register_rejects_duplicate_username() {
    let state = test_state();
    let router = test_router(&state);

    let (status, _) = register(&router, "alice", "first", "Reader").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = register(&router, "alice", "second", "Editor").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].as_str().unwrap().contains("alice"));
    assert_eq!(state.users().len(), 1);
}

#[tokio::test]
async fn test_auth_missing_or_garbage_token_rejected() {
    let state = test_state();
    let router = test_router(&state);

    let (status, _) = send(&router, Method::GET, "/api/v1/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) =
        send(&router, Method::GET, "/api/v1/auth/me", Some("garbage.token.here"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_auth_token_without_session_id_is_malformed() {
    let state = test_state();
    let router = test_router(&state);

    let mut claims = vellum_api::Claims::new(
        uuid::Uuid::new_v4(),
        "alice",
        vellum_core::Role::Admin,
        3600,
    )
    .with_issuer("vellum")
    .with_audience("vellum-clients");
    claims.jti = String::new();
    let token = state.jwt().sign(&claims).unwrap();

    let (status, body) = send(&router, Method::GET, "/api/v1/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_auth_me_reflects_token_identity() {
    let state = test_state();
    let router = test_router(&state);

    let (token, login_body) = register_and_login(&router, "carol", "Admin").await;

    let (status, body) = send(&router, Method::GET, "/api/v1/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "carol");
    assert_eq!(body["role"], "admin");
    assert_eq!(body["session_id"], login_body["session_id"]);
}

// =============================================================================
// Notes: Roles and Ownership
// =============================================================================

#[tokio::test]
async fn test_notes_reader_cannot_create() {
    let state = test_state();
    let router = test_router(&state);

    let (token, _) = register_and_login(&router, "rita", "Reader").await;

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/v1/notes",
        Some(&token),
        Some(json!({"title": "nope", "content": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "FORBIDDEN");
    assert!(state.notes().is_empty());
}

#[tokio::test]
async fn test_notes_delete_requires_admin() {
    let state = test_state();
    let router = test_router(&state);

    let (editor_token, _) = register_and_login(&router, "ed", "Editor").await;
    let (admin_token, _) = register_and_login(&router, "root", "Admin").await;

    let (_, note) = send(
        &router,
        Method::POST,
        "/api/v1/notes",
        Some(&editor_token),
        Some(json!({"title": "to delete", "content": ""})),
    )
    .await;
    let note_path = format!("/api/v1/notes/{}", note["id"].as_str().unwrap());

    let (status, _) = send(&router, Method::DELETE, &note_path, Some(&editor_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&router, Method::DELETE, &note_path, Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&router, Method::GET, &note_path, Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_notes_ownership_enforced() {
    let state = test_state();
    let router = test_router(&state);

    let (alice_token, _) = register_and_login(&router, "alice", "Editor").await;
    let (bob_token, _) = register_and_login(&router, "bob", "Editor").await;
    let (admin_token, _) = register_and_login(&router, "root", "Admin").await;

    let (_, note) = send(
        &router,
        Method::POST,
        "/api/v1/notes",
        Some(&alice_token),
        Some(json!({"title": "private", "content": "alice only"})),
    )
    .await;
    let note_path = format!("/api/v1/notes/{}", note["id"].as_str().unwrap());

    // The owner and an admin can read it; another editor cannot.
    let (status, _) = send(&router, Method::GET, &note_path, Some(&alice_token), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&router, Method::GET, &note_path, Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&router, Method::GET, &note_path, Some(&bob_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Same rule for updates.
    let update = json!({"title": "renamed", "content": "still alice's"});
    let (status, _) = send(&router, Method::PUT, &note_path, Some(&bob_token), Some(update.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&router, Method::PUT, &note_path, Some(&alice_token), Some(update)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, updated) = send(&router, Method::GET, &note_path, Some(&alice_token), None).await;
    assert_eq!(updated["title"], "renamed");
}

#[tokio::test]
async fn test_notes_listing_scoped_by_role() {
    let state = test_state();
    let router = test_router(&state);

    let (alice_token, _) = register_and_login(&router, "alice", "Editor").await;
    let (bob_token, _) = register_and_login(&router, "bob", "Editor").await;
    let (admin_token, _) = register_and_login(&router, "root", "Admin").await;

    for i in 0..3 {
        send(
            &router,
            Method::POST,
            "/api/v1/notes",
            Some(&alice_token),
            Some(json!({"title": format!("alice-{}", i), "content": ""})),
        )
        .await;
    }
    send(
        &router,
        Method::POST,
        "/api/v1/notes",
        Some(&bob_token),
        Some(json!({"title": "bob-0", "content": ""})),
    )
    .await;

    let (status, body) = send(&router, Method::GET, "/api/v1/notes", Some(&alice_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notes"].as_array().unwrap().len(), 3);
    assert_eq!(body["meta"]["total"], 3);

    let (_, body) = send(&router, Method::GET, "/api/v1/notes", Some(&admin_token), None).await;
    assert_eq!(body["meta"]["total"], 4);

    // Pagination slices the admin view.
    let (_, body) = send(
        &router,
        Method::GET,
        "/api/v1/notes?page=2&per_page=3",
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(body["notes"].as_array().unwrap().len(), 1);
    assert_eq!(body["meta"]["total_pages"], 2);
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_probes_are_public() {
    let state = test_state();
    let router = test_router(&state);

    let (status, body) = send(&router, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&router, Method::GET, "/ready", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ready"], true);
}
