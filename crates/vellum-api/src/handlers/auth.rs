// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Vellum Project. All rights reserved.

//! Authentication handlers: register, login, logout, current user.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vellum_core::{password, Role, User};

use crate::error::{ApiError, ApiResult};
use crate::extractors::{Auth, ValidatedJson};
use crate::response::{LoginResponse, LogoutResponse};
use crate::state::AppState;

// =============================================================================
// Register
// =============================================================================

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Desired username.
    pub username: String,
    /// Plaintext password, hashed before storage.
    pub password: String,
    /// Requested role; must be one of the fixed set.
    pub role: String,
}

/// Registration response body.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// The new user's id.
    pub id: Uuid,
    /// The new user's name.
    pub username: String,
    /// The assigned role.
    pub role: Role,
}

/// POST /api/v1/auth/register
///
/// Creates a new user. The password is stored only as a one-way hash.
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    let username = request.username.trim();
    if username.is_empty() || request.password.is_empty() {
        return Err(ApiError::bad_request("Username and password are required"));
    }

    let role = Role::parse(&request.role)
        .ok_or_else(|| ApiError::bad_request("Role must be one of reader, editor, admin"))?;

    let password_hash = password::hash_password(&request.password)?;
    let user = User::new(username, password_hash, role);
    let response = RegisterResponse {
        id: user.id,
        username: user.username.clone(),
        role: user.role,
    };

    state.users().insert(user)?;

    tracing::info!(user_id = %response.id, username = %response.username, role = %role, "User registered");

    Ok((StatusCode::CREATED, Json(response)))
}

// =============================================================================
// Login
// =============================================================================

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

/// POST /api/v1/auth/login
///
/// Verifies credentials and issues a session token. Unknown usernames and
/// wrong passwords produce the same 401; nothing is written server-side on
/// either path.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    if request.username.is_empty() || request.password.is_empty() {
        return Err(ApiError::bad_request("Username and password are required"));
    }

    let user = state
        .users()
        .find_by_username(&request.username)
        .filter(|user| password::verify_password(&request.password, &user.password_hash))
        .ok_or_else(|| ApiError::unauthorized("Invalid username or password"))?;

    let issued = state.jwt().issue(user.id, &user.username, user.role)?;

    tracing::info!(
        user_id = %user.id,
        session_id = %issued.session_id,
        "User logged in"
    );

    Ok(Json(LoginResponse {
        token: issued.token,
        expires_at: issued.expires_at,
        user_id: user.id,
        username: user.username,
        role: user.role,
        session_id: issued.session_id,
    }))
}

// =============================================================================
// Logout
// =============================================================================

/// POST /api/v1/auth/logout
///
/// Revokes the current session. The token stays cryptographically valid
/// until its natural expiry, so the session id goes into the revocation
/// registry with that expiry as its horizon; when the token's own expiry is
/// unrepresentable the horizon falls back to now plus the configured TTL —
/// the same constant used at issuance.
pub async fn logout(
    State(state): State<AppState>,
    Auth(auth_ctx): Auth,
) -> ApiResult<Json<LogoutResponse>> {
    if auth_ctx.session_id.is_empty() {
        return Err(ApiError::bad_request("Token has no session id"));
    }

    let revoked_until = auth_ctx
        .expires_at
        .unwrap_or_else(|| Utc::now() + state.jwt().token_ttl());

    state.revocations().revoke(&auth_ctx.session_id, revoked_until);

    tracing::info!(
        user_id = %auth_ctx.user_id,
        session_id = %auth_ctx.session_id,
        revoked_until = %revoked_until,
        "Session revoked"
    );

    Ok(Json(LogoutResponse {
        message: "Logged out; the session is revoked until it would have expired".to_string(),
        session_id: auth_ctx.session_id,
        revoked_until,
    }))
}

// =============================================================================
// Current User
// =============================================================================

/// Current user response.
#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    /// User id.
    pub user_id: Uuid,
    /// Username.
    pub username: String,
    /// Role.
    pub role: Role,
    /// Session id.
    pub session_id: String,
}

/// GET /api/v1/auth/me
///
/// Returns the identity carried by the current token.
pub async fn current_user(Auth(auth_ctx): Auth) -> ApiResult<Json<CurrentUserResponse>> {
    Ok(Json(CurrentUserResponse {
        user_id: auth_ctx.user_id,
        username: auth_ctx.username,
        role: auth_ctx.role,
        session_id: auth_ctx.session_id,
    }))
}
