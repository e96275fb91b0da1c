// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Vellum Project. All rights reserved.

//! Health check handlers.

use axum::{extract::State, response::IntoResponse, Json};

use crate::response::{ComponentStatus, HealthResponse, ReadinessResponse};
use crate::state::AppState;

/// GET /health
///
/// Simple liveness check. Returns 200 OK if the service is running.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse::healthy())
}

/// GET /ready
///
/// Readiness check reporting the in-memory component sizes.
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let components = vec![
        ComponentStatus {
            name: "user_store".to_string(),
            healthy: true,
            message: Some(format!("{} users", state.users().len())),
        },
        ComponentStatus {
            name: "note_store".to_string(),
            healthy: true,
            message: Some(format!("{} notes", state.notes().len())),
        },
        ComponentStatus {
            name: "revocation_registry".to_string(),
            healthy: true,
            message: Some(format!("{} revoked sessions", state.revocations().len())),
        },
    ];

    Json(ReadinessResponse {
        ready: true,
        components,
    })
}
