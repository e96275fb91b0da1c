// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Vellum Project. All rights reserved.

//! API response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vellum_core::Role;

// =============================================================================
// Auth Responses
// =============================================================================

/// Response to a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The signed session token.
    pub token: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
    /// The authenticated user's id.
    pub user_id: Uuid,
    /// The authenticated user's name.
    pub username: String,
    /// The user's role.
    pub role: Role,
    /// The session id embedded in the token.
    pub session_id: String,
}

/// Response to a successful logout.
#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutResponse {
    /// Confirmation message.
    pub message: String,
    /// The revoked session id.
    pub session_id: String,
    /// The horizon until which the session stays in the registry.
    pub revoked_until: DateTime<Utc>,
}

// =============================================================================
// Health Responses
// =============================================================================

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Version string.
    pub version: String,
}

impl HealthResponse {
    /// Creates a healthy response.
    pub fn healthy() -> Self {
        Self {
            status: "ok".to_string(),
            version: crate::VERSION.to_string(),
        }
    }
}

/// Readiness check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// Whether the service is ready.
    pub ready: bool,
    /// Component statuses.
    pub components: Vec<ComponentStatus>,
}

/// Status of a system component.
#[derive(Debug, Serialize, Deserialize)]
pub struct ComponentStatus {
    /// Component name.
    pub name: String,
    /// Whether the component is healthy.
    pub healthy: bool,
    /// Optional message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// =============================================================================
// Response Meta
// =============================================================================

/// Pagination metadata for list responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMeta {
    /// Total number of items.
    pub total: u64,
    /// Page number (1-indexed).
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total pages.
    pub total_pages: u32,
}

impl ResponseMeta {
    /// Creates pagination metadata.
    pub fn pagination(total: u64, page: u32, per_page: u32) -> Self {
        let total_pages = ((total as f64) / (per_page as f64)).ceil() as u32;
        Self {
            total,
            page,
            per_page,
            total_pages,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response() {
        let response = HealthResponse::healthy();
        assert_eq!(response.status, "ok");
        assert!(!response.version.is_empty());
    }

    #[test]
    fn test_response_meta_pagination() {
        let meta = ResponseMeta::pagination(101, 2, 10);
        assert_eq!(meta.total, 101);
        assert_eq!(meta.page, 2);
        assert_eq!(meta.total_pages, 11);
    }
}
