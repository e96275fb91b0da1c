// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Vellum Project. All rights reserved.

//! API error types and HTTP mapping.
//!
//! Every failure in the request path is recovered here and turned into a
//! structured JSON response; nothing propagates far enough to crash the
//! process. Authentication failures are deliberately undifferentiated: the
//! caller sees a single 401 regardless of which check rejected the token,
//! while a revoked session gets its own code so clients can distinguish
//! "log in again" from "this session was ended".

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// The single message returned for every token-validation failure.
pub const AUTH_FAILED_MESSAGE: &str = "Invalid or expired token";

/// The message returned when a session has been revoked by logout.
pub const SESSION_REVOKED_MESSAGE: &str = "Session has been revoked";

// =============================================================================
// ApiError
// =============================================================================

/// API error type with HTTP status code mapping.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404).
    #[error("Resource not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// Bad request (400): malformed input, duplicate username, invalid role,
    /// or a token missing its session id claim.
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Unauthorized (401): missing, invalid, or expired credentials.
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Error message.
        message: String,
    },

    /// Unauthorized (401) with a distinct code: the session id is present in
    /// the revocation registry.
    #[error("Session revoked")]
    SessionRevoked,

    /// Forbidden (403): authenticated, but the role does not permit this.
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Error message.
        message: String,
    },

    /// Invalid process configuration. Raised at startup only; a request
    /// should never produce this.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message.
        message: String,
    },

    /// Internal server error (500).
    #[error("Internal error: {message}")]
    Internal {
        /// Error message (for logging, not user-facing).
        message: String,
    },
}

impl ApiError {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Creates a not found error.
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Creates an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Creates the undifferentiated authentication failure.
    pub fn auth_failed() -> Self {
        Self::unauthorized(AUTH_FAILED_MESSAGE)
    }

    /// Creates a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    // =========================================================================
    // Properties
    // =========================================================================

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::SessionRevoked => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code for categorization.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::BadRequest { .. } => "BAD_REQUEST",
            ApiError::Unauthorized { .. } => "UNAUTHORIZED",
            ApiError::SessionRevoked => "SESSION_REVOKED",
            ApiError::Forbidden { .. } => "FORBIDDEN",
            ApiError::Configuration { .. } => "CONFIGURATION_ERROR",
            ApiError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Returns a message that is safe to show to the caller.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::NotFound { resource } => format!("{} not found", resource),
            ApiError::BadRequest { message } => message.clone(),
            ApiError::Unauthorized { message } => message.clone(),
            ApiError::SessionRevoked => SESSION_REVOKED_MESSAGE.to_string(),
            ApiError::Forbidden { message } => message.clone(),
            ApiError::Configuration { .. } | ApiError::Internal { .. } => {
                "Internal server error".to_string()
            }
        }
    }

    /// Returns `true` if this error should be logged at error level.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            ApiError::Internal { .. } | ApiError::Configuration { .. }
        )
    }
}

// =============================================================================
// IntoResponse Implementation
// =============================================================================

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.user_message();

        if self.is_server_error() {
            tracing::error!(
                error = %self,
                error_code = error_code,
                status = %status,
                "Server error occurred"
            );
        } else {
            tracing::debug!(
                error = %self,
                error_code = error_code,
                status = %status,
                "Client error occurred"
            );
        }

        let body = ErrorResponseBody {
            error: ErrorDetails {
                code: error_code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Error Response Body
// =============================================================================

/// Error response body structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseBody {
    /// Error details.
    pub error: ErrorDetails,
}

/// Error details within the response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

// =============================================================================
// From Implementations
// =============================================================================

impl From<vellum_core::CoreError> for ApiError {
    fn from(err: vellum_core::CoreError) -> Self {
        match err {
            vellum_core::CoreError::UsernameTaken(name) => {
                ApiError::bad_request(format!("Username '{}' is already taken", name))
            }
            vellum_core::CoreError::PasswordHash(message) => ApiError::internal(message),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::bad_request(format!("Invalid JSON: {}", err))
    }
}

// =============================================================================
// Tests
// =============================================================================
