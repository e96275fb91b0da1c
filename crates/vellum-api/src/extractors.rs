// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Vellum Project. All rights reserved.

//! Custom extractors for API handlers.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::auth::AuthContext;
use crate::error::ApiError;

// =============================================================================
// Auth Extractor
// =============================================================================

/// Extractor for authenticated requests.
///
/// Pulls the [`AuthContext`] out of the request extensions; the gate put it
/// there for any request that passed validation and the revocation check.
/// Rejects with 401 when no context is present.
pub struct Auth(pub AuthContext);

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .map(Auth)
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}

// =============================================================================
// Validated JSON Extractor
// =============================================================================

/// JSON extractor whose rejection uses the API error envelope.
pub struct ValidatedJson<T>(pub T);

impl<S, T> axum::extract::FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(
        req: axum::http::Request<axum::body::Body>,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {}", e)))?;

        Ok(ValidatedJson(value))
    }
}

// =============================================================================
// Pagination Extractor
// =============================================================================

/// Query parameters for pagination.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct PaginationParams {
    /// Page number (1-indexed).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

impl PaginationParams {
    /// Returns the offset into the result set.
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize) * self.per_page as usize
    }

    /// Returns the page size, capped at 100.
    pub fn limit(&self) -> usize {
        self.per_page.min(100) as usize
    }

    /// Validates the pagination parameters.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.page == 0 {
            return Err(ApiError::bad_request("Page must be greater than 0"));
        }
        if self.per_page == 0 || self.per_page > 100 {
            return Err(ApiError::bad_request("per_page must be between 1 and 100"));
        }
        Ok(())
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
        }
    }
}

/// Extractor for pagination parameters.
pub struct Pagination(pub PaginationParams);

impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid pagination parameters: {}", e)))?;

        params.validate()?;
        Ok(Pagination(params))
    }
}

// =============================================================================
// Tests
// =============================================================================
