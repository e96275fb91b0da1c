// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Vellum Project. All rights reserved.

//! Authentication gate middleware.
//!
//! Runs on every request to a protected path, in this order:
//!
//! 1. signature/claims validation — failure stops here with 401, the
//!    revocation registry is never consulted;
//! 2. session id presence — a token without a `jti` is malformed (400);
//! 3. revocation lookup — a revoked session gets a distinct 401 before any
//!    role check or handler runs;
//! 4. on success the [`AuthContext`] is attached to the request extensions.

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    http::{header, Request},
    response::{IntoResponse, Response},
};
use tower::{Layer, Service};

use crate::auth::{AuthContext, JwtManager, RevocationRegistry};
use crate::error::ApiError;

// =============================================================================
// AuthLayer
// =============================================================================

/// Layer wrapping services with the authentication gate.
#[derive(Clone)]
pub struct AuthLayer {
    jwt_manager: Arc<JwtManager>,
    revocations: Arc<RevocationRegistry>,
    public_paths: Arc<HashSet<String>>,
}

impl AuthLayer {
    /// Creates a new auth layer.
    pub fn new(jwt_manager: Arc<JwtManager>, revocations: Arc<RevocationRegistry>) -> Self {
        Self {
            jwt_manager,
            revocations,
            public_paths: Arc::new(HashSet::new()),
        }
    }

    /// Sets the paths that bypass authentication.
    ///
    /// A trailing `*` matches any path with the given prefix.
    pub fn with_public_paths(mut self, paths: Vec<String>) -> Self {
        self.public_paths = Arc::new(paths.into_iter().collect());
        self
    }

    /// Adds the default public paths: health probes, login, and register.
    pub fn with_default_public_paths(self) -> Self {
        self.with_public_paths(vec![
            "/health".to_string(),
            "/ready".to_string(),
            "/api/v1/auth/login".to_string(),
            "/api/v1/auth/register".to_string(),
        ])
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            jwt_manager: self.jwt_manager.clone(),
            revocations: self.revocations.clone(),
            public_paths: self.public_paths.clone(),
        }
    }
}

// =============================================================================
// AuthMiddleware
// =============================================================================

/// Middleware enforcing the authentication gate.
#[derive(Clone)]
pub struct AuthMiddleware<S> {
    inner: S,
    jwt_manager: Arc<JwtManager>,
    revocations: Arc<RevocationRegistry>,
    public_paths: Arc<HashSet<String>>,
}

impl<S> AuthMiddleware<S> {
    /// Checks if a path is public.
    fn is_public_path(&self, path: &str) -> bool {
        if self.public_paths.contains(path) {
            return true;
        }

        for public_path in self.public_paths.iter() {
            if let Some(prefix) = public_path.strip_suffix('*') {
                if path.starts_with(prefix) {
                    return true;
                }
            }
        }

        false
    }
}

impl<S> Service<Request<Body>> for AuthMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let jwt_manager = self.jwt_manager.clone();
        let revocations = self.revocations.clone();
        let is_public = self.is_public_path(req.uri().path());
        let mut inner = self.inner.clone();

        Box::pin(async move {
            if is_public {
                return inner.call(req).await;
            }

            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => {
                    tracing::debug!("No bearer token provided");
                    return Ok(ApiError::auth_failed().into_response());
                }
            };

            // Signature, issuer, audience, and lifetime checks. The registry
            // is not consulted for a token that fails here.
            let claims = match jwt_manager.validate(&token) {
                Ok(claims) => claims,
                Err(e) => return Ok(e.into_response()),
            };

            if claims.jti.is_empty() {
                tracing::debug!(sub = %claims.sub, "Token carries no session id");
                return Ok(ApiError::bad_request("Token has no session id").into_response());
            }

            if revocations.is_revoked(&claims.jti) {
                tracing::info!(
                    sub = %claims.sub,
                    session_id = %claims.jti,
                    "Rejected revoked session"
                );
                return Ok(ApiError::SessionRevoked.into_response());
            }

            let auth_ctx = match AuthContext::from_claims(&claims) {
                Ok(ctx) => ctx,
                Err(e) => return Ok(e.into_response()),
            };

            req.extensions_mut().insert(auth_ctx);

            inner.call(req).await
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token<B>(req: &Request<B>) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer ").map(|s| s.to_string()))
}

// =============================================================================
// Tests
// =============================================================================
