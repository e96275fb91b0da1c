// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Vellum Project. All rights reserved.

//! Role gate middleware.
//!
//! Each protected route declares its required role set once, in the router
//! table, by attaching this layer. Requests that passed authentication but
//! carry an insufficient role are rejected with 403 before the handler runs.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};
use tower::{Layer, Service};
use vellum_core::Role;

use crate::auth::AuthContext;
use crate::error::ApiError;

// =============================================================================
// RequireRoleLayer
// =============================================================================

/// Layer restricting a route to a set of roles.
#[derive(Clone)]
pub struct RequireRoleLayer {
    allowed: Arc<Vec<Role>>,
}

impl RequireRoleLayer {
    /// Creates a layer requiring exactly one role.
    pub fn one(role: Role) -> Self {
        Self {
            allowed: Arc::new(vec![role]),
        }
    }

    /// Creates a layer allowing any of the given roles.
    pub fn any(roles: impl Into<Vec<Role>>) -> Self {
        Self {
            allowed: Arc::new(roles.into()),
        }
    }
}

impl<S> Layer<S> for RequireRoleLayer {
    type Service = RequireRoleMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequireRoleMiddleware {
            inner,
            allowed: self.allowed.clone(),
        }
    }
}

// =============================================================================
// RequireRoleMiddleware
// =============================================================================

/// Middleware enforcing a route's required role set.
#[derive(Clone)]
pub struct RequireRoleMiddleware<S> {
    inner: S,
    allowed: Arc<Vec<Role>>,
}

impl<S> Service<Request<Body>> for RequireRoleMiddleware<S>
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

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let allowed = self.allowed.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let auth_ctx = req.extensions().get::<AuthContext>().cloned();

            match auth_ctx {
                Some(ctx) if ctx.has_any_role(&allowed) => inner.call(req).await,
                Some(ctx) => {
                    tracing::warn!(
                        user_id = %ctx.user_id,
                        role = %ctx.role,
                        required = ?allowed.as_slice(),
                        "Role check failed"
                    );
                    Ok(ApiError::forbidden("Insufficient role").into_response())
                }
                None => {
                    tracing::warn!("No auth context found, denying access");
                    Ok(ApiError::unauthorized("Authentication required").into_response())
                }
            }
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
