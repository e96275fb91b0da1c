// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Vellum Project. All rights reserved.

//! API server implementation.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, Method},
    routing::{delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use vellum_core::Role;

use crate::config::ApiConfig;
use crate::error::ApiResult;
use crate::handlers;
use crate::middleware::{AuthLayer, RequireRoleLayer};
use crate::state::AppState;

// =============================================================================
// ApiServer
// =============================================================================

/// The API server.
///
/// Owns the assembled router; `run` binds the listener and serves until the
/// process ends or the shutdown future resolves.
pub struct ApiServer {
    state: AppState,
    config: Arc<ApiConfig>,
}

impl ApiServer {
    /// Creates a new API server with the given state.
    pub fn new(state: AppState) -> Self {
        let config = state.config.clone();
        Self { state, config }
    }

    /// Creates the router with all routes and middleware.
    ///
    /// The router is the explicit endpoint-to-required-roles table: each
    /// role-restricted route carries its [`RequireRoleLayer`] here, not in
    /// its handler.
    pub fn router(&self) -> Router {
        let auth = AuthLayer::new(
            self.state.jwt_manager.clone(),
            self.state.revocations.clone(),
        )
        .with_default_public_paths();

        let middleware_stack = ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new())
            .layer(TimeoutLayer::new(self.config.request_timeout))
            .layer(create_cors_layer(&self.config))
            .layer(auth);

        // Routes that require particular roles.
        let editor_routes = Router::new()
            .route("/api/v1/notes", post(handlers::create_note))
            .route_layer(RequireRoleLayer::any(vec![Role::Editor, Role::Admin]));
        let admin_routes = Router::new()
            .route("/api/v1/notes/{note_id}", delete(handlers::delete_note))
            .route_layer(RequireRoleLayer::one(Role::Admin));

        // Routes open to any authenticated user.
        let authenticated_routes = Router::new()
            .route("/api/v1/auth/logout", post(handlers::logout))
            .route("/api/v1/auth/me", get(handlers::current_user))
            .route("/api/v1/notes", get(handlers::list_notes))
            .route(
                "/api/v1/notes/{note_id}",
                get(handlers::get_note).put(handlers::update_note),
            );

        Router::new()
            // Public endpoints
            .route("/health", get(handlers::health))
            .route("/ready", get(handlers::ready))
            .route("/api/v1/auth/register", post(handlers::register))
            .route("/api/v1/auth/login", post(handlers::login))
            // Protected endpoints
            .merge(editor_routes)
            .merge(admin_routes)
            .merge(authenticated_routes)
            // Apply middleware and state
            .layer(middleware_stack)
            .with_state(self.state.clone())
    }

    /// Runs the server.
    pub async fn run(self) -> ApiResult<()> {
        let addr = self.config.socket_addr();
        let router = self.router();

        info!("Starting API server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| crate::error::ApiError::internal(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, router)
            .await
            .map_err(|e| crate::error::ApiError::internal(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Runs the server with graceful shutdown.
    pub async fn run_with_shutdown(
        self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> ApiResult<()> {
        let addr = self.config.socket_addr();
        let router = self.router();

        info!("Starting API server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| crate::error::ApiError::internal(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| crate::error::ApiError::internal(format!("Server error: {}", e)))?;

        info!("API server shutdown complete");

        Ok(())
    }

    /// Returns the server address.
    pub fn addr(&self) -> std::net::SocketAddr {
        self.config.socket_addr()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Creates the CORS layer from configuration.
fn create_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = &config.cors;

    let methods: Vec<Method> = cors
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(methods)
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(cors.max_age))
}

// =============================================================================
// Tests
// =============================================================================
