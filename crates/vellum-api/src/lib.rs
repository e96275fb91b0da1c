// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Vellum Project. All rights reserved.

//! # vellum-api
//!
//! HTTP API server for the Vellum note service.
//!
//! Sessions are self-contained signed tokens; the server keeps no record of
//! valid sessions, only of revoked ones. This crate provides token issuance
//! and validation, the revocation registry, the authentication and role
//! gates, and the request handlers.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod server;
pub mod state;

pub use auth::{AuthContext, Claims, IssuedToken, JwtConfig, JwtManager, RevocationRegistry};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use server::ApiServer;
pub use state::AppState;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
