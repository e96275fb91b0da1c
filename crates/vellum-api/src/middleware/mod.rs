// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Vellum Project. All rights reserved.

//! Middleware for the API server.
//!
//! - [`AuthMiddleware`]: token validation plus the revocation check
//! - [`RequireRoleLayer`]: per-route required-role enforcement

mod auth;
mod rbac;

pub use auth::{AuthLayer, AuthMiddleware};
pub use rbac::RequireRoleLayer;
