// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Vellum Project. All rights reserved.

//! API handlers for all endpoints.
//!
//! - [`auth`]: registration, login, logout, current user
//! - [`notes`]: note CRUD
//! - [`health`]: liveness and readiness probes

mod auth;
mod health;
mod notes;

pub use auth::*;
pub use health::*;
pub use notes::*;
