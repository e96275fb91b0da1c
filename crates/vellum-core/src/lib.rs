// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Vellum Project. All rights reserved.

//! # vellum-core
//!
//! Domain layer for the Vellum note service: users, notes, roles, the
//! in-memory record stores, and the one-way password verifier.
//!
//! This crate is HTTP-free; everything request-facing lives in `vellum-api`.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod model;
pub mod password;
pub mod store;

pub use error::{CoreError, CoreResult};
pub use model::{Note, Role, User};
pub use store::{NoteStore, UserStore};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
