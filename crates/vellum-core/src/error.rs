// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Vellum Project. All rights reserved.

//! Error types for the domain layer.

use thiserror::Error;

/// Result type alias for domain operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors produced by the domain layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A user with the given username already exists.
    #[error("username '{0}' is already taken")]
    UsernameTaken(String),

    /// Password hashing failed.
    ///
    /// The underlying cause is carried as a string; PHC parse details are
    /// not part of this crate's public surface.
    #[error("password hashing failed: {0}")]
    PasswordHash(String),
}

// =============================================================================
// Tests
// =============================================================================
