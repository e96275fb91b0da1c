// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Vellum Project. All rights reserved.

//! Error types for the Vellum binary.

use thiserror::Error;

/// Result type alias for binary operations.
pub type BinResult<T> = Result<T, BinError>;

/// Errors that can occur in the Vellum binary.
#[derive(Debug, Error)]
pub enum BinError {
    /// Configuration error. Fatal at startup.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// API error.
    #[error("API error: {0}")]
    Api(#[from] vellum_api::ApiError),
}

impl BinError {
    /// Creates a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}
