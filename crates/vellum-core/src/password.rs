// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Vellum Project. All rights reserved.

//! One-way password hashing and verification.
//!
//! Argon2id with default parameters and a fresh random salt per hash. The
//! verifier is an opaque match/no-match predicate: callers never learn why a
//! verification failed, and a malformed stored hash simply fails to match.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::{CoreError, CoreResult};

/// Hashes a plaintext password into a PHC-format string.
pub fn hash_password(plain: &str) -> CoreResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CoreError::PasswordHash(e.to_string()))
}

/// Verifies a plaintext password against a stored PHC-format hash.
///
/// Returns `false` for a mismatch or for a stored hash that cannot be
/// parsed; no distinction is exposed.
pub fn verify_password(plain: &str, phc_hash: &str) -> bool {
    match PasswordHash::new(phc_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

// =============================================================================
// Tests
// =============================================================================
