// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Vellum Project. All rights reserved.

//! JWT claims structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vellum_core::Role;

/// Claims embedded in a session token.
///
/// One token is issued per login with a fresh `jti`; the `jti` is the sole
/// key under which a session can later be revoked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the stable user id.
    pub sub: String,

    /// The user's display name.
    pub name: String,

    /// The user's role.
    pub role: Role,

    /// Session id, unique per issuance. Tolerated as missing at the serde
    /// level so the gate can reject a jti-less token as malformed rather
    /// than as a signature failure.
    #[serde(default)]
    pub jti: String,

    /// Issued at (Unix timestamp).
    pub iat: i64,

    /// Not before (Unix timestamp).
    pub nbf: i64,

    /// Expiration time (Unix timestamp).
    pub exp: i64,

    /// Issuer.
    pub iss: String,

    /// Audience.
    pub aud: String,
}

impl Claims {
    /// Creates claims for a fresh session.
    ///
    /// Generates a new random session id; sets `nbf = iat = now` and
    /// `exp = now + ttl_secs`.
    pub fn new(user_id: Uuid, username: impl Into<String>, role: Role, ttl_secs: i64) -> Self {
        let now = Utc::now().timestamp();

        Self {
            sub: user_id.to_string(),
            name: username.into(),
            role,
            jti: Uuid::new_v4().to_string(),
            iat: now,
            nbf: now,
            exp: now + ttl_secs,
            iss: String::new(),
            aud: String::new(),
        }
    }

    /// Sets the issuer.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.iss = issuer.into();
        self
    }

    /// Sets the audience.
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.aud = audience.into();
        self
    }

    /// Returns the session id.
    pub fn session_id(&self) -> &str {
        &self.jti
    }

    /// Returns the expiration time, if representable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Returns `true` if the token has expired (without leeway).
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

// =============================================================================
// Tests
// =============================================================================
