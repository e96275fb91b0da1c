// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Vellum Project. All rights reserved.

//! JWT session token issuance and validation.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vellum_core::Role;

use super::Claims;
use crate::error::{ApiError, ApiResult};

// =============================================================================
// JwtConfig
// =============================================================================

/// JWT configuration.
///
/// Loaded once at startup and treated as immutable. The signing secret has
/// no default; an empty secret fails [`JwtConfig::validate`], which makes a
/// misconfigured deployment die at startup instead of per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    #[serde(skip_serializing)]
    pub secret: String,
    /// Token issuer.
    pub issuer: String,
    /// Token audience.
    pub audience: String,
    /// Session token lifetime in seconds. Fixed per deployment, not per call.
    pub token_ttl_secs: i64,
    /// Clock skew tolerance in seconds, applied symmetrically to the
    /// not-before and expiry bounds.
    pub leeway_secs: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(), // Must be set by the deployment
            issuer: "vellum".to_string(),
            audience: "vellum-clients".to_string(),
            token_ttl_secs: 3600, // 1 hour
            leeway_secs: 120,     // 2 minutes
        }
    }
}

impl JwtConfig {
    /// Creates a new configuration with the given secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Sets the issuer.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Sets the audience.
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    /// Sets the token lifetime in seconds.
    pub fn with_ttl_secs(mut self, secs: i64) -> Self {
        self.token_ttl_secs = secs;
        self
    }

    /// Returns the token lifetime as a duration.
    pub fn token_ttl(&self) -> Duration {
        Duration::seconds(self.token_ttl_secs)
    }

    /// Validates the configuration.
    ///
    /// An absent or empty signing secret is a fatal configuration error.
    pub fn validate(&self) -> ApiResult<()> {
        if self.secret.is_empty() {
            return Err(ApiError::configuration("JWT signing secret is not configured"));
        }
        if self.secret.len() < 32 {
            tracing::warn!("JWT signing secret is shorter than the recommended 32 bytes");
        }
        Ok(())
    }
}

// =============================================================================
// IssuedToken
// =============================================================================

/// The result of issuing a session token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// The signed compact token.
    pub token: String,
    /// The session id embedded in the token.
    pub session_id: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
}

// =============================================================================
// JwtManager
// =============================================================================

/// Issues and validates session tokens.
///
/// Signing and verification are HS256 against a single symmetric secret.
/// Validation checks signature, exact issuer and audience, and the
/// `[nbf, exp]` window with the configured leeway on both bounds; it is a
/// pure function of the token and the clock.
#[derive(Clone)]
pub struct JwtManager {
    config: Arc<JwtConfig>,
    encoding_key: Arc<EncodingKey>,
    decoding_key: Arc<DecodingKey>,
    validation: Arc<Validation>,
}

impl JwtManager {
    /// Creates a new manager with the given configuration.
    ///
    /// Fails with a configuration error if the secret is empty.
    pub fn new(config: JwtConfig) -> ApiResult<Self> {
        config.validate()?;

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.leeway = config.leeway_secs;
        validation.validate_nbf = true;

        Ok(Self {
            config: Arc::new(config),
            encoding_key: Arc::new(encoding_key),
            decoding_key: Arc::new(decoding_key),
            validation: Arc::new(validation),
        })
    }

    /// Issues a session token for an authenticated user.
    ///
    /// Generates a fresh session id; the token carries the user's id, name,
    /// and role, and expires after the configured TTL. No state is written:
    /// the token itself is the only record of the session.
    pub fn issue(&self, user_id: Uuid, username: &str, role: Role) -> ApiResult<IssuedToken> {
        let claims = Claims::new(user_id, username, role, self.config.token_ttl_secs)
            .with_issuer(&self.config.issuer)
            .with_audience(&self.config.audience);

        let expires_at = claims
            .expires_at()
            .ok_or_else(|| ApiError::internal("Token expiry out of range"))?;
        let session_id = claims.jti.clone();
        let token = self.sign(&claims)?;

        Ok(IssuedToken {
            token,
            session_id,
            expires_at,
        })
    }

    /// Signs a claim set.
    ///
    /// Exposed so tests can build claims with hand-picked timestamps.
    pub fn sign(&self, claims: &Claims) -> ApiResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| ApiError::internal(format!("Failed to sign token: {}", e)))
    }

    /// Validates a token and returns its claims.
    ///
    /// All failures collapse to the same undifferentiated 401; the actual
    /// cause is only visible in debug logs, so callers cannot probe which
    /// check rejected the token.
    pub fn validate(&self, token: &str) -> ApiResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(kind = ?e.kind(), "Token validation failed");
                ApiError::auth_failed()
            })
    }

    /// Returns the configured token lifetime.
    pub fn token_ttl(&self) -> Duration {
        self.config.token_ttl()
    }

    /// Returns the configured token lifetime in seconds.
    pub fn token_ttl_secs(&self) -> i64 {
        self.config.token_ttl_secs
    }
}

impl std::fmt::Debug for JwtManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtManager")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .field("token_ttl_secs", &self.config.token_ttl_secs)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
