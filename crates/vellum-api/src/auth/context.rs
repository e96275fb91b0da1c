// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Vellum Project. All rights reserved.

//! Authentication context.

use chrono::{DateTime, Utc};
use uuid::Uuid;
use vellum_core::Role;

use super::Claims;
use crate::error::{ApiError, ApiResult};

/// Per-request authentication context.
///
/// Built by the authentication gate after a token has passed validation and
/// the revocation check, and attached to the request extensions for
/// handlers and the role gate.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// The authenticated user's id.
    pub user_id: Uuid,
    /// The authenticated user's name.
    pub username: String,
    /// The user's role, as carried by the token.
    pub role: Role,
    /// The session id from the token.
    pub session_id: String,
    /// The token's expiry, if representable. Logout uses this as the
    /// revocation horizon.
    pub expires_at: Option<DateTime<Utc>>,
    /// Request id for log correlation.
    pub request_id: Uuid,
}

impl AuthContext {
    /// Builds a context from validated claims.
    ///
    /// Fails if the subject is not a well-formed user id; that is treated as
    /// any other authentication failure.
    pub fn from_claims(claims: &Claims) -> ApiResult<Self> {
        let user_id = claims.sub.parse::<Uuid>().map_err(|_| {
            tracing::debug!(sub = %claims.sub, "Token subject is not a valid user id");
            ApiError::auth_failed()
        })?;

        Ok(Self {
            user_id,
            username: claims.name.clone(),
            role: claims.role,
            session_id: claims.jti.clone(),
            expires_at: claims.expires_at(),
            request_id: Uuid::new_v4(),
        })
    }

    /// Returns `true` if the context holds the given role.
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    /// Returns `true` if the context holds any of the given roles.
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }

    /// Returns `true` if the user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_from_claims() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id, "alice", Role::Editor, 3600);

        let ctx = AuthContext::from_claims(&claims).unwrap();

        assert_eq!(ctx.user_id, user_id);
        assert_eq!(ctx.username, "alice");
        assert_eq!(ctx.session_id, claims.jti);
        assert!(ctx.has_role(Role::Editor));
        assert!(ctx.has_any_role(&[Role::Editor, Role::Admin]));
        assert!(!ctx.has_any_role(&[Role::Admin]));
        assert!(!ctx.is_admin());
        assert!(ctx.expires_at.is_some());
    }

    #[test]
    fn test_malformed_subject_rejected() {
        let mut claims = Claims::new(Uuid::new_v4(), "alice", Role::Reader, 3600);
        claims.sub = "not-a-uuid".to_string();

        let err = AuthContext::from_claims(&claims).unwrap_err();
        assert_eq!(err.error_code(), "UNAUTHORIZED");
    }
}
