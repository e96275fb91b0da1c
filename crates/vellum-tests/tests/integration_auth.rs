// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Vellum Project. All rights reserved.

//! # Session Token Integration Tests
//!
//! Exercises the token lifecycle against the public crate surface:
//!
//! - `test_token_*`: issuance and validation
//! - `test_revocation_*`: revocation registry behavior

use chrono::{Duration, Utc};
use uuid::Uuid;
use vellum_api::{Claims, JwtConfig, JwtManager, RevocationRegistry};
use vellum_core::Role;

fn test_manager() -> JwtManager {
    JwtManager::new(JwtConfig::new(vellum_tests::TEST_SECRET)).expect("manager should build")
}

// =============================================================================
// Token Lifecycle
// =============================================================================

#[test]
fn test_token_roundtrip_preserves_identity() {
    let manager = test_manager();
    let user_id = Uuid::new_v4();

    for role in Role::all() {
        let issued = manager.issue(user_id, "alice", *role).unwrap();
        let claims = manager.validate(&issued.token).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.name, "alice");
        assert_eq!(claims.role, *role);
        assert_eq!(claims.jti, issued.session_id);
    }
}

#[test]
fn test_token_expiry_bounds() {
    let manager = test_manager();

    // Fresh token validates.
    let issued = manager.issue(Uuid::new_v4(), "alice", Role::Reader).unwrap();
    assert!(manager.validate(&issued.token).is_ok());

    // A token expired beyond the leeway window is rejected.
    let mut claims = Claims::new(Uuid::new_v4(), "alice", Role::Reader, 0);
    claims.iat -= 600;
    claims.nbf -= 600;
    claims.exp -= 600;
    let claims = claims.with_issuer("vellum").with_audience("vellum-clients");
    let stale = manager.sign(&claims).unwrap();
    assert!(manager.validate(&stale).is_err());
}

#[test]
fn test_token_cross_deployment_rejection() {
    let manager = test_manager();
    let foreign =
        JwtManager::new(JwtConfig::new("a-completely-different-signing-secret!")).unwrap();

    let issued = foreign.issue(Uuid::new_v4(), "mallory", Role::Admin).unwrap();
    assert!(manager.validate(&issued.token).is_err());
}

// =============================================================================
// Revocation Registry
// =============================================================================

#[test]
fn test_revocation_of_issued_session() {
    let manager = test_manager();
    let registry = RevocationRegistry::new();

    let issued = manager.issue(Uuid::new_v4(), "alice", Role::Editor).unwrap();
    assert!(!registry.is_revoked(&issued.session_id));

    registry.revoke(&issued.session_id, issued.expires_at);
    assert!(registry.is_revoked(&issued.session_id));

    // The token itself still validates; revocation is a separate gate.
    assert!(manager.validate(&issued.token).is_ok());
}

#[test]
fn test_revocation_is_idempotent() {
    let registry = RevocationRegistry::new();
    let horizon = Utc::now() + Duration::hours(1);

    registry.revoke("session-x", horizon);
    registry.revoke("session-x", horizon);

    assert!(registry.is_revoked("session-x"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_unrevoked_sessions_stay_clear() {
    let registry = RevocationRegistry::new();
    registry.revoke("revoked-session", Utc::now() + Duration::hours(1));

    assert!(!registry.is_revoked("some-other-session"));
    assert!(!registry.is_revoked(""));
}

#[test]
fn test_registry_purges_on_any_operation() {
    let registry = RevocationRegistry::new();

    registry.revoke("dead-session", Utc::now() - Duration::seconds(5));
    assert_eq!(registry.len(), 1);

    // An unrelated lookup sweeps the dead entry out.
    let _ = registry.is_revoked("unrelated");
    assert_eq!(registry.len(), 0);
}
