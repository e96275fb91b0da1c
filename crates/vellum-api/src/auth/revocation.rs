// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Vellum Project. All rights reserved.

//! In-memory session revocation registry.
//!
//! Tokens are self-verifying, so the only server-side session state is the
//! set of sessions that were logged out before their natural expiry. Each
//! entry maps a session id to the moment expiry validation would reject the
//! token anyway; past that moment the entry is dead weight, and every
//! operation on the registry opportunistically drops dead entries instead
//! of relying on a background sweep task.
//!
//! The registry is process-local and not persisted: a restart forgets all
//! revocations, which fails open to "not revoked" until the affected tokens
//! expire naturally. That tradeoff is accepted and documented at the
//! service level.

use chrono::{DateTime, Utc};
use dashmap::DashMap;

/// Concurrent registry of revoked session ids.
///
/// Backed by a sharded concurrent map, so lookups and inserts from many
/// request tasks never serialize behind a single lock. One instance lives
/// on the application state and is injected wherever revocation is checked.
#[derive(Debug, Default)]
pub struct RevocationRegistry {
    entries: DashMap<String, DateTime<Utc>>,
}

impl RevocationRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Revokes a session until the given expiry.
    ///
    /// Idempotent: revoking the same session again overwrites the stored
    /// expiry. An empty session id is ignored. Runs the opportunistic purge
    /// before inserting, so dead entries never outlive the next mutation.
    pub fn revoke(&self, session_id: &str, expires_at: DateTime<Utc>) {
        if session_id.is_empty() {
            return;
        }
        self.purge_expired();
        self.entries.insert(session_id.to_string(), expires_at);
    }

    /// Returns `true` if the session id is currently revoked.
    ///
    /// Entries whose stored expiry has passed are never reported as revoked;
    /// the call also purges them as a side effect.
    pub fn is_revoked(&self, session_id: &str) -> bool {
        if session_id.is_empty() {
            return false;
        }
        self.purge_expired();
        self.entries.contains_key(session_id)
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the registry holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry whose stored expiry is at or before now.
    ///
    /// Bounds memory to the revocations issued within the last token
    /// lifetime without a dedicated sweeper.
    fn purge_expired(&self) {
        let now = Utc::now();
        self.entries.retain(|_, expires_at| *expires_at > now);
    }
}

// =============================================================================
// Tests
// =============================================================================
