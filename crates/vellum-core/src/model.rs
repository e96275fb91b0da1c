// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Vellum Project. All rights reserved.

//! Domain models: roles, users, and notes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Role
// =============================================================================

/// The closed set of roles a user can hold.
///
/// Roles are assigned at registration and embedded in session tokens. There
/// are no aliases and no custom roles; anything outside this set is rejected
/// at the validation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Read-only access to owned notes.
    Reader,
    /// Can create and edit notes.
    Editor,
    /// Full access, including other users' notes and deletion.
    Admin,
}

impl Role {
    /// Returns the role name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Reader => "reader",
            Role::Editor => "editor",
            Role::Admin => "admin",
        }
    }

    /// Parses a role from a string, case-insensitively.
    ///
    /// Only the three fixed names are accepted; returns `None` for anything
    /// else so callers can reject unknown roles.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "reader" => Some(Role::Reader),
            "editor" => Some(Role::Editor),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Returns all roles in the fixed set.
    pub fn all() -> &'static [Role] {
        &[Role::Reader, Role::Editor, Role::Admin]
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// User
// =============================================================================

/// A registered user.
///
/// Deliberately not `Serialize`: the password hash must never reach a
/// response body. Handlers build their own response shapes.
#[derive(Debug, Clone)]
pub struct User {
    /// Stable user identifier.
    pub id: Uuid,
    /// Unique username.
    pub username: String,
    /// Argon2 PHC-string hash of the password.
    pub password_hash: String,
    /// Assigned role.
    pub role: Role,
}

impl User {
    /// Creates a new user with a fresh id.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            password_hash: password_hash.into(),
            role,
        }
    }
}

// =============================================================================
// Note
// =============================================================================

/// A note owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    /// Note identifier.
    pub id: Uuid,
    /// Note title.
    pub title: String,
    /// Note body.
    pub content: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Id of the owning user.
    pub owner_id: Uuid,
}

impl Note {
    /// Creates a new note with a fresh id, owned by the given user.
    pub fn new(title: impl Into<String>, content: impl Into<String>, owner_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: content.into(),
            created_at: Utc::now(),
            owner_id,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
