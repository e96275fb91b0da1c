// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Vellum Project. All rights reserved.

//! Application state shared across handlers.

use std::sync::Arc;

use vellum_core::{NoteStore, UserStore};

use crate::auth::{JwtManager, RevocationRegistry};
use crate::config::ApiConfig;

// =============================================================================
// AppState
// =============================================================================

/// Application state shared across all handlers.
///
/// The revocation registry lives here as an explicit, injected component;
/// all mutation of revocation state goes through its two operations.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: Arc<ApiConfig>,
    /// JWT manager for token issuance and validation.
    pub jwt_manager: Arc<JwtManager>,
    /// Session revocation registry.
    pub revocations: Arc<RevocationRegistry>,
    /// User store.
    pub users: Arc<UserStore>,
    /// Note store.
    pub notes: Arc<NoteStore>,
}

impl AppState {
    /// Creates a new app state builder.
    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::new()
    }

    /// Returns the JWT manager.
    pub fn jwt(&self) -> &JwtManager {
        &self.jwt_manager
    }

    /// Returns the revocation registry.
    pub fn revocations(&self) -> &RevocationRegistry {
        &self.revocations
    }

    /// Returns the user store.
    pub fn users(&self) -> &UserStore {
        &self.users
    }

    /// Returns the note store.
    pub fn notes(&self) -> &NoteStore {
        &self.notes
    }
}

// =============================================================================
// AppStateBuilder
// =============================================================================

/// Builder for constructing [`AppState`].
#[derive(Default)]
pub struct AppStateBuilder {
    config: Option<ApiConfig>,
    jwt_manager: Option<Arc<JwtManager>>,
    revocations: Option<Arc<RevocationRegistry>>,
    users: Option<Arc<UserStore>>,
    notes: Option<Arc<NoteStore>>,
}

impl AppStateBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the JWT manager.
    pub fn jwt_manager(mut self, manager: Arc<JwtManager>) -> Self {
        self.jwt_manager = Some(manager);
        self
    }

    /// Sets the revocation registry.
    pub fn revocations(mut self, revocations: Arc<RevocationRegistry>) -> Self {
        self.revocations = Some(revocations);
        self
    }

    /// Sets the user store.
    pub fn users(mut self, users: Arc<UserStore>) -> Self {
        self.users = Some(users);
        self
    }

    /// Sets the note store.
    pub fn notes(mut self, notes: Arc<NoteStore>) -> Self {
        self.notes = Some(notes);
        self
    }

    /// Builds the state.
    ///
    /// Fails if the configuration carries no usable signing secret; that
    /// check runs here, at startup, never per request.
    pub fn build(self) -> crate::error::ApiResult<AppState> {
        let config = self.config.unwrap_or_default();

        let jwt_manager = match self.jwt_manager {
            Some(manager) => manager,
            None => Arc::new(JwtManager::new(config.jwt.clone())?),
        };

        Ok(AppState {
            config: Arc::new(config),
            jwt_manager,
            revocations: self
                .revocations
                .unwrap_or_else(|| Arc::new(RevocationRegistry::new())),
            users: self.users.unwrap_or_else(|| Arc::new(UserStore::new())),
            notes: self.notes.unwrap_or_else(|| Arc::new(NoteStore::new())),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
