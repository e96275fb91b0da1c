// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Vellum Project. All rights reserved.

//! Note handlers.
//!
//! Role requirements (create: editor/admin, delete: admin) are declared in
//! the router table; ownership checks stay here because they depend on the
//! resource being fetched.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vellum_core::Note;

use crate::error::{ApiError, ApiResult};
use crate::extractors::{Auth, Pagination, ValidatedJson};
use crate::response::ResponseMeta;
use crate::state::AppState;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Note creation request body.
#[derive(Debug, Deserialize)]
pub struct NoteCreateRequest {
    /// Note title.
    pub title: String,
    /// Note body.
    pub content: String,
}

/// Note update request body.
#[derive(Debug, Deserialize)]
pub struct NoteUpdateRequest {
    /// New title.
    pub title: String,
    /// New body.
    pub content: String,
}

/// A page of notes.
#[derive(Debug, Serialize)]
pub struct NotePage {
    /// The notes on this page.
    pub notes: Vec<Note>,
    /// Pagination metadata.
    pub meta: ResponseMeta,
}

// =============================================================================
// Create
// =============================================================================

/// POST /api/v1/notes
///
/// Creates a note owned by the current user. Requires editor or admin.
pub async fn create_note(
    State(state): State<AppState>,
    Auth(auth_ctx): Auth,
    ValidatedJson(request): ValidatedJson<NoteCreateRequest>,
) -> ApiResult<impl IntoResponse> {
    if request.title.trim().is_empty() {
        return Err(ApiError::bad_request("Title is required"));
    }

    let note = Note::new(request.title, request.content, auth_ctx.user_id);
    state.notes().insert(note.clone());

    tracing::debug!(note_id = %note.id, user_id = %auth_ctx.user_id, "Note created");

    Ok((StatusCode::CREATED, Json(note)))
}

// =============================================================================
// List
// =============================================================================

/// GET /api/v1/notes
///
/// Lists notes, oldest first. Admins see every note; everyone else sees
/// their own.
pub async fn list_notes(
    State(state): State<AppState>,
    Auth(auth_ctx): Auth,
    Pagination(pagination): Pagination,
) -> ApiResult<Json<NotePage>> {
    let notes = if auth_ctx.is_admin() {
        state.notes().all()
    } else {
        state.notes().for_owner(auth_ctx.user_id)
    };

    let total = notes.len() as u64;
    let start = pagination.offset().min(notes.len());
    let end = (start + pagination.limit()).min(notes.len());

    Ok(Json(NotePage {
        notes: notes[start..end].to_vec(),
        meta: ResponseMeta::pagination(total, pagination.page, pagination.per_page),
    }))
}

// =============================================================================
// Get
// =============================================================================

/// GET /api/v1/notes/{note_id}
///
/// Fetches a note. Only the owner or an admin may read it.
pub async fn get_note(
    State(state): State<AppState>,
    Auth(auth_ctx): Auth,
    Path(note_id): Path<Uuid>,
) -> ApiResult<Json<Note>> {
    let note = state
        .notes()
        .get(note_id)
        .ok_or_else(|| ApiError::not_found("Note"))?;

    if !auth_ctx.is_admin() && note.owner_id != auth_ctx.user_id {
        return Err(ApiError::forbidden("You do not own this note"));
    }

    Ok(Json(note))
}

// =============================================================================
// Update
// =============================================================================

/// PUT /api/v1/notes/{note_id}
///
/// Replaces a note's title and content. Only the owner or an admin.
pub async fn update_note(
    State(state): State<AppState>,
    Auth(auth_ctx): Auth,
    Path(note_id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<NoteUpdateRequest>,
) -> ApiResult<impl IntoResponse> {
    if request.title.trim().is_empty() {
        return Err(ApiError::bad_request("Title is required"));
    }

    let note = state
        .notes()
        .get(note_id)
        .ok_or_else(|| ApiError::not_found("Note"))?;

    if !auth_ctx.is_admin() && note.owner_id != auth_ctx.user_id {
        return Err(ApiError::forbidden("You do not own this note"));
    }

    if !state.notes().update(note_id, &request.title, &request.content) {
        return Err(ApiError::not_found("Note"));
    }

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Delete
// =============================================================================

/// DELETE /api/v1/notes/{note_id}
///
/// Deletes a note. Admin only; enforced in the router table.
pub async fn delete_note(
    State(state): State<AppState>,
    Auth(auth_ctx): Auth,
    Path(note_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let note = state
        .notes()
        .remove(note_id)
        .ok_or_else(|| ApiError::not_found("Note"))?;

    tracing::debug!(note_id = %note.id, user_id = %auth_ctx.user_id, "Note deleted");

    Ok(StatusCode::NO_CONTENT)
}
