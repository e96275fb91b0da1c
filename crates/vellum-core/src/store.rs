// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Vellum Project. All rights reserved.

//! In-memory record stores for users and notes.
//!
//! Both stores are sharded concurrent maps shared across all request tasks.
//! Nothing here persists: a process restart starts from an empty store.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::model::{Note, User};

// =============================================================================
// UserStore
// =============================================================================

/// Concurrent user store keyed by username.
///
/// Usernames are unique; insertion uses the map's entry API so two
/// concurrent registrations of the same name cannot both succeed.
#[derive(Debug, Default)]
pub struct UserStore {
    users: DashMap<String, User>,
}

impl UserStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new user.
    ///
    /// Fails with [`CoreError::UsernameTaken`] if the username exists.
    pub fn insert(&self, user: User) -> CoreResult<()> {
        match self.users.entry(user.username.clone()) {
            Entry::Occupied(_) => Err(CoreError::UsernameTaken(user.username)),
            Entry::Vacant(slot) => {
                slot.insert(user);
                Ok(())
            }
        }
    }

    /// Looks up a user by username.
    pub fn find_by_username(&self, username: &str) -> Option<User> {
        self.users.get(username).map(|entry| entry.value().clone())
    }

    /// Returns the number of registered users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Returns `true` if no users are registered.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

// =============================================================================
// NoteStore
// =============================================================================

/// Concurrent note store keyed by note id.
#[derive(Debug, Default)]
pub struct NoteStore {
    notes: DashMap<Uuid, Note>,
}

impl NoteStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a note.
    pub fn insert(&self, note: Note) {
        self.notes.insert(note.id, note);
    }

    /// Looks up a note by id.
    pub fn get(&self, id: Uuid) -> Option<Note> {
        self.notes.get(&id).map(|entry| entry.value().clone())
    }

    /// Replaces the title and content of an existing note.
    ///
    /// Returns `false` if the note does not exist.
    pub fn update(&self, id: Uuid, title: &str, content: &str) -> bool {
        match self.notes.get_mut(&id) {
            Some(mut entry) => {
                let note = entry.value_mut();
                note.title = title.to_string();
                note.content = content.to_string();
                true
            }
            None => false,
        }
    }

    /// Removes a note, returning it if it existed.
    pub fn remove(&self, id: Uuid) -> Option<Note> {
        self.notes.remove(&id).map(|(_, note)| note)
    }

    /// Returns all notes owned by the given user, oldest first.
    pub fn for_owner(&self, owner_id: Uuid) -> Vec<Note> {
        let mut notes: Vec<Note> = self
            .notes
            .iter()
            .filter(|entry| entry.value().owner_id == owner_id)
            .map(|entry| entry.value().clone())
            .collect();
        notes.sort_by_key(|note| note.created_at);
        notes
    }

    /// Returns all notes, oldest first.
    pub fn all(&self) -> Vec<Note> {
        let mut notes: Vec<Note> = self.notes.iter().map(|entry| entry.value().clone()).collect();
        notes.sort_by_key(|note| note.created_at);
        notes
    }

    /// Returns the number of stored notes.
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Returns `true` if no notes are stored.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;

    #[test]
    fn test_user_insert_and_find() {
        let store = UserStore::new();
        let user = User::new("alice", "hash", Role::Editor);
        let id = user.id;

        store.insert(user).unwrap();

        let found = store.find_by_username("alice").unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.role, Role::Editor);
        assert!(store.find_by_username("bob").is_none());
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let store = UserStore::new();
        store.insert(User::new("alice", "h1", Role::Reader)).unwrap();

        let err = store.insert(User::new("alice", "h2", Role::Admin)).unwrap_err();
        assert!(matches!(err, CoreError::UsernameTaken(name) if name == "alice"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_concurrent_registration_single_winner() {
        use std::sync::Arc;

        let store = Arc::new(UserStore::new());
        let mut handles = Vec::new();

        for _ in 0..8 {
            let store = store.clone();
            handles.push(std::thread::spawn(move || {
                store.insert(User::new("alice", "hash", Role::Reader)).is_ok()
            }));
        }

        let successes = handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or(false))
            .filter(|won| *won)
            .count();

        assert_eq!(successes, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_note_crud() {
        let store = NoteStore::new();
        let owner = Uuid::new_v4();
        let note = Note::new("title", "content", owner);
        let id = note.id;

        store.insert(note);
        assert_eq!(store.get(id).unwrap().title, "title");

        assert!(store.update(id, "new title", "new content"));
        let updated = store.get(id).unwrap();
        assert_eq!(updated.title, "new title");
        assert_eq!(updated.content, "new content");

        assert!(store.remove(id).is_some());
        assert!(store.get(id).is_none());
        assert!(!store.update(id, "x", "y"));
    }

    #[test]
    fn test_notes_filtered_by_owner() {
        let store = NoteStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        store.insert(Note::new("a1", "", alice));
        store.insert(Note::new("a2", "", alice));
        store.insert(Note::new("b1", "", bob));

        assert_eq!(store.for_owner(alice).len(), 2);
        assert_eq!(store.for_owner(bob).len(), 1);
        assert_eq!(store.all().len(), 3);
    }
}
