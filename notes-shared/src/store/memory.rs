//! In-memory storage backend
//!
//! Keeps users and notes in insertion-ordered vectors behind a
//! `tokio::sync::RwLock`. Uniqueness checks and the write they guard happen
//! under the same write lock, so concurrent creates cannot both win a slug.
//!
//! Used when `NOTES_STORAGE=memory` and by the test suites.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{NoteStore, StoreError, StoreResult, UserStore};
use crate::models::{
    note::{CreateNote, Note, UpdateNote},
    user::{CreateUser, User},
};

#[derive(Debug, Default)]
struct State {
    users: Vec<User>,
    notes: Vec<Note>,
}

/// Storage held entirely in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn create_note(&self, data: CreateNote) -> StoreResult<Note> {
        let data = data.with_slug_from_title();
        let mut state = self.state.write().await;

        if !state.users.iter().any(|u| u.id == data.author_id) {
            return Err(StoreError::UnknownAuthor(data.author_id));
        }
        if state.notes.iter().any(|n| n.slug == data.slug) {
            return Err(StoreError::DuplicateSlug(data.slug));
        }

        let now = Utc::now();
        let note = Note {
            id: Uuid::new_v4(),
            title: data.title,
            text: data.text,
            slug: data.slug,
            author_id: data.author_id,
            created_at: now,
            updated_at: now,
        };
        state.notes.push(note.clone());

        Ok(note)
    }

    async fn list_notes_by_author(&self, author_id: Uuid) -> StoreResult<Vec<Note>> {
        let state = self.state.read().await;

        Ok(state
            .notes
            .iter()
            .filter(|n| n.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn find_note_by_slug(&self, slug: &str) -> StoreResult<Option<Note>> {
        let state = self.state.read().await;
        Ok(state.notes.iter().find(|n| n.slug == slug).cloned())
    }

    async fn update_note(&self, id: Uuid, data: UpdateNote) -> StoreResult<Option<Note>> {
        let mut state = self.state.write().await;

        if state.notes.iter().any(|n| n.slug == data.slug && n.id != id) {
            return Err(StoreError::DuplicateSlug(data.slug));
        }

        let Some(note) = state.notes.iter_mut().find(|n| n.id == id) else {
            return Ok(None);
        };
        note.title = data.title;
        note.text = data.text;
        note.slug = data.slug;
        note.updated_at = Utc::now();

        Ok(Some(note.clone()))
    }

    async fn delete_note(&self, id: Uuid) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        let before = state.notes.len();
        state.notes.retain(|n| n.id != id);

        Ok(state.notes.len() < before)
    }

    async fn slug_taken(&self, slug: &str, exclude: Option<Uuid>) -> StoreResult<bool> {
        let state = self.state.read().await;

        Ok(state
            .notes
            .iter()
            .any(|n| n.slug == slug && Some(n.id) != exclude))
    }

    async fn count_notes(&self) -> StoreResult<i64> {
        let state = self.state.read().await;
        Ok(state.notes.len() as i64)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, data: CreateUser) -> StoreResult<User> {
        let mut state = self.state.write().await;

        if state.users.iter().any(|u| u.username == data.username) {
            return Err(StoreError::DuplicateUsername(data.username));
        }

        let user = User {
            id: Uuid::new_v4(),
            username: data.username,
            password_hash: data.password_hash,
            created_at: Utc::now(),
            last_login_at: None,
        };
        state.users.push(user.clone());

        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.username == username).cloned())
    }

    async fn record_login(&self, id: Uuid) -> StoreResult<bool> {
        let mut state = self.state.write().await;

        match state.users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.last_login_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
