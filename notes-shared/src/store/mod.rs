//! Storage backends for notes and users
//!
//! Handlers talk to storage through two object-safe traits, [`NoteStore`] and
//! [`UserStore`], so the same application can run against PostgreSQL in
//! production and against memory in development and tests.
//!
//! Both backends enforce the same invariants:
//!
//! - a slug is used by at most one note (`StoreError::DuplicateSlug`)
//! - a username is used by at most one user (`StoreError::DuplicateUsername`)
//! - a blank slug on create is derived from the title
//!
//! # Example
//!
//! ```
//! use notes_shared::models::{note::CreateNote, user::CreateUser};
//! use notes_shared::store::{memory::MemoryStore, NoteStore, StoreError, UserStore};
//!
//! # async fn example() -> Result<(), StoreError> {
//! let store = MemoryStore::new();
//! let author = store
//!     .create_user(CreateUser {
//!         username: "Author A".to_string(),
//!         password_hash: "$argon2id$...".to_string(),
//!     })
//!     .await?;
//!
//! let note = store
//!     .create_note(CreateNote {
//!         title: "Title".to_string(),
//!         text: "Text".to_string(),
//!         slug: "note1".to_string(),
//!         author_id: author.id,
//!     })
//!     .await?;
//!
//! assert_eq!(store.find_note_by_slug("note1").await?, Some(note));
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{
    note::{CreateNote, Note, UpdateNote},
    user::{CreateUser, User},
};

pub mod memory;
pub mod postgres;

/// Storage result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Another note already uses this slug
    #[error("Slug already in use: {0}")]
    DuplicateSlug(String),

    /// Another user already uses this username
    #[error("Username already in use: {0}")]
    DuplicateUsername(String),

    /// Referenced user does not exist
    #[error("Unknown author: {0}")]
    UnknownAuthor(Uuid),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Note persistence
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Creates a note, deriving a blank slug from the title
    async fn create_note(&self, data: CreateNote) -> StoreResult<Note>;

    /// Lists the notes of one author in creation order
    async fn list_notes_by_author(&self, author_id: Uuid) -> StoreResult<Vec<Note>>;

    /// Finds a note by slug regardless of author
    async fn find_note_by_slug(&self, slug: &str) -> StoreResult<Option<Note>>;

    /// Replaces title, text and slug; None if the note is gone
    async fn update_note(&self, id: Uuid, data: UpdateNote) -> StoreResult<Option<Note>>;

    /// Deletes a note; false if it was already gone
    async fn delete_note(&self, id: Uuid) -> StoreResult<bool>;

    /// Returns true if a note other than `exclude` uses `slug`
    async fn slug_taken(&self, slug: &str, exclude: Option<Uuid>) -> StoreResult<bool>;

    /// Counts all notes of all authors
    async fn count_notes(&self) -> StoreResult<i64>;

    /// Checks that the backend is reachable
    async fn ping(&self) -> StoreResult<()>;
}

/// User persistence
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Creates a user
    async fn create_user(&self, data: CreateUser) -> StoreResult<User>;

    /// Finds a user by ID
    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Finds a user by exact username
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// Stamps the last login time; false if the user is gone
    async fn record_login(&self, id: Uuid) -> StoreResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::DuplicateSlug("note1".to_string());
        assert_eq!(err.to_string(), "Slug already in use: note1");

        let err = StoreError::DuplicateUsername("Author A".to_string());
        assert_eq!(err.to_string(), "Username already in use: Author A");
    }
}
