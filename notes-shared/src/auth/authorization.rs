//! Note ownership checks
//!
//! A note is only visible to its author. Every page that acts on a single
//! note loads it through [`authorize_note`], which treats "no such note" and
//! "somebody else's note" the same way so that a slug owned by another user
//! cannot be probed.
//!
//! # Example
//!
//! ```no_run
//! use notes_shared::auth::authorization::{authorize_note, AuthzError};
//! use notes_shared::store::NoteStore;
//! use uuid::Uuid;
//!
//! # async fn example(store: &dyn NoteStore, user_id: Uuid) -> Result<(), AuthzError> {
//! let note = authorize_note(store, "note1", user_id).await?;
//! assert_eq!(note.author_id, user_id);
//! # Ok(())
//! # }
//! ```

use uuid::Uuid;

use crate::models::note::Note;
use crate::store::{NoteStore, StoreError};

/// Error type for authorization checks
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// Note does not exist or belongs to another user
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    /// Storage error
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Loads the note at `slug` if `user_id` is its author
///
/// # Errors
///
/// - `AuthzError::NoteNotFound` if the note is missing or foreign
/// - `AuthzError::Store` if the lookup fails
pub async fn authorize_note(
    store: &dyn NoteStore,
    slug: &str,
    user_id: Uuid,
) -> Result<Note, AuthzError> {
    let note = store
        .find_note_by_slug(slug)
        .await?
        .ok_or_else(|| AuthzError::NoteNotFound(slug.to_string()))?;

    if !note.is_authored_by(user_id) {
        tracing::debug!(slug = %slug, user_id = %user_id, "Denied access to foreign note");
        return Err(AuthzError::NoteNotFound(slug.to_string()));
    }

    Ok(note)
}
