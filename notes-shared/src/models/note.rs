//! Note model and database operations
//!
//! A note is a short titled text owned by exactly one author and addressed by
//! a slug that is unique across all notes.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE notes (
//!     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     title VARCHAR(100) NOT NULL,
//!     text TEXT NOT NULL,
//!     slug VARCHAR(100) NOT NULL,
//!     author_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     CONSTRAINT notes_slug_key UNIQUE (slug)
//! );
//! ```
//!
//! # Example
//!
//! ```no_run
//! use notes_shared::models::note::{CreateNote, Note};
//! use sqlx::PgPool;
//! use uuid::Uuid;
//!
//! # async fn example(pool: PgPool, author_id: Uuid) -> Result<(), sqlx::Error> {
//! let note = Note::create(
//!     &pool,
//!     CreateNote {
//!         title: "Title".to_string(),
//!         text: "Text".to_string(),
//!         slug: "note1".to_string(),
//!         author_id,
//!     },
//! )
//! .await?;
//!
//! let mine = Note::list_by_author(&pool, author_id).await?;
//! assert!(mine.iter().any(|n| n.id == note.id));
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::slug::slugify;

/// Maximum title length (matches the `notes.title` column)
pub const MAX_TITLE_LENGTH: usize = 100;

/// Name of the unique constraint on `notes.slug`
pub const SLUG_CONSTRAINT: &str = "notes_slug_key";

/// A note owned by a single author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Note {
    /// Unique note ID
    pub id: Uuid,

    /// Title, at most 100 characters
    pub title: String,

    /// Body text
    pub text: String,

    /// URL-safe identifier, unique across all notes
    pub slug: String,

    /// The user who created and owns the note
    pub author_id: Uuid,

    /// When the note was created
    pub created_at: DateTime<Utc>,

    /// When the note was last edited
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNote {
    /// Title
    pub title: String,

    /// Body text
    pub text: String,

    /// Slug; when blank it is derived from the title on save
    pub slug: String,

    /// Owner
    pub author_id: Uuid,
}

impl CreateNote {
    /// Fills in a blank slug from the title
    pub fn with_slug_from_title(mut self) -> Self {
        if self.slug.trim().is_empty() {
            self.slug = slugify(&self.title);
        }
        self
    }
}

/// Input for editing a note
///
/// An edit replaces all user-editable fields at once, the same way a form
/// submission does. The author never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateNote {
    /// New title
    pub title: String,

    /// New body text
    pub text: String,

    /// New slug
    pub slug: String,
}

impl Note {
    /// Returns true if `user_id` is the author of this note
    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.author_id == user_id
    }

    /// Inserts a new note
    ///
    /// A blank slug is derived from the title first.
    ///
    /// # Errors
    ///
    /// Returns a database error carrying the `notes_slug_key` constraint if
    /// the slug is already used by another note.
    pub async fn create(pool: &PgPool, data: CreateNote) -> Result<Self, sqlx::Error> {
        let data = data.with_slug_from_title();

        let note = sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO notes (title, text, slug, author_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, text, slug, author_id, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.text)
        .bind(data.slug)
        .bind(data.author_id)
        .fetch_one(pool)
        .await?;

        Ok(note)
    }

    /// Finds a note by its slug
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Self>, sqlx::Error> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, title, text, slug, author_id, created_at, updated_at
            FROM notes
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(pool)
        .await?;

        Ok(note)
    }

    /// Lists the notes of one author, oldest first
    pub async fn list_by_author(pool: &PgPool, author_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let notes = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, title, text, slug, author_id, created_at, updated_at
            FROM notes
            WHERE author_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(author_id)
        .fetch_all(pool)
        .await?;

        Ok(notes)
    }

    /// Replaces title, text and slug of a note
    ///
    /// Returns None if the note does not exist.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateNote,
    ) -> Result<Option<Self>, sqlx::Error> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            UPDATE notes
            SET title = $2, text = $3, slug = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, text, slug, author_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.title)
        .bind(data.text)
        .bind(data.slug)
        .fetch_optional(pool)
        .await?;

        Ok(note)
    }

    /// Deletes a note
    ///
    /// Returns true if a row was removed.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Returns true if some note other than `exclude` already uses `slug`
    pub async fn slug_exists(
        pool: &PgPool,
        slug: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, sqlx::Error> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM notes
                WHERE slug = $1 AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(slug)
        .bind(exclude)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// Counts all notes
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM notes")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
