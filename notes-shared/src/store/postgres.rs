//! PostgreSQL storage backend
//!
//! Delegates to the model functions in [`crate::models`] and turns unique
//! constraint violations into the typed duplicate errors of [`StoreError`].

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::{NoteStore, StoreError, StoreResult, UserStore};
use crate::db::pool::health_check;
use crate::models::{
    note::{CreateNote, Note, UpdateNote, SLUG_CONSTRAINT},
    user::{CreateUser, User, USERNAME_CONSTRAINT},
};

/// Foreign key from notes to users
const AUTHOR_CONSTRAINT: &str = "notes_author_id_fkey";

/// Storage backed by a PostgreSQL pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wraps an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn constraint_of(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db_err) => db_err.constraint(),
        _ => None,
    }
}

fn map_note_error(err: sqlx::Error, slug: &str, author_id: Option<Uuid>) -> StoreError {
    let constraint = constraint_of(&err).map(str::to_owned);

    match (constraint.as_deref(), author_id) {
        (Some(SLUG_CONSTRAINT), _) => {
            debug!(slug = %slug, "Slug collision rejected by database");
            StoreError::DuplicateSlug(slug.to_string())
        }
        (Some(AUTHOR_CONSTRAINT), Some(author_id)) => StoreError::UnknownAuthor(author_id),
        _ => StoreError::Database(err),
    }
}

#[async_trait]
impl NoteStore for PgStore {
    async fn create_note(&self, data: CreateNote) -> StoreResult<Note> {
        let data = data.with_slug_from_title();
        let slug = data.slug.clone();
        let author_id = data.author_id;

        Note::create(&self.pool, data)
            .await
            .map_err(|e| map_note_error(e, &slug, Some(author_id)))
    }

    async fn list_notes_by_author(&self, author_id: Uuid) -> StoreResult<Vec<Note>> {
        Ok(Note::list_by_author(&self.pool, author_id).await?)
    }

    async fn find_note_by_slug(&self, slug: &str) -> StoreResult<Option<Note>> {
        Ok(Note::find_by_slug(&self.pool, slug).await?)
    }

    async fn update_note(&self, id: Uuid, data: UpdateNote) -> StoreResult<Option<Note>> {
        let slug = data.slug.clone();

        Note::update(&self.pool, id, data)
            .await
            .map_err(|e| map_note_error(e, &slug, None))
    }

    async fn delete_note(&self, id: Uuid) -> StoreResult<bool> {
        Ok(Note::delete(&self.pool, id).await?)
    }

    async fn slug_taken(&self, slug: &str, exclude: Option<Uuid>) -> StoreResult<bool> {
        Ok(Note::slug_exists(&self.pool, slug, exclude).await?)
    }

    async fn count_notes(&self) -> StoreResult<i64> {
        Ok(Note::count(&self.pool).await?)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(health_check(&self.pool).await?)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, data: CreateUser) -> StoreResult<User> {
        let username = data.username.clone();

        User::create(&self.pool, data).await.map_err(|e| {
            if constraint_of(&e) == Some(USERNAME_CONSTRAINT) {
                StoreError::DuplicateUsername(username)
            } else {
                StoreError::Database(e)
            }
        })
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(User::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(User::find_by_username(&self.pool, username).await?)
    }

    async fn record_login(&self, id: Uuid) -> StoreResult<bool> {
        Ok(User::update_last_login(&self.pool, id).await?)
    }
}
