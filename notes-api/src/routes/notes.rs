//! Note pages
//!
//! Every page here sits behind the login gate. Pages addressed by slug go
//! through [`authorize_note`], so a note of another user is a 404.
//!
//! # Endpoints
//!
//! - `GET /notes/` - the user's notes, oldest first
//! - `GET /add/`, `POST /add/` - new note form
//! - `GET /note/:slug/` - one note
//! - `GET /edit/:slug/`, `POST /edit/:slug/` - edit form
//! - `GET /delete/:slug/`, `POST|DELETE /delete/:slug/` - delete confirmation
//! - `GET /done/` - landing page after a successful write
//!
//! Writes take `application/x-www-form-urlencoded` bodies with `title`,
//! `text` and an optional `slug`, and redirect to `/done/` with 303.

use axum::{
    extract::{rejection::FormRejection, Path, State},
    response::{IntoResponse, Redirect, Response},
    Extension, Form, Json,
};
use notes_shared::{auth::authorization::authorize_note, forms::note::NoteForm, models::note::Note};
use serde::{Deserialize, Serialize};

use super::SUCCESS;
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    middleware::auth::AuthContext,
};

/// List page context
#[derive(Debug, Serialize, Deserialize)]
pub struct ListPage {
    pub object_list: Vec<Note>,
}

/// Add/edit page context
#[derive(Debug, Serialize, Deserialize)]
pub struct FormPage {
    pub form: NoteForm,

    /// The note being edited; absent on the add page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Note>,
}

/// Detail and delete page context
#[derive(Debug, Serialize, Deserialize)]
pub struct NotePage {
    pub note: Note,
}

/// Success page context
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessPage {
    pub message: String,
    pub next: String,
}

/// `GET /notes/`
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<ListPage>> {
    let object_list = state.notes.list_notes_by_author(auth.user_id).await?;

    Ok(Json(ListPage { object_list }))
}

/// `GET /add/`
pub async fn add_page() -> Json<FormPage> {
    Json(FormPage {
        form: NoteForm::default(),
        note: None,
    })
}

/// `POST /add/`
pub async fn add(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Form(form): Form<NoteForm>,
) -> ApiResult<Redirect> {
    let cleaned = form.clean(state.notes.as_ref(), None).await?;
    let note = state.notes.create_note(cleaned.into_create(auth.user_id)).await?;

    tracing::info!(slug = %note.slug, author = %auth.username, "Note created");
    Ok(Redirect::to(SUCCESS))
}

/// `GET /note/:slug/`
pub async fn detail(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(slug): Path<String>,
) -> ApiResult<Json<NotePage>> {
    let note = authorize_note(state.notes.as_ref(), &slug, auth.user_id).await?;

    Ok(Json(NotePage { note }))
}

/// `GET /edit/:slug/`
pub async fn edit_page(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(slug): Path<String>,
) -> ApiResult<Json<FormPage>> {
    let note = authorize_note(state.notes.as_ref(), &slug, auth.user_id).await?;

    Ok(Json(FormPage {
        form: NoteForm::from_note(&note),
        note: Some(note),
    }))
}

/// `POST /edit/:slug/`
///
/// A blank slug is derived from the new title, like on the add page. The
/// note is resolved before the body is read, so a bad body on someone
/// else's note is still a 404.
pub async fn edit(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(slug): Path<String>,
    form: Result<Form<NoteForm>, FormRejection>,
) -> ApiResult<Response> {
    let note = authorize_note(state.notes.as_ref(), &slug, auth.user_id).await?;

    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!(slug = %slug, error = %rejection, "Rejected edit body");
            return Ok(rejection.into_response());
        }
    };

    let cleaned = form.clean(state.notes.as_ref(), Some(&note)).await?;
    let updated = state
        .notes
        .update_note(note.id, cleaned.into_update())
        .await?
        .ok_or_else(|| ApiError::NotFound("Note not found".to_string()))?;

    tracing::info!(old_slug = %slug, slug = %updated.slug, "Note updated");
    Ok(Redirect::to(SUCCESS).into_response())
}

/// `GET /delete/:slug/`
pub async fn delete_page(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(slug): Path<String>,
) -> ApiResult<Json<NotePage>> {
    let note = authorize_note(state.notes.as_ref(), &slug, auth.user_id).await?;

    Ok(Json(NotePage { note }))
}

/// `POST /delete/:slug/` and `DELETE /delete/:slug/`
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(slug): Path<String>,
) -> ApiResult<Redirect> {
    let note = authorize_note(state.notes.as_ref(), &slug, auth.user_id).await?;

    if !state.notes.delete_note(note.id).await? {
        return Err(ApiError::NotFound("Note not found".to_string()));
    }

    tracing::info!(slug = %slug, author = %auth.username, "Note deleted");
    Ok(Redirect::to(SUCCESS))
}

/// `GET /done/`
pub async fn success() -> Json<SuccessPage> {
    Json(SuccessPage {
        message: "Done! Your changes have been saved.".to_string(),
        next: super::LIST.to_string(),
    })
}
