//! Note form: validation for creating and editing notes
//!
//! Field rules come from `validator` derives. Cleaning then finishes the slug:
//! a blank slug is derived from the title, and the result must not be used by
//! any other note. A collision is reported on the `slug` field as the slug
//! followed by [`WARNING`].
//!
//! # Example
//!
//! ```
//! use notes_shared::forms::{note::{NoteForm, WARNING}, FormError};
//! use notes_shared::models::{note::CreateNote, user::CreateUser};
//! use notes_shared::store::{memory::MemoryStore, NoteStore, UserStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryStore::new();
//! let author = store
//!     .create_user(CreateUser {
//!         username: "Author A".to_string(),
//!         password_hash: "$argon2id$...".to_string(),
//!     })
//!     .await?;
//! store
//!     .create_note(CreateNote {
//!         title: "Title".to_string(),
//!         text: "Text".to_string(),
//!         slug: "note1".to_string(),
//!         author_id: author.id,
//!     })
//!     .await?;
//!
//! let form = NoteForm {
//!     title: "Title".to_string(),
//!     text: "Text".to_string(),
//!     slug: "note1".to_string(),
//! };
//!
//! match form.clean(&store, None).await {
//!     Err(FormError::Invalid(errors)) => {
//!         let field_errors = errors.field_errors();
//!         let message = field_errors["slug"][0].message.as_deref();
//!         assert_eq!(message, Some(format!("note1{}", WARNING).as_str()));
//!     }
//!     _ => unreachable!(),
//! }
//! # Ok(())
//! # }
//! ```

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use super::FormError;
use crate::models::note::{CreateNote, Note, UpdateNote};
use crate::slug::{has_valid_slug_chars, slugify};
use crate::store::NoteStore;

/// Appended to a slug that is already used by another note
pub const WARNING: &str = " - such slug already exists, please choose a unique value!";

fn validate_slug_chars(slug: &str) -> Result<(), ValidationError> {
    if has_valid_slug_chars(slug) {
        return Ok(());
    }

    let mut err = ValidationError::new("slug_chars");
    err.message = Some(Cow::Borrowed(
        "Enter a valid slug consisting of letters, numbers, underscores or hyphens.",
    ));
    Err(err)
}

/// Submitted note fields
///
/// Missing fields deserialize as empty strings so that they are reported as
/// validation errors rather than rejected by the extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NoteForm {
    /// Title, required, at most 100 characters
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Title is required and must be at most 100 characters."))]
    pub title: String,

    /// Body text, required
    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required."))]
    pub text: String,

    /// Optional slug; generated from the title when blank
    #[serde(default)]
    #[validate(
        length(max = 100, message = "Slug must be at most 100 characters."),
        custom(function = "validate_slug_chars")
    )]
    pub slug: String,
}

/// Note fields that passed validation, with a final slug
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedNote {
    pub title: String,
    pub text: String,
    pub slug: String,
}

impl CleanedNote {
    /// Turns the cleaned fields into a create request for `author_id`
    pub fn into_create(self, author_id: Uuid) -> CreateNote {
        CreateNote {
            title: self.title,
            text: self.text,
            slug: self.slug,
            author_id,
        }
    }

    /// Turns the cleaned fields into an edit request
    pub fn into_update(self) -> UpdateNote {
        UpdateNote {
            title: self.title,
            text: self.text,
            slug: self.slug,
        }
    }
}

impl NoteForm {
    /// Prefills a form with the current values of a note (edit page)
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            text: note.text.clone(),
            slug: note.slug.clone(),
        }
    }

    fn trimmed(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            text: self.text.trim().to_string(),
            slug: self.slug.trim().to_string(),
        }
    }

    /// Validates the form and settles the slug
    ///
    /// `instance` is the note being edited, if any; its own slug does not
    /// count as a collision.
    ///
    /// # Errors
    ///
    /// - `FormError::Invalid` with per-field messages
    /// - `FormError::Store` if the uniqueness check fails to run
    pub async fn clean(
        self,
        store: &dyn NoteStore,
        instance: Option<&Note>,
    ) -> Result<CleanedNote, FormError> {
        let form = self.trimmed();

        let mut errors = match form.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };
        let field_failed = |errors: &ValidationErrors, field: &str| {
            errors.field_errors().contains_key(field)
        };

        let mut slug = form.slug.clone();
        if !field_failed(&errors, "slug") {
            if slug.is_empty() && !field_failed(&errors, "title") {
                slug = slugify(&form.title);
                if slug.is_empty() {
                    let mut err = ValidationError::new("slug_underivable");
                    err.message = Some(Cow::Borrowed(
                        "Could not derive a slug from the title, please enter one.",
                    ));
                    errors.add("slug", err);
                }
            }

            if !slug.is_empty()
                && store
                    .slug_taken(&slug, instance.map(|note| note.id))
                    .await?
            {
                let mut err = ValidationError::new("slug_unique");
                err.message = Some(Cow::Owned(format!("{}{}", slug, WARNING)));
                errors.add("slug", err);
            }
        }

        if !errors.is_empty() {
            return Err(FormError::Invalid(errors));
        }

        Ok(CleanedNote {
            title: form.title,
            text: form.text,
            slug,
        })
    }
}
