//! Form validation
//!
//! Forms are the structs submitted by the write pages. Each derives
//! `validator::Validate` for field rules and adds the checks that need
//! storage (slug and username uniqueness) in its own cleaning step.
//!
//! - `note`: the note add/edit form
//! - `user`: signup and login forms

use validator::ValidationErrors;

use crate::store::StoreError;

pub mod note;
pub mod user;

/// Error type for form cleaning
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// One or more fields are invalid
    #[error("Invalid form: {0}")]
    Invalid(#[from] ValidationErrors),

    /// Storage failed while running a uniqueness check
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Flattens validation errors into `(field, message)` pairs
///
/// Pairs are sorted by field so responses are stable. Errors without a
/// message fall back to their code.
pub fn field_messages(errors: &ValidationErrors) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({})", err.code));
                (field.to_string(), message)
            })
        })
        .collect();

    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use validator::ValidationError;

    #[test]
    fn test_field_messages_sorted_with_fallback() {
        let mut errors = ValidationErrors::new();
        errors.add("title", ValidationError::new("length"));

        let mut slug_err = ValidationError::new("slug_unique");
        slug_err.message = Some(Cow::Borrowed("taken"));
        errors.add("slug", slug_err);

        let pairs = field_messages(&errors);

        assert_eq!(
            pairs,
            vec![
                ("slug".to_string(), "taken".to_string()),
                ("title".to_string(), "Invalid value (length)".to_string()),
            ]
        );
    }
}
