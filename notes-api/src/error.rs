//! Error handling for the API server
//!
//! Handlers return `ApiResult<T>`; shared-crate errors convert into
//! [`ApiError`] through `From`, so `?` picks the HTTP status:
//!
//! | Source | Status |
//! |--------|--------|
//! | `FormError::Invalid`, duplicate slug/username | 422 with field details |
//! | `AuthzError::NoteNotFound` | 404 |
//! | `JwtError` | 401 |
//! | storage or hashing failure | 500, details logged only |
//!
//! # Example
//!
//! ```
//! use notes_api::error::{ApiError, ApiResult};
//!
//! fn find(slug: &str) -> ApiResult<String> {
//!     if slug.is_empty() {
//!         return Err(ApiError::NotFound("Note not found".to_string()));
//!     }
//!     Ok(slug.to_string())
//! }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use notes_shared::{
    auth::{authorization::AuthzError, jwt::JwtError, password::PasswordError},
    forms::{field_messages, note::WARNING, FormError},
    store::StoreError,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Unauthorized (401)
    Unauthorized(String),

    /// Not found (404), also used for notes of other users
    NotFound(String),

    /// Unprocessable entity (422) - form errors
    ValidationError(Vec<ValidationErrorDetail>),

    /// Internal server error (500)
    InternalError(String),
}

/// Validation error detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

impl ValidationErrorDetail {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "not_found", "validation_error")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Field errors, for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl ApiError {
    /// Single-field validation failure
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::ValidationError(vec![ValidationErrorDetail::new(field, message)])
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::ValidationError(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                "Please correct the errors below.".to_string(),
                Some(errors),
            ),
            ApiError::InternalError(msg) => {
                // Logged here, never sent to the client
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            // Lost a race against a concurrent write after the form check passed
            StoreError::DuplicateSlug(slug) => ApiError::field("slug", format!("{}{}", slug, WARNING)),
            StoreError::DuplicateUsername(_) => {
                ApiError::field("username", "A user with that username already exists.")
            }
            StoreError::UnknownAuthor(id) => {
                ApiError::Unauthorized(format!("User {} no longer exists", id))
            }
            StoreError::Database(e) => ApiError::InternalError(format!("Database error: {}", e)),
        }
    }
}

impl From<AuthzError> for ApiError {
    fn from(err: AuthzError) -> Self {
        match err {
            AuthzError::NoteNotFound(_) => ApiError::NotFound("Note not found".to_string()),
            AuthzError::Store(e) => e.into(),
        }
    }
}

impl From<FormError> for ApiError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::Invalid(errors) => ApiError::ValidationError(
                field_messages(&errors)
                    .into_iter()
                    .map(|(field, message)| ValidationErrorDetail { field, message })
                    .collect(),
            ),
            FormError::Store(e) => e.into(),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::InternalError(format!("Password operation failed: {}", err))
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => ApiError::Unauthorized("Token expired".to_string()),
            JwtError::InvalidIssuer => ApiError::Unauthorized("Invalid token issuer".to_string()),
            JwtError::CreateError(msg) => ApiError::InternalError(msg),
            _ => ApiError::Unauthorized(format!("Invalid token: {}", err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::Unauthorized("Token expired".to_string());
        assert_eq!(err.to_string(), "Unauthorized: Token expired");

        let err = ApiError::NotFound("Note not found".to_string());
        assert_eq!(err.to_string(), "Not found: Note not found");
    }

    #[test]
    fn test_foreign_note_maps_to_not_found() {
        let err: ApiError = AuthzError::NoteNotFound("note1".to_string()).into();

        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_duplicate_slug_maps_to_field_error() {
        let err: ApiError = StoreError::DuplicateSlug("note1".to_string()).into();

        match err {
            ApiError::ValidationError(details) => {
                assert_eq!(
                    details,
                    vec![ValidationErrorDetail::new("slug", format!("note1{}", WARNING))]
                );
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_validation_status() {
        let err = ApiError::field("title", "This field is required.");
        assert_eq!(err.to_string(), "Validation failed: 1 errors");
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_jwt_errors_are_unauthorized() {
        let err: ApiError = JwtError::Expired.into();
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }
}
