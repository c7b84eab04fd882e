//! Signup and login forms

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use super::FormError;
use crate::store::UserStore;

fn validate_username_chars(username: &str) -> Result<(), ValidationError> {
    let valid = username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'));
    if valid {
        return Ok(());
    }

    let mut err = ValidationError::new("username_chars");
    err.message = Some(Cow::Borrowed(
        "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
    ));
    Err(err)
}

/// Account registration form
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SignupForm {
    /// Desired username
    #[serde(default)]
    #[validate(
        length(min = 1, max = 150, message = "Username is required and must be at most 150 characters."),
        custom(function = "validate_username_chars")
    )]
    pub username: String,

    /// Plaintext password
    #[serde(default)]
    #[validate(length(min = 8, message = "This password is too short. It must contain at least 8 characters."))]
    pub password: String,

    /// Repeated password
    #[serde(default)]
    #[validate(must_match(other = "password", message = "The two password fields didn't match."))]
    pub password_confirm: String,
}

/// Signup fields that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedSignup {
    pub username: String,
    pub password: String,
}

impl SignupForm {
    /// Validates the form and checks the username is free
    pub async fn clean(self, store: &dyn UserStore) -> Result<CleanedSignup, FormError> {
        let username = self.username.trim().to_string();
        let form = Self { username, ..self };

        let mut errors = match form.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        if !form.password.is_empty() && form.password.chars().all(|c| c.is_ascii_digit()) {
            let mut err = ValidationError::new("password_numeric");
            err.message = Some(Cow::Borrowed("This password is entirely numeric."));
            errors.add("password", err);
        }

        if !form.username.is_empty() && form.password.eq_ignore_ascii_case(&form.username) {
            let mut err = ValidationError::new("password_similar");
            err.message = Some(Cow::Borrowed(
                "The password is too similar to the username.",
            ));
            errors.add("password", err);
        }

        if !form.username.is_empty()
            && store.find_user_by_username(&form.username).await?.is_some()
        {
            let mut err = ValidationError::new("username_unique");
            err.message = Some(Cow::Borrowed("A user with that username already exists."));
            errors.add("username", err);
        }

        if !errors.is_empty() {
            return Err(FormError::Invalid(errors));
        }

        Ok(CleanedSignup {
            username: form.username,
            password: form.password,
        })
    }
}

/// Login form
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LoginForm {
    /// Username
    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required."))]
    pub username: String,

    /// Plaintext password
    #[serde(default, skip_serializing)]
    #[validate(length(min = 1, message = "This field is required."))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::CreateUser;
    use crate::store::memory::MemoryStore;

    fn signup(username: &str, password: &str, confirm: &str) -> SignupForm {
        SignupForm {
            username: username.to_string(),
            password: password.to_string(),
            password_confirm: confirm.to_string(),
        }
    }

    fn failed_fields(err: FormError) -> Vec<String> {
        match err {
            FormError::Invalid(errors) => {
                let mut fields: Vec<String> = errors
                    .field_errors()
                    .keys()
                    .map(|k| k.to_string())
                    .collect();
                fields.sort();
                fields
            }
            FormError::Store(e) => panic!("unexpected store error: {}", e),
        }
    }

    #[tokio::test]
    async fn test_valid_signup() {
        let store = MemoryStore::new();

        let cleaned = signup(" mjordan ", "bulls-1996", "bulls-1996")
            .clean(&store)
            .await
            .unwrap();

        assert_eq!(cleaned.username, "mjordan");
        assert_eq!(cleaned.password, "bulls-1996");
    }

    #[tokio::test]
    async fn test_password_mismatch() {
        let store = MemoryStore::new();

        let err = signup("mjordan", "bulls-1996", "bulls-1997")
            .clean(&store)
            .await
            .unwrap_err();

        assert_eq!(failed_fields(err), vec!["password_confirm"]);
    }

    #[tokio::test]
    async fn test_weak_passwords() {
        let store = MemoryStore::new();

        let err = signup("mjordan", "short", "short").clean(&store).await.unwrap_err();
        assert_eq!(failed_fields(err), vec!["password"]);

        let err = signup("mjordan", "12345678", "12345678")
            .clean(&store)
            .await
            .unwrap_err();
        assert_eq!(failed_fields(err), vec!["password"]);

        let err = signup("longusername", "LongUserName", "LongUserName")
            .clean(&store)
            .await
            .unwrap_err();
        assert_eq!(failed_fields(err), vec!["password"]);
    }

    #[tokio::test]
    async fn test_taken_username() {
        let store = MemoryStore::new();
        store
            .create_user(CreateUser {
                username: "spippen".to_string(),
                password_hash: "test_hash".to_string(),
            })
            .await
            .unwrap();

        let err = signup("spippen", "bulls-1996", "bulls-1996")
            .clean(&store)
            .await
            .unwrap_err();

        assert_eq!(failed_fields(err), vec!["username"]);
    }

    #[tokio::test]
    async fn test_invalid_username_chars() {
        let store = MemoryStore::new();

        for username in ["bad/name", "Author A"] {
            let err = signup(username, "bulls-1996", "bulls-1996")
                .clean(&store)
                .await
                .unwrap_err();

            assert_eq!(failed_fields(err), vec!["username"]);
        }
    }

    #[test]
    fn test_login_form_requires_fields() {
        let form = LoginForm::default();
        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("password"));
    }
}
