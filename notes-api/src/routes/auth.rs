//! Account endpoints
//!
//! # Endpoints
//!
//! - `GET|POST /auth/signup/` - register with `username`, `password`, `password_confirm`
//! - `GET|POST /auth/login/?next=/path/` - exchange credentials for tokens
//! - `GET|POST /auth/logout/` - confirmation only; tokens are dropped by the client
//! - `POST /auth/refresh/` - exchange a refresh token for a new access token
//!
//! All bodies are `application/x-www-form-urlencoded`.

use axum::{
    extract::{Query, State},
    response::Redirect,
    Form, Json,
};
use notes_shared::{
    auth::{jwt, password},
    forms::{
        user::{LoginForm, SignupForm},
        FormError,
    },
    models::user::CreateUser,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{LIST, LOGIN};
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};

/// Message for a failed login; does not say which field was wrong
pub const INVALID_LOGIN: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";

/// Signup page context
#[derive(Debug, Serialize, Deserialize)]
pub struct SignupPage {
    pub fields: Vec<String>,
    pub login: String,
}

/// `next` query parameter of the login page
#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

/// Login page context
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginPage {
    pub form: LoginForm,
    pub next: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// User ID
    pub user_id: Uuid,

    /// Username
    pub username: String,

    /// Access token (24h)
    pub access_token: String,

    /// Refresh token (30d)
    pub refresh_token: String,

    /// Where to continue
    pub next: String,
}

/// Logout page context
#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutPage {
    pub message: String,
    pub login: String,
}

/// Refresh token request
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh_token: String,
}

/// Refresh token response
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// New access token (24h)
    pub access_token: String,
}

/// Keeps `next` on this site; anything else falls back to the note list
fn safe_next(next: Option<&str>) -> String {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path.to_string()
        }
        _ => LIST.to_string(),
    }
}

/// `GET /auth/signup/`
pub async fn signup_page() -> Json<SignupPage> {
    Json(SignupPage {
        fields: vec![
            "username".to_string(),
            "password".to_string(),
            "password_confirm".to_string(),
        ],
        login: LOGIN.to_string(),
    })
}

/// `POST /auth/signup/`
///
/// Redirects to the login page on success.
///
/// # Errors
///
/// - `422`: invalid or taken username, weak or mismatched password
pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> ApiResult<Redirect> {
    let cleaned = form.clean(state.users.as_ref()).await?;

    let password_hash = password::hash_password(&cleaned.password)?;
    let user = state
        .users
        .create_user(CreateUser {
            username: cleaned.username,
            password_hash,
        })
        .await?;

    tracing::info!(user_id = %user.id, username = %user.username, "User signed up");
    Ok(Redirect::to(LOGIN))
}

/// `GET /auth/login/`
pub async fn login_page(Query(query): Query<NextQuery>) -> Json<LoginPage> {
    Json(LoginPage {
        form: LoginForm::default(),
        next: safe_next(query.next.as_deref()),
    })
}

/// `POST /auth/login/`
///
/// # Errors
///
/// - `422`: missing fields, or username and password do not match
pub async fn login(
    State(state): State<AppState>,
    Query(query): Query<NextQuery>,
    Form(form): Form<LoginForm>,
) -> ApiResult<Json<LoginResponse>> {
    form.validate().map_err(FormError::Invalid)?;

    let user = state
        .users
        .find_user_by_username(form.username.trim())
        .await?
        .ok_or_else(|| ApiError::field("__all__", INVALID_LOGIN))?;

    if !password::verify_password(&form.password, &user.password_hash)? {
        tracing::debug!(username = %user.username, "Wrong password");
        return Err(ApiError::field("__all__", INVALID_LOGIN));
    }

    state.users.record_login(user.id).await?;

    let tokens = jwt::issue_token_pair(user.id, &user.username, state.jwt_secret())?;

    tracing::info!(user_id = %user.id, "User logged in");
    Ok(Json(LoginResponse {
        user_id: user.id,
        username: user.username,
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        next: safe_next(query.next.as_deref()),
    }))
}

/// `GET /auth/logout/` and `POST /auth/logout/`
pub async fn logout() -> Json<LogoutPage> {
    Json(LogoutPage {
        message: "You have been logged out.".to_string(),
        login: LOGIN.to_string(),
    })
}

/// `POST /auth/refresh/`
///
/// # Errors
///
/// - `401`: invalid or expired refresh token, or the user is gone
pub async fn refresh(
    State(state): State<AppState>,
    Form(req): Form<RefreshRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    let claims = jwt::validate_refresh_token(&req.refresh_token, state.jwt_secret())?;

    let user = state
        .users
        .find_user_by_id(claims.sub)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("User no longer exists".to_string()))?;

    let access = jwt::Claims::new(user.id, user.username, jwt::TokenType::Access);
    let access_token = jwt::create_token(&access, state.jwt_secret())?;

    Ok(Json(RefreshResponse { access_token }))
}
