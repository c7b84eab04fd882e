//! Login gate
//!
//! Pages behind the gate need `Authorization: Bearer <access token>` naming an
//! existing user. Anything else (no header, wrong scheme, a bad or expired
//! token, a deleted user) is sent to the login page with the requested path
//! in `next`, the way a browser session would be.
//!
//! Handlers read the user from the [`AuthContext`] request extension:
//!
//! ```no_run
//! use axum::Extension;
//! use notes_api::middleware::auth::AuthContext;
//!
//! async fn whoami(Extension(auth): Extension<AuthContext>) -> String {
//!     auth.username
//! }
//! ```

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use notes_shared::auth::jwt;
use uuid::Uuid;

use crate::{app::AppState, error::ApiError, routes};

/// The logged-in user of a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub username: String,
}

fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Percent-encodes `value` for a query string or form body, keeping `/`
pub fn encode_query_value(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

/// Login page URL that returns to `path` after logging in
pub fn login_redirect_url(path: &str) -> String {
    format!("{}?next={}", routes::LOGIN, encode_query_value(path))
}

/// Middleware that admits only logged-in users
pub async fn login_required(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = req.uri().path().to_string();

    let claims = match bearer_token(&req).map(|t| jwt::validate_access_token(t, state.jwt_secret())) {
        Some(Ok(claims)) => claims,
        Some(Err(e)) => {
            tracing::debug!(path = %path, error = %e, "Rejected access token");
            return Ok(Redirect::to(&login_redirect_url(&path)).into_response());
        }
        None => {
            tracing::debug!(path = %path, "Anonymous request to login-required page");
            return Ok(Redirect::to(&login_redirect_url(&path)).into_response());
        }
    };

    let Some(user) = state.users.find_user_by_id(claims.sub).await? else {
        tracing::debug!(user_id = %claims.sub, "Token names a user that no longer exists");
        return Ok(Redirect::to(&login_redirect_url(&path)).into_response());
    };

    req.extensions_mut().insert(AuthContext {
        user_id: user.id,
        username: user.username,
    });

    Ok(next.run(req).await)
}
