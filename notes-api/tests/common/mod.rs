//! Common test utilities for integration tests
//!
//! - an app over a fresh in-memory store
//! - user creation with a ready access token
//! - request builders and body decoding

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, Response},
    Router,
};
use notes_api::{
    app::{build_router, AppState},
    config::Config,
    middleware::auth::encode_query_value,
};
use notes_shared::{
    auth::jwt::{create_token, Claims, TokenType},
    models::{
        note::{CreateNote, Note},
        user::{CreateUser, User},
    },
    store::{memory::MemoryStore, NoteStore, UserStore},
};
use std::sync::Arc;
use tower::ServiceExt;

pub const JWT_SECRET: &str = "integration-test-secret-at-least-32-bytes";

/// A logged-in user
pub struct TestUser {
    pub user: User,
    pub token: String,
}

impl TestUser {
    /// Returns authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Test context containing the app and direct store access
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub app: Router,
}

impl TestContext {
    /// Creates a new test context with an empty store
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let config = Config::for_memory(JWT_SECRET);
        let app = build_router(AppState::with_shared_memory_store(store.clone(), config));

        Self { store, app }
    }

    /// Creates a user and signs an access token for them
    pub async fn create_user(&self, username: &str) -> TestUser {
        let user = self
            .store
            .create_user(CreateUser {
                username: username.to_string(),
                password_hash: "test_hash".to_string(),
            })
            .await
            .expect("Failed to create user");

        let claims = Claims::new(user.id, &user.username, TokenType::Access);
        let token = create_token(&claims, JWT_SECRET).expect("Failed to sign token");

        TestUser { user, token }
    }

    /// Inserts a note directly into storage
    pub async fn create_note(&self, author: &TestUser, title: &str, text: &str, slug: &str) -> Note {
        self.store
            .create_note(CreateNote {
                title: title.to_string(),
                text: text.to_string(),
                slug: slug.to_string(),
                author_id: author.user.id,
            })
            .await
            .expect("Failed to create note")
    }

    pub async fn note_count(&self) -> i64 {
        self.store.count_notes().await.expect("Failed to count notes")
    }

    pub async fn find_note(&self, slug: &str) -> Option<Note> {
        self.store
            .find_note_by_slug(slug)
            .await
            .expect("Failed to find note")
    }

    /// Sends a request through the router
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible")
    }

    pub async fn get(&self, uri: &str, user: Option<&TestUser>) -> Response<Body> {
        self.send(request(Method::GET, uri, user, None)).await
    }

    pub async fn post_form(
        &self,
        uri: &str,
        user: Option<&TestUser>,
        fields: &[(&str, &str)],
    ) -> Response<Body> {
        self.send(request(Method::POST, uri, user, Some(fields))).await
    }

    pub async fn delete(&self, uri: &str, user: Option<&TestUser>) -> Response<Body> {
        self.send(request(Method::DELETE, uri, user, None)).await
    }
}

/// Builds a request, with an urlencoded body when `fields` is given
pub fn request(
    method: Method,
    uri: &str,
    user: Option<&TestUser>,
    fields: Option<&[(&str, &str)]>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(user) = user {
        builder = builder.header(header::AUTHORIZATION, user.auth_header());
    }

    let body = match fields {
        Some(fields) => {
            builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
            Body::from(encode_form(fields))
        }
        None => Body::empty(),
    };

    builder.body(body).expect("Failed to build request")
}

/// Encodes form fields as `application/x-www-form-urlencoded`
pub fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", encode_query_value(k), encode_query_value(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Reads a JSON response body
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&body).expect("Body is not JSON")
}

/// `Location` header of a redirect
pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("Response has no Location header")
}
