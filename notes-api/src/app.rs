//! Application state and router builder
//!
//! # Example
//!
//! ```no_run
//! use notes_api::{app::{build_router, AppState}, config::Config};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::for_memory("test-secret-key-at-least-32-bytes-long");
//! let app = build_router(AppState::with_memory_store(config));
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

use crate::{
    config::Config,
    middleware::{auth::login_required, security::security_headers},
    routes,
};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use notes_shared::store::{memory::MemoryStore, postgres::PgStore, NoteStore, UserStore};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Note storage
    pub notes: Arc<dyn NoteStore>,

    /// User storage
    pub users: Arc<dyn UserStore>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates state from explicit stores
    pub fn new(notes: Arc<dyn NoteStore>, users: Arc<dyn UserStore>, config: Config) -> Self {
        Self {
            notes,
            users,
            config: Arc::new(config),
        }
    }

    /// State backed by PostgreSQL
    pub fn with_pg_store(pool: PgPool, config: Config) -> Self {
        let store = Arc::new(PgStore::new(pool));
        Self::new(store.clone(), store, config)
    }

    /// State backed by process memory
    pub fn with_memory_store(config: Config) -> Self {
        Self::with_shared_memory_store(Arc::new(MemoryStore::new()), config)
    }

    /// State backed by a memory store the caller keeps a handle to
    pub fn with_shared_memory_store(store: Arc<MemoryStore>, config: Config) -> Self {
        Self::new(store.clone(), store, config)
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// ```text
/// /                      home                     public
/// /notes/                list                     login
/// /add/                  add                      login
/// /note/:slug/           detail                   login + author
/// /edit/:slug/           edit                     login + author
/// /delete/:slug/         delete                   login + author
/// /done/                 success                  login
/// /auth/signup/          signup                   public
/// /auth/login/           login                    public
/// /auth/logout/          logout                   public
/// /auth/refresh/         refresh                  public
/// /health                health                   public
/// ```
///
/// Layers, outermost first: security headers, request tracing, and the
/// login gate on the note pages.
pub fn build_router(state: AppState) -> Router {
    let note_routes = Router::new()
        .route(routes::LIST, get(routes::notes::list))
        .route(routes::ADD, get(routes::notes::add_page).post(routes::notes::add))
        .route(routes::DETAIL_ROUTE, get(routes::notes::detail))
        .route(
            routes::EDIT_ROUTE,
            get(routes::notes::edit_page).post(routes::notes::edit),
        )
        .route(
            routes::DELETE_ROUTE,
            get(routes::notes::delete_page)
                .post(routes::notes::delete)
                .delete(routes::notes::delete),
        )
        .route(routes::SUCCESS, get(routes::notes::success))
        .route_layer(middleware::from_fn_with_state(state.clone(), login_required));

    let public_routes = Router::new()
        .route(routes::HOME, get(routes::home::home))
        .route(
            routes::SIGNUP,
            get(routes::auth::signup_page).post(routes::auth::signup),
        )
        .route(
            routes::LOGIN,
            get(routes::auth::login_page).post(routes::auth::login),
        )
        .route(
            routes::LOGOUT,
            get(routes::auth::logout).post(routes::auth::logout),
        )
        .route(routes::REFRESH, post(routes::auth::refresh))
        .route(routes::HEALTH, get(routes::health::health_check));

    let enable_hsts = state.config.api.production;

    Router::new()
        .merge(note_routes)
        .merge(public_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn_with_state(enable_hsts, security_headers))
        .with_state(state)
}
