//! Health check endpoint
//!
//! ```text
//! GET /health
//! ```
//!
//! ```json
//! {
//!   "status": "healthy",
//!   "version": "0.1.0",
//!   "storage": "postgres",
//!   "notes": 42
//! }
//! ```
//!
//! A storage failure answers 503 with status `degraded`.

use crate::app::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`
    pub status: String,

    /// Application version
    pub version: String,

    /// Storage backend name
    pub storage: String,

    /// Total number of notes, when storage answered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<i64>,
}

/// Health check handler
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let notes = match state.notes.ping().await {
        Ok(()) => state.notes.count_notes().await,
        Err(e) => Err(e),
    };

    let (status, label, notes) = match notes {
        Ok(count) => (StatusCode::OK, "healthy", Some(count)),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", None)
        }
    };

    (
        status,
        Json(HealthResponse {
            status: label.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            storage: state.config.storage.as_str().to_string(),
            notes,
        }),
    )
}
