//! Middleware for the API server
//!
//! - `auth`: login gate for user pages
//! - `security`: security response headers

pub mod auth;
pub mod security;
