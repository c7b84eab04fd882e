//! # Notes Shared Library
//!
//! Domain types, storage and business rules behind the notes web service.
//!
//! ## Module Organization
//!
//! - `models`: users and notes, with their PostgreSQL queries
//! - `store`: storage traits with PostgreSQL and in-memory backends
//! - `forms`: note and account form validation
//! - `slug`: slug generation from titles
//! - `auth`: password hashing, tokens and note ownership checks
//! - `db`: connection pool and migrations

pub mod auth;
pub mod db;
pub mod forms;
pub mod models;
pub mod slug;
pub mod store;

/// Current version of the notes shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
