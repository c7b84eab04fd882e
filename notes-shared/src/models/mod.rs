//! Database models
//!
//! Each model carries its own CRUD operations as associated functions taking
//! a `PgPool`. Handlers do not call these directly; they go through the
//! [`crate::store`] traits so the storage backend can be swapped.
//!
//! - `user`: accounts that own notes
//! - `note`: titled notes addressed by a unique slug

pub mod note;
pub mod user;
