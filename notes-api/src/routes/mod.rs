//! Route handlers
//!
//! - `home`: landing page
//! - `notes`: note list, add, detail, edit, delete and success pages
//! - `auth`: signup, login, logout and token refresh
//! - `health`: health check
//!
//! Pages answer with their JSON context; successful writes redirect.

pub mod auth;
pub mod health;
pub mod home;
pub mod notes;

pub const HOME: &str = "/";
pub const LIST: &str = "/notes/";
pub const ADD: &str = "/add/";
pub const SUCCESS: &str = "/done/";
pub const DETAIL_ROUTE: &str = "/note/:slug/";
pub const EDIT_ROUTE: &str = "/edit/:slug/";
pub const DELETE_ROUTE: &str = "/delete/:slug/";

pub const SIGNUP: &str = "/auth/signup/";
pub const LOGIN: &str = "/auth/login/";
pub const LOGOUT: &str = "/auth/logout/";
pub const REFRESH: &str = "/auth/refresh/";

pub const HEALTH: &str = "/health";

/// URL of a note's detail page
pub fn detail_url(slug: &str) -> String {
    format!("/note/{}/", slug)
}

/// URL of a note's edit page
pub fn edit_url(slug: &str) -> String {
    format!("/edit/{}/", slug)
}

/// URL of a note's delete page
pub fn delete_url(slug: &str) -> String {
    format!("/delete/{}/", slug)
}
