//! # Notes API Server Library
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `middleware`: Login gate and security headers
//! - `routes`: Page and endpoint handlers

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
