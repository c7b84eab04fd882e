//! Database layer
//!
//! - `pool`: PostgreSQL connection pool with health check
//! - `migrations`: embedded schema migrations
//!
//! Row mapping lives with the types in `models`.

pub mod migrations;
pub mod pool;
