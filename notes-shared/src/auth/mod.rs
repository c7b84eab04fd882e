//! Authentication and authorization utilities
//!
//! - [`password`]: Argon2id password hashing
//! - [`jwt`]: access/refresh token generation and validation
//! - [`authorization`]: note ownership checks
//!
//! # Example
//!
//! ```
//! use notes_shared::auth::jwt::{issue_token_pair, validate_access_token};
//! use notes_shared::auth::password::{hash_password, verify_password};
//! use uuid::Uuid;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let secret = "test-secret-key-at-least-32-bytes-long";
//!
//! let hash = hash_password("bulls-1996")?;
//! assert!(verify_password("bulls-1996", &hash)?);
//!
//! let pair = issue_token_pair(Uuid::new_v4(), "M Jordan", secret)?;
//! let claims = validate_access_token(&pair.access_token, secret)?;
//! assert_eq!(claims.username, "M Jordan");
//! # Ok(())
//! # }
//! ```

pub mod authorization;
pub mod jwt;
pub mod password;
