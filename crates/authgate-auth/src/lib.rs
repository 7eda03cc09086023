//! # authgate-auth
//!
//! Authentication and authorization primitives for Authgate.
//!
//! ## Modules
//!
//! - `token` — stateless bearer token issuance and verification
//! - `password` — Argon2id password hashing
//! - `access` — role/permission authorization engine

pub mod access;
pub mod password;
pub mod token;

pub use access::{AccessChecker, AccessSnapshot};
pub use password::PasswordHasher;
pub use token::{Claims, IssuedToken, TokenDecoder, TokenEncoder};
