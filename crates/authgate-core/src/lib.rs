//! # authgate-core
//!
//! Core crate for Authgate. Contains configuration schemas, pagination
//! types, domain events, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Authgate crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
