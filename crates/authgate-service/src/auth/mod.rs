//! Authentication orchestration.

pub mod service;

pub use service::{AuthService, AuthenticatedUser, NewAccount};
