//! # authgate-service
//!
//! Orchestration layer: coordinates repositories, password hashing, and
//! token issuance into the operations the API exposes.

pub mod auth;
pub mod context;
pub mod role;
pub mod user;

pub use auth::AuthService;
pub use context::RequestContext;
pub use role::RoleService;
pub use user::UserService;
