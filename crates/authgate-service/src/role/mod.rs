//! Role and permission registry operations.

pub mod service;

pub use service::RoleService;
