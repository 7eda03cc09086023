//! # authgate-entity
//!
//! Plain domain entities for Authgate. Persistence lives in
//! `authgate-database`; these structs carry no query logic of their own.

pub mod permission;
pub mod role;
pub mod user;

pub use permission::Permission;
pub use role::Role;
pub use user::User;
