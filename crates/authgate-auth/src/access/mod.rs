//! Authorization engine.
//!
//! Answers "does this user have permission P" by resolving the user's
//! roles to their permission union. Queries are pure reads over the
//! current registry state; nothing is cached across requests.

pub mod checker;
pub mod snapshot;

pub use checker::AccessChecker;
pub use snapshot::AccessSnapshot;
