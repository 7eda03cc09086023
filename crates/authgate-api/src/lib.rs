//! # authgate-api
//!
//! HTTP surface for Authgate. Routes, handlers, DTOs, the bearer-token
//! extractor, and the `AppError` → HTTP status mapping live here; no
//! business logic does.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::{ApiError, ApiErrorResponse};
pub use router::build_router;
pub use state::AppState;
