//! Health check handlers.

use axum::extract::State;
use axum::Json;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /health
///
/// Always returns 200 so load balancers can distinguish "process up,
/// database down" from "process down"; the body carries the database
/// status.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match state.db.health_check().await {
        Ok(()) => "ok",
        Err(_) => "unreachable",
    };

    Json(HealthResponse {
        status: "up".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
    })
}
