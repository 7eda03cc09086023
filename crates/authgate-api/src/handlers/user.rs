//! User administration handlers.

use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;

use authgate_core::types::pagination::{PageRequest, PageResponse};

use crate::dto::response::{ApiResponse, MessageResponse, UserSummary};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> Result<Json<ApiResponse<PageResponse<UserSummary>>>, ApiError> {
    state
        .access_checker
        .require_permission(auth.user_id, "list-users")
        .await?;

    // Re-clamp: query-string deserialization bypasses the constructor.
    let page = PageRequest::new(page.page, page.page_size);
    let users = state.user_service.list(&page).await?;

    Ok(Json(ApiResponse::ok(users.map(UserSummary::from))))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .access_checker
        .require_permission(auth.user_id, "delete-users")
        .await?;

    state.user_service.soft_delete(auth.context(), id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "User deleted".to_string(),
    })))
}
