//! Role and permission registry handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use authgate_entity::permission::CreatePermission;
use authgate_entity::role::CreateRole;

use crate::dto::request::{
    validate, AssignRolesRequest, CreatePermissionRequest, CreateRoleRequest,
    GrantPermissionRequest,
};
use crate::dto::response::{
    ApiResponse, MessageResponse, PermissionResponse, RoleResponse, RoleWithPermissionsResponse,
    UserResponse,
};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /roles
pub async fn list_roles(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<RoleWithPermissionsResponse>>>, ApiError> {
    let roles = state.role_service.list_roles().await?;

    Ok(Json(ApiResponse::ok(
        roles
            .into_iter()
            .map(RoleWithPermissionsResponse::from)
            .collect(),
    )))
}

/// POST /roles/assign
pub async fn assign_roles(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<AssignRolesRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    state
        .access_checker
        .require_permission(auth.user_id, "manage-roles")
        .await?;

    let role_names = req.roles_names.into_vec();
    let (user, roles) = state
        .role_service
        .assign_roles(auth.context(), req.user_id, &role_names)
        .await?;

    Ok(Json(ApiResponse::ok(UserResponse::from_user(user, roles))))
}

/// POST /roles
pub async fn create_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateRoleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RoleResponse>>), ApiError> {
    state
        .access_checker
        .require_permission(auth.user_id, "manage-roles")
        .await?;
    validate(&req)?;

    let role = state
        .role_service
        .create_role(
            auth.context(),
            CreateRole {
                name: req.name,
                display_name: req.display_name,
                description: req.description,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(RoleResponse::from(role))),
    ))
}

/// POST /permissions
pub async fn create_permission(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreatePermissionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PermissionResponse>>), ApiError> {
    state
        .access_checker
        .require_permission(auth.user_id, "manage-roles")
        .await?;
    validate(&req)?;

    let permission = state
        .role_service
        .create_permission(
            auth.context(),
            CreatePermission {
                name: req.name,
                display_name: req.display_name,
                description: req.description,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(PermissionResponse::from(permission))),
    ))
}

/// POST /roles/grant
pub async fn grant_permission(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<GrantPermissionRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .access_checker
        .require_permission(auth.user_id, "manage-roles")
        .await?;
    validate(&req)?;

    state
        .role_service
        .grant_permission(auth.context(), &req.role_name, &req.permission_name)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: format!(
            "Permission '{}' granted to role '{}'",
            req.permission_name, req.role_name
        ),
    })))
}
