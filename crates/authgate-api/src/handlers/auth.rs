//! Auth handlers — register, login, me.

use axum::extract::State;
use axum::Json;

use authgate_service::auth::NewAccount;

use crate::dto::request::{validate, LoginRequest, RegisterRequest};
use crate::dto::response::{
    ApiResponse, AuthResponse, ProfileResponse, TokenResponse, UserResponse,
};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

use authgate_core::error::AppError;

/// Enforces the configured password length floor.
///
/// `validator` length attributes only take literals, so the
/// config-driven minimum is checked here instead of on the DTO.
fn check_password_length(password: &str, min: usize) -> Result<(), ApiError> {
    if password.chars().count() >= min {
        return Ok(());
    }
    let message = format!("Password must be at least {min} characters");
    let details = serde_json::json!({
        "password": [{"code": "length", "message": message.clone()}]
    });
    Err(ApiError(
        AppError::validation(message).with_details(details),
    ))
}

/// POST /users/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    validate(&req)?;
    check_password_length(&req.password, state.config.auth.password_min_length)?;

    let account = NewAccount {
        email: req.email,
        password: req.password,
        name: req.name,
        gender: req.gender,
        birth: req.birth,
    };

    let result = state
        .auth_service
        .register(account, state.config.auth.auto_login_on_register)
        .await?;

    Ok(Json(ApiResponse::ok(AuthResponse {
        user: UserResponse::from_user(result.user, result.roles),
        token: result.token.map(TokenResponse::from),
    })))
}

/// POST /users/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    validate(&req)?;

    let result = state.auth_service.login(&req.email, &req.password).await?;

    Ok(Json(ApiResponse::ok(AuthResponse {
        user: UserResponse::from_user(result.user, result.roles),
        token: result.token.map(TokenResponse::from),
    })))
}

/// GET /users/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<ProfileResponse>>, ApiError> {
    let (user, roles) = state.user_service.get_profile(auth.context()).await?;

    // One snapshot per request; effective permissions come from it.
    let snapshot = state.access_checker.snapshot(auth.user_id).await?;
    let mut permissions: Vec<String> = snapshot.permissions().iter().cloned().collect();
    permissions.sort();

    Ok(Json(ApiResponse::ok(ProfileResponse {
        user: UserResponse::from_user(user, roles),
        permissions,
    })))
}
