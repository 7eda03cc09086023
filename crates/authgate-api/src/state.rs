//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use authgate_auth::access::AccessChecker;
use authgate_auth::password::PasswordHasher;
use authgate_auth::token::{TokenDecoder, TokenEncoder};
use authgate_core::config::AppConfig;
use authgate_core::events::EventBus;
use authgate_database::connection::DatabasePool;
use authgate_database::repositories::permission::PermissionRepository;
use authgate_database::repositories::role::RoleRepository;
use authgate_database::repositories::user::UserRepository;
use authgate_service::auth::AuthService;
use authgate_service::role::RoleService;
use authgate_service::user::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool and its lifecycle handle
    pub db: DatabasePool,
    /// Domain event bus
    pub events: EventBus,

    /// Token encoder
    pub token_encoder: Arc<TokenEncoder>,
    /// Token decoder and validator
    pub token_decoder: Arc<TokenDecoder>,
    /// Password hasher (Argon2)
    pub password_hasher: Arc<PasswordHasher>,
    /// Role/permission checker
    pub access_checker: Arc<AccessChecker>,

    /// User repository
    pub user_repo: Arc<UserRepository>,
    /// Role repository
    pub role_repo: Arc<RoleRepository>,
    /// Permission repository
    pub permission_repo: Arc<PermissionRepository>,

    /// Registration and login service
    pub auth_service: Arc<AuthService>,
    /// Role/permission registry service
    pub role_service: Arc<RoleService>,
    /// User profile and admin service
    pub user_service: Arc<UserService>,
}

impl AppState {
    /// Wires up repositories and services over a connected pool.
    ///
    /// Shared by the server binary and the integration tests so both
    /// run the exact same object graph.
    pub fn build(config: AppConfig, db: DatabasePool, events: EventBus) -> Self {
        let user_repo = Arc::new(UserRepository::new(db.pool().clone()));
        let role_repo = Arc::new(RoleRepository::new(db.pool().clone()));
        let permission_repo = Arc::new(PermissionRepository::new(db.pool().clone()));

        let token_encoder = Arc::new(TokenEncoder::new(&config.auth));
        let token_decoder = Arc::new(TokenDecoder::new(&config.auth));
        let password_hasher = Arc::new(PasswordHasher::new());
        let access_checker = Arc::new(AccessChecker::new(
            user_repo.clone(),
            role_repo.clone(),
            permission_repo.clone(),
        ));

        let auth_service = Arc::new(AuthService::new(
            db.pool().clone(),
            user_repo.clone(),
            role_repo.clone(),
            password_hasher.clone(),
            token_encoder.clone(),
            events.clone(),
            config.auth.clone(),
        ));
        let role_service = Arc::new(RoleService::new(
            user_repo.clone(),
            role_repo.clone(),
            permission_repo.clone(),
            events.clone(),
        ));
        let user_service = Arc::new(UserService::new(
            user_repo.clone(),
            role_repo.clone(),
            events.clone(),
        ));

        Self {
            config: Arc::new(config),
            db,
            events,
            token_encoder,
            token_decoder,
            password_hasher,
            access_checker,
            user_repo,
            role_repo,
            permission_repo,
            auth_service,
            role_service,
            user_service,
        }
    }
}
