//! Registration and login flows.

use std::sync::Arc;

use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::{info, warn};

use authgate_auth::password::PasswordHasher;
use authgate_auth::token::{IssuedToken, TokenEncoder};
use authgate_core::config::AuthConfig;
use authgate_core::error::{AppError, ErrorKind};
use authgate_core::events::{DomainEvent, EventBus, EventPayload, UserEvent};
use authgate_core::result::AppResult;
use authgate_database::repositories::role::RoleRepository;
use authgate_database::repositories::user::UserRepository;
use authgate_entity::role::Role;
use authgate_entity::user::{CreateUser, User};

/// Coordinates credential verification, token issuance, and default role
/// assignment.
#[derive(Debug, Clone)]
pub struct AuthService {
    pool: PgPool,
    user_repo: Arc<UserRepository>,
    role_repo: Arc<RoleRepository>,
    hasher: Arc<PasswordHasher>,
    encoder: Arc<TokenEncoder>,
    events: EventBus,
    config: AuthConfig,
}

/// Input for account registration.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Email address.
    pub email: String,
    /// Raw password (hashed before it ever reaches a store).
    pub password: String,
    /// Display name (optional).
    pub name: Option<String>,
    /// Gender (optional).
    pub gender: Option<String>,
    /// Date of birth (optional).
    pub birth: Option<NaiveDate>,
}

/// A user together with roles and, when applicable, a fresh token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The user.
    pub user: User,
    /// The user's roles, in assignment order.
    pub roles: Vec<Role>,
    /// A freshly issued token, absent when registration does not log in.
    pub token: Option<IssuedToken>,
}

impl AuthService {
    /// Creates a new authentication service.
    pub fn new(
        pool: PgPool,
        user_repo: Arc<UserRepository>,
        role_repo: Arc<RoleRepository>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<TokenEncoder>,
        events: EventBus,
        config: AuthConfig,
    ) -> Self {
        Self {
            pool,
            user_repo,
            role_repo,
            hasher,
            encoder,
            events,
            config,
        }
    }

    /// Registers a new user.
    ///
    /// User creation and default role assignment run in one transaction:
    /// a failed role assignment rolls the user row back rather than
    /// leaving an account with zero roles. Fails fast with
    /// `DuplicateEmail` before any role work.
    pub async fn register(&self, account: NewAccount, auto_login: bool) -> AppResult<AuthenticatedUser> {
        let password_hash = self.hasher.hash_password(&account.password)?;
        let data = CreateUser {
            email: account.email.trim().to_string(),
            password_hash,
            name: account.name,
            gender: account.gender,
            birth: account.birth,
        };

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::StoreUnavailable, "Failed to begin transaction", e)
        })?;

        let user = self.user_repo.create_in(&mut tx, &data).await?;

        let default_roles = vec![self.config.default_role.clone()];
        self.role_repo
            .assign_roles_in(&mut tx, user.id, &default_roles)
            .await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::StoreUnavailable,
                "Failed to commit registration",
                e,
            )
        })?;

        self.events
            .publish(DomainEvent::new(EventPayload::User(UserEvent::Registered {
                user_id: user.id,
                email: user.email.clone(),
            })));

        let roles = self.role_repo.roles_for_user(user.id).await?;
        let token = if auto_login {
            Some(self.encoder.issue(user.id)?)
        } else {
            None
        };

        info!(user_id = %user.id, "User registered");

        Ok(AuthenticatedUser { user, roles, token })
    }

    /// Logs a user in, returning a fresh token.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthenticatedUser> {
        let user = self.verify_credentials(email, password).await?;
        let roles = self.role_repo.roles_for_user(user.id).await?;
        let token = self.encoder.issue(user.id)?;

        info!(user_id = %user.id, "User logged in");

        Ok(AuthenticatedUser {
            user,
            roles,
            token: Some(token),
        })
    }

    /// Verifies an email/password pair.
    ///
    /// Unknown email and wrong password produce the same
    /// `InvalidCredentials` error so callers cannot enumerate accounts.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> AppResult<User> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(AppError::invalid_credentials)?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::invalid_credentials());
        }

        Ok(user)
    }

    /// Creates the configured bootstrap admin account if it is missing.
    ///
    /// Called once at startup; a no-op when the account exists or the
    /// config leaves email/password unset.
    pub async fn ensure_bootstrap_admin(&self) -> AppResult<()> {
        let (Some(email), Some(password)) = (
            self.config.bootstrap_admin_email.clone(),
            self.config.bootstrap_admin_password.clone(),
        ) else {
            return Ok(());
        };

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Ok(());
        }

        let registered = self
            .register(
                NewAccount {
                    email: email.clone(),
                    password,
                    name: Some("Super Admin".to_string()),
                    gender: None,
                    birth: None,
                },
                false,
            )
            .await?;

        self.role_repo
            .assign_roles_to_user(registered.user.id, &["admin".to_string()])
            .await?;

        // The bootstrap admin has no inbox to confirm from.
        self.user_repo.confirm(registered.user.id).await?;

        warn!(email = %email, "Bootstrap admin account created; change its password");
        Ok(())
    }
}
