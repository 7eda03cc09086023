//! User profile and admin operations.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use authgate_core::error::AppError;
use authgate_core::events::{DomainEvent, EventBus, EventPayload, UserEvent};
use authgate_core::result::AppResult;
use authgate_core::types::pagination::{PageRequest, PageResponse};
use authgate_database::repositories::role::RoleRepository;
use authgate_database::repositories::user::UserRepository;
use authgate_entity::role::Role;
use authgate_entity::user::User;

use crate::context::RequestContext;

/// Handles profile lookups and administrative user management.
#[derive(Debug, Clone)]
pub struct UserService {
    user_repo: Arc<UserRepository>,
    role_repo: Arc<RoleRepository>,
    events: EventBus,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        role_repo: Arc<RoleRepository>,
        events: EventBus,
    ) -> Self {
        Self {
            user_repo,
            role_repo,
            events,
        }
    }

    /// Gets the current user's profile with roles.
    pub async fn get_profile(&self, ctx: &RequestContext) -> AppResult<(User, Vec<Role>)> {
        let user = self
            .user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        let roles = self.role_repo.roles_for_user(user.id).await?;
        Ok((user, roles))
    }

    /// Lists users with pagination (admin).
    pub async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<User>> {
        self.user_repo.find_all(page).await
    }

    /// Soft-deletes a user (admin).
    ///
    /// The user's token keeps verifying cryptographically but no longer
    /// authenticates, because the active-user check fails from now on.
    pub async fn soft_delete(&self, ctx: &RequestContext, user_id: Uuid) -> AppResult<()> {
        self.user_repo.soft_delete(user_id).await?;

        self.events
            .publish(DomainEvent::new(EventPayload::User(UserEvent::Deleted {
                user_id,
            })));

        info!(actor = %ctx.user_id, user_id = %user_id, "User soft-deleted");
        Ok(())
    }
}
