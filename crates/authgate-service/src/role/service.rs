//! Role/permission registry service.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use authgate_core::error::AppError;
use authgate_core::events::{DomainEvent, EventBus, EventPayload, UserEvent};
use authgate_core::result::AppResult;
use authgate_database::repositories::permission::PermissionRepository;
use authgate_database::repositories::role::RoleRepository;
use authgate_database::repositories::user::UserRepository;
use authgate_entity::permission::{CreatePermission, Permission};
use authgate_entity::role::{CreateRole, Role, RoleWithPermissions};
use authgate_entity::user::User;

use crate::context::RequestContext;

/// Administrative operations over roles, permissions, and assignments.
#[derive(Debug, Clone)]
pub struct RoleService {
    user_repo: Arc<UserRepository>,
    role_repo: Arc<RoleRepository>,
    permission_repo: Arc<PermissionRepository>,
    events: EventBus,
}

impl RoleService {
    /// Creates a new role service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        role_repo: Arc<RoleRepository>,
        permission_repo: Arc<PermissionRepository>,
        events: EventBus,
    ) -> Self {
        Self {
            user_repo,
            role_repo,
            permission_repo,
            events,
        }
    }

    /// Lists all roles with nested permissions, both ordered.
    pub async fn list_roles(&self) -> AppResult<Vec<RoleWithPermissions>> {
        self.permission_repo.list_roles_with_permissions().await
    }

    /// Creates a new role. Fails with `DuplicateName` on collision.
    pub async fn create_role(&self, ctx: &RequestContext, data: CreateRole) -> AppResult<Role> {
        let role = self.role_repo.create(&data).await?;
        info!(actor = %ctx.user_id, role = %role.name, "Role created");
        Ok(role)
    }

    /// Creates a new permission. Fails with `DuplicateName` on collision.
    pub async fn create_permission(
        &self,
        ctx: &RequestContext,
        data: CreatePermission,
    ) -> AppResult<Permission> {
        let permission = self.permission_repo.create(&data).await?;
        info!(actor = %ctx.user_id, permission = %permission.name, "Permission created");
        Ok(permission)
    }

    /// Grants a permission to a role. Idempotent.
    pub async fn grant_permission(
        &self,
        ctx: &RequestContext,
        role_name: &str,
        permission_name: &str,
    ) -> AppResult<()> {
        self.permission_repo
            .grant_to_role(role_name, permission_name)
            .await?;
        info!(
            actor = %ctx.user_id,
            role = role_name,
            permission = permission_name,
            "Permission granted to role"
        );
        Ok(())
    }

    /// Assigns roles to a user, atomically, preserving order.
    ///
    /// Returns the user with its updated role list. Any unknown role name
    /// aborts the whole call and leaves the user's role set untouched.
    pub async fn assign_roles(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        role_names: &[String],
    ) -> AppResult<(User, Vec<Role>)> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))?;

        self.role_repo
            .assign_roles_to_user(user.id, role_names)
            .await?;

        let roles = self.role_repo.roles_for_user(user.id).await?;

        self.events.publish(DomainEvent::new(EventPayload::User(
            UserEvent::RolesAssigned {
                user_id: user.id,
                roles: role_names.to_vec(),
            },
        )));

        info!(
            actor = %ctx.user_id,
            user_id = %user.id,
            roles = ?role_names,
            "Roles assigned"
        );

        Ok((user, roles))
    }

    /// Lists a user's roles in assignment order.
    pub async fn roles_for_user(&self, user_id: Uuid) -> AppResult<Vec<Role>> {
        self.role_repo.roles_for_user(user_id).await
    }
}
