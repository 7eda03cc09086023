//! Permission and role checks against the registry.

use std::sync::Arc;

use uuid::Uuid;

use authgate_core::error::AppError;
use authgate_core::result::AppResult;
use authgate_database::repositories::permission::PermissionRepository;
use authgate_database::repositories::role::RoleRepository;
use authgate_database::repositories::user::UserRepository;

use super::snapshot::AccessSnapshot;

/// Resolves authorization questions for a user.
///
/// A soft-deleted or nonexistent user is treated as holding no roles and
/// no permissions; checks return `false` rather than failing.
#[derive(Debug, Clone)]
pub struct AccessChecker {
    user_repo: Arc<UserRepository>,
    role_repo: Arc<RoleRepository>,
    permission_repo: Arc<PermissionRepository>,
}

impl AccessChecker {
    /// Creates a new checker over the given repositories.
    pub fn new(
        user_repo: Arc<UserRepository>,
        role_repo: Arc<RoleRepository>,
        permission_repo: Arc<PermissionRepository>,
    ) -> Self {
        Self {
            user_repo,
            role_repo,
            permission_repo,
        }
    }

    /// Whether the user holds the named permission through any role.
    pub async fn user_has_permission(&self, user_id: Uuid, permission: &str) -> AppResult<bool> {
        if !self.user_is_active(user_id).await? {
            return Ok(false);
        }
        let names = self
            .permission_repo
            .permission_names_for_user(user_id)
            .await?;
        Ok(names.iter().any(|n| n == permission))
    }

    /// Whether the user holds the named role directly.
    pub async fn user_has_role(&self, user_id: Uuid, role: &str) -> AppResult<bool> {
        if !self.user_is_active(user_id).await? {
            return Ok(false);
        }
        self.role_repo.user_has_role(user_id, role).await
    }

    /// Fails with `Forbidden` unless the user holds the permission.
    pub async fn require_permission(&self, user_id: Uuid, permission: &str) -> AppResult<()> {
        if self.user_has_permission(user_id, permission).await? {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "Permission '{permission}' required"
            )))
        }
    }

    /// Builds a per-request snapshot of the user's roles and permissions.
    ///
    /// One pair of queries; subsequent checks within the request are
    /// answered from memory. Never reuse a snapshot across requests.
    pub async fn snapshot(&self, user_id: Uuid) -> AppResult<AccessSnapshot> {
        if !self.user_is_active(user_id).await? {
            return Ok(AccessSnapshot::empty());
        }
        let roles = self.role_repo.roles_for_user(user_id).await?;
        let permissions = self
            .permission_repo
            .permission_names_for_user(user_id)
            .await?;
        Ok(AccessSnapshot::new(
            roles.into_iter().map(|r| r.name),
            permissions,
        ))
    }

    async fn user_is_active(&self, user_id: Uuid) -> AppResult<bool> {
        // find_by_id already excludes soft-deleted rows.
        Ok(self.user_repo.find_by_id(user_id).await?.is_some())
    }
}
