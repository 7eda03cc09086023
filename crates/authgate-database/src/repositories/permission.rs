//! Permission repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use authgate_core::error::{AppError, ErrorKind};
use authgate_core::result::AppResult;
use authgate_entity::permission::{CreatePermission, Permission};
use authgate_entity::role::{Role, RoleWithPermissions};

/// Name of the unique index guarding permission name uniqueness.
const NAME_UNIQUE_CONSTRAINT: &str = "permissions_name_key";

/// Repository for permission CRUD and role/permission grants.
#[derive(Debug, Clone)]
pub struct PermissionRepository {
    pool: PgPool,
}

impl PermissionRepository {
    /// Create a new permission repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a permission by its unique name.
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Permission>> {
        sqlx::query_as::<_, Permission>("SELECT * FROM permissions WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::StoreUnavailable, "Failed to find permission", e)
            })
    }

    /// Create a new permission.
    pub async fn create(&self, data: &CreatePermission) -> AppResult<Permission> {
        sqlx::query_as::<_, Permission>(
            "INSERT INTO permissions (name, display_name, description) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.display_name)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some(NAME_UNIQUE_CONSTRAINT) =>
            {
                AppError::duplicate_name(format!("Permission '{}' already exists", data.name))
            }
            _ => {
                AppError::with_source(ErrorKind::StoreUnavailable, "Failed to create permission", e)
            }
        })
    }

    /// Grant a permission to a role. Idempotent: granting an
    /// already-granted permission is a no-op, not an error.
    pub async fn grant_to_role(&self, role_name: &str, permission_name: &str) -> AppResult<()> {
        let result = sqlx::query(
            "INSERT INTO role_permissions (role_id, permission_id) \
             SELECT r.id, p.id FROM roles r, permissions p \
             WHERE r.name = $1 AND p.name = $2 \
             ON CONFLICT (role_id, permission_id) DO NOTHING",
        )
        .bind(role_name)
        .bind(permission_name)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::StoreUnavailable, "Failed to grant permission", e)
        })?;

        // Zero rows means either the pair already existed (fine) or a name
        // did not resolve; disambiguate only in the latter case.
        if result.rows_affected() == 0 {
            if self.find_role_id(role_name).await?.is_none() {
                return Err(AppError::unknown_role(role_name));
            }
            if self.find_by_name(permission_name).await?.is_none() {
                return Err(AppError::not_found(format!(
                    "Permission '{permission_name}' not found"
                )));
            }
        }
        Ok(())
    }

    /// List permissions granted to a role, in grant order.
    pub async fn permissions_for_role(&self, role_id: Uuid) -> AppResult<Vec<Permission>> {
        sqlx::query_as::<_, Permission>(
            "SELECT p.* FROM permissions p \
             INNER JOIN role_permissions rp ON rp.permission_id = p.id \
             WHERE rp.role_id = $1 \
             ORDER BY rp.granted_at ASC, p.name ASC",
        )
        .bind(role_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::StoreUnavailable,
                "Failed to list role permissions",
                e,
            )
        })
    }

    /// List all roles with their permissions nested, both ordered.
    pub async fn list_roles_with_permissions(&self) -> AppResult<Vec<RoleWithPermissions>> {
        let roles = sqlx::query_as::<_, Role>("SELECT * FROM roles ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::StoreUnavailable, "Failed to list roles", e)
            })?;

        let mut out = Vec::with_capacity(roles.len());
        for role in roles {
            let permissions = self.permissions_for_role(role.id).await?;
            out.push(RoleWithPermissions { role, permissions });
        }
        Ok(out)
    }

    /// The union of permission names across all roles held by a user.
    pub async fn permission_names_for_user(&self, user_id: Uuid) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT p.name FROM permissions p \
             INNER JOIN role_permissions rp ON rp.permission_id = p.id \
             INNER JOIN user_roles ur ON ur.role_id = rp.role_id \
             WHERE ur.user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::StoreUnavailable,
                "Failed to resolve user permissions",
                e,
            )
        })
    }

    async fn find_role_id(&self, role_name: &str) -> AppResult<Option<Uuid>> {
        sqlx::query_scalar::<_, Uuid>("SELECT id FROM roles WHERE name = $1")
            .bind(role_name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::StoreUnavailable, "Failed to find role", e)
            })
    }
}
