//! Role repository implementation.
//!
//! Covers role CRUD, the user/role join table, and atomic multi-role
//! assignment. Assignment order is recorded in the join table's
//! `position` column so listings reproduce it deterministically.

use sqlx::postgres::PgConnection;
use sqlx::PgPool;
use uuid::Uuid;

use authgate_core::error::{AppError, ErrorKind};
use authgate_core::result::AppResult;
use authgate_entity::role::{CreateRole, Role};

/// Name of the unique index guarding role name uniqueness.
const NAME_UNIQUE_CONSTRAINT: &str = "roles_name_key";

/// Repository for role CRUD and user/role assignment.
#[derive(Debug, Clone)]
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    /// Create a new role repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all roles in creation order.
    pub async fn find_all(&self) -> AppResult<Vec<Role>> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::StoreUnavailable, "Failed to list roles", e)
            })
    }

    /// Create a new role.
    pub async fn create(&self, data: &CreateRole) -> AppResult<Role> {
        sqlx::query_as::<_, Role>(
            "INSERT INTO roles (name, display_name, description) \
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
                AppError::duplicate_name(format!("Role '{}' already exists", data.name))
            }
            _ => AppError::with_source(ErrorKind::StoreUnavailable, "Failed to create role", e),
        })
    }

    /// Assign roles to a user, atomically, preserving the requested order.
    ///
    /// All names are resolved up front; if any name is unknown the whole
    /// call fails with `UnknownRole` and no assignment is made. Roles the
    /// user already holds are skipped without error.
    pub async fn assign_roles_to_user(&self, user_id: Uuid, names: &[String]) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::StoreUnavailable, "Failed to begin transaction", e)
        })?;

        self.assign_roles_in(&mut tx, user_id, names).await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::StoreUnavailable, "Failed to commit assignment", e)
        })?;
        Ok(())
    }

    /// Assign roles on an existing connection or transaction.
    ///
    /// The registration flow calls this inside the same transaction that
    /// creates the user row.
    pub async fn assign_roles_in(
        &self,
        conn: &mut PgConnection,
        user_id: Uuid,
        names: &[String],
    ) -> AppResult<()> {
        let found = sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE name = ANY($1)")
            .bind(names)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::StoreUnavailable, "Failed to resolve roles", e)
            })?;

        let roles = order_by_requested(found, names)?;

        for role in &roles {
            // Appends at the end of the user's role list; the pair
            // constraint makes re-assignment a no-op.
            sqlx::query(
                "INSERT INTO user_roles (user_id, role_id, position) \
                 SELECT $1, $2, COALESCE(MAX(position) + 1, 0) \
                 FROM user_roles WHERE user_id = $1 \
                 ON CONFLICT (user_id, role_id) DO NOTHING",
            )
            .bind(user_id)
            .bind(role.id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::StoreUnavailable, "Failed to assign role", e)
            })?;
        }

        Ok(())
    }

    /// List a user's roles in assignment order.
    pub async fn roles_for_user(&self, user_id: Uuid) -> AppResult<Vec<Role>> {
        sqlx::query_as::<_, Role>(
            "SELECT r.* FROM roles r \
             INNER JOIN user_roles ur ON ur.role_id = r.id \
             WHERE ur.user_id = $1 \
             ORDER BY ur.position ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::StoreUnavailable, "Failed to list user roles", e)
        })
    }

    /// Check direct role membership.
    pub async fn user_has_role(&self, user_id: Uuid, role_name: &str) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM user_roles ur \
             INNER JOIN roles r ON r.id = ur.role_id \
             WHERE ur.user_id = $1 AND r.name = $2",
        )
        .bind(user_id)
        .bind(role_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::StoreUnavailable, "Failed to check role", e)
        })?;
        Ok(count > 0)
    }
}

/// Reorder resolved roles to match the requested name order, failing with
/// `UnknownRole` on the first name that did not resolve.
fn order_by_requested(found: Vec<Role>, names: &[String]) -> AppResult<Vec<Role>> {
    let mut ordered = Vec::with_capacity(names.len());
    for name in names {
        match found.iter().find(|r| &r.name == name) {
            Some(role) => ordered.push(role.clone()),
            None => return Err(AppError::unknown_role(name)),
        }
    }
    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn role(name: &str) -> Role {
        Role {
            id: Uuid::new_v4(),
            name: name.to_string(),
            display_name: None,
            description: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_order_follows_request_not_resolution() {
        let found = vec![role("client"), role("admin")];
        let names = vec!["admin".to_string(), "client".to_string()];

        let ordered = order_by_requested(found, &names).unwrap();
        assert_eq!(ordered[0].name, "admin");
        assert_eq!(ordered[1].name, "client");
    }

    #[test]
    fn test_unknown_name_fails_whole_resolution() {
        let found = vec![role("admin")];
        let names = vec!["admin".to_string(), "ghost".to_string()];

        let err = order_by_requested(found, &names).unwrap_err();
        assert_eq!(err.kind, authgate_core::ErrorKind::UnknownRole);
        assert!(err.message.contains("ghost"));
    }

    #[test]
    fn test_duplicate_request_names_resolve_each_time() {
        let found = vec![role("client")];
        let names = vec!["client".to_string(), "client".to_string()];

        let ordered = order_by_requested(found, &names).unwrap();
        assert_eq!(ordered.len(), 2);
    }
}
