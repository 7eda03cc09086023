//! Role entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::permission::Permission;

/// A named bundle of permissions assignable to users.
///
/// Roles are shared: many users may reference the same role row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Role {
    /// Unique role identifier.
    pub id: Uuid,
    /// Globally unique role name, e.g. `"admin"`.
    pub name: String,
    /// Human-facing name, e.g. `"Super Administrator"`.
    pub display_name: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// When the role was created.
    pub created_at: DateTime<Utc>,
}

/// A role together with its granted permissions, in grant order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleWithPermissions {
    /// The role.
    pub role: Role,
    /// Permissions granted to this role.
    pub permissions: Vec<Permission>,
}

/// Data required to create a new role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRole {
    /// Globally unique role name.
    pub name: String,
    /// Human-facing name (optional).
    pub display_name: Option<String>,
    /// Free-form description (optional).
    pub description: Option<String>,
}
