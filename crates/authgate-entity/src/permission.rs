//! Permission entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A named capability that authorization checks gate on.
///
/// Shared by many roles through the role/permission join table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Permission {
    /// Unique permission identifier.
    pub id: Uuid,
    /// Globally unique permission name, e.g. `"manage-roles"`.
    pub name: String,
    /// Human-facing name.
    pub display_name: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// When the permission was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new permission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePermission {
    /// Globally unique permission name.
    pub name: String,
    /// Human-facing name (optional).
    pub display_name: Option<String>,
    /// Free-form description (optional).
    pub description: Option<String>,
}
