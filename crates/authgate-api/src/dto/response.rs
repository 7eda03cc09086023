//! Response DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use authgate_auth::token::IssuedToken;
use authgate_entity::permission::Permission;
use authgate_entity::role::{Role, RoleWithPermissions};
use authgate_entity::user::User;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// User with roles, as returned by profile and auth endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Email.
    pub email: String,
    /// Display name.
    pub name: Option<String>,
    /// Gender.
    pub gender: Option<String>,
    /// Date of birth.
    pub birth: Option<NaiveDate>,
    /// Whether the email has been confirmed.
    pub confirmed: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Role names, in assignment order.
    pub roles: Vec<RoleResponse>,
}

impl UserResponse {
    /// Builds the response from a user and its ordered roles.
    pub fn from_user(user: User, roles: Vec<Role>) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            gender: user.gender,
            birth: user.birth,
            confirmed: user.confirmed,
            created_at: user.created_at,
            roles: roles.into_iter().map(RoleResponse::from).collect(),
        }
    }
}

/// User summary for admin listings; no roles, to keep the query cheap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    /// User ID.
    pub id: Uuid,
    /// Email.
    pub email: String,
    /// Display name.
    pub name: Option<String>,
    /// Whether the email has been confirmed.
    pub confirmed: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            confirmed: user.confirmed,
            created_at: user.created_at,
        }
    }
}

/// Current-user profile: the user with roles plus effective permissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    /// The user with roles.
    #[serde(flatten)]
    pub user: UserResponse,
    /// Effective permission names across all held roles, sorted.
    pub permissions: Vec<String>,
}

/// A freshly issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The signed token string.
    pub token: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
}

impl From<IssuedToken> for TokenResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            token: issued.token,
            expires_at: issued.expires_at,
        }
    }
}

/// Register/login response: the user plus, when issued, a token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The user with roles.
    pub user: UserResponse,
    /// The issued token; absent when registration does not log in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<TokenResponse>,
}

/// Role in responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleResponse {
    /// Role ID.
    pub id: Uuid,
    /// Role name.
    pub name: String,
    /// Human-facing name.
    pub display_name: Option<String>,
    /// Description.
    pub description: Option<String>,
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            name: role.name,
            display_name: role.display_name,
            description: role.description,
        }
    }
}

/// Permission in responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionResponse {
    /// Permission ID.
    pub id: Uuid,
    /// Permission name.
    pub name: String,
    /// Human-facing name.
    pub display_name: Option<String>,
    /// Description.
    pub description: Option<String>,
}

impl From<Permission> for PermissionResponse {
    fn from(permission: Permission) -> Self {
        Self {
            id: permission.id,
            name: permission.name,
            display_name: permission.display_name,
            description: permission.description,
        }
    }
}

/// Role with its nested permissions, for the registry listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleWithPermissionsResponse {
    /// Role ID.
    pub id: Uuid,
    /// Role name.
    pub name: String,
    /// Human-facing name.
    pub display_name: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Permissions granted to the role, in grant order.
    pub permissions: Vec<PermissionResponse>,
}

impl From<RoleWithPermissions> for RoleWithPermissionsResponse {
    fn from(rwp: RoleWithPermissions) -> Self {
        Self {
            id: rwp.role.id,
            name: rwp.role.name,
            display_name: rwp.role.display_name,
            description: rwp.role.description,
            permissions: rwp
                .permissions
                .into_iter()
                .map(PermissionResponse::from)
                .collect(),
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Database status: `"ok"` or `"unreachable"`.
    pub database: String,
}
