//! Request DTOs with validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use authgate_core::error::AppError;

use crate::error::ApiError;

/// Runs `validator` checks and maps failures to a 422 with per-field
/// details.
pub fn validate(req: &impl Validate) -> Result<(), ApiError> {
    req.validate().map_err(|errors| {
        let details = serde_json::to_value(&errors).unwrap_or(serde_json::Value::Null);
        ApiError(AppError::validation("Request validation failed").with_details(details))
    })
}

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address.
    #[validate(email(message = "Email address is invalid"))]
    pub email: String,
    /// Password. The length floor comes from `auth.password_min_length`
    /// and is checked in the handler, not here.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Display name.
    #[validate(length(max = 255))]
    pub name: Option<String>,
    /// Gender.
    pub gender: Option<String>,
    /// Date of birth.
    pub birth: Option<NaiveDate>,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// One role name or a list of them.
///
/// Clients may send `"roles_names": "admin"` as shorthand for a
/// single-element list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RolesNames {
    /// A single role name.
    One(String),
    /// Several role names, in the order they should be assigned.
    Many(Vec<String>),
}

impl RolesNames {
    /// Normalizes to a list, preserving order.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(name) => vec![name],
            Self::Many(names) => names,
        }
    }
}

/// Role assignment request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignRolesRequest {
    /// The user receiving the roles.
    pub user_id: Uuid,
    /// Role name(s) to assign.
    pub roles_names: RolesNames,
}

/// Create role request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRoleRequest {
    /// Unique role name.
    #[validate(length(min = 1, max = 100, message = "Role name is required"))]
    pub name: String,
    /// Human-facing name.
    pub display_name: Option<String>,
    /// Description.
    pub description: Option<String>,
}

/// Create permission request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePermissionRequest {
    /// Unique permission name.
    #[validate(length(min = 1, max = 100, message = "Permission name is required"))]
    pub name: String,
    /// Human-facing name.
    pub display_name: Option<String>,
    /// Description.
    pub description: Option<String>,
}

/// Grant permission to role request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GrantPermissionRequest {
    /// Target role name.
    #[validate(length(min = 1, message = "Role name is required"))]
    pub role_name: String,
    /// Permission name to grant.
    #[validate(length(min = 1, message = "Permission name is required"))]
    pub permission_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_names_accepts_a_single_string() {
        let req: AssignRolesRequest = serde_json::from_str(
            r#"{"user_id":"8a2e2b6e-0e2f-4a3b-9a64-1f6b8a5d8f11","roles_names":"admin"}"#,
        )
        .unwrap();
        assert_eq!(req.roles_names.into_vec(), vec!["admin".to_string()]);
    }

    #[test]
    fn test_roles_names_accepts_a_list_in_order() {
        let req: AssignRolesRequest = serde_json::from_str(
            r#"{"user_id":"8a2e2b6e-0e2f-4a3b-9a64-1f6b8a5d8f11","roles_names":["editor","admin"]}"#,
        )
        .unwrap();
        assert_eq!(
            req.roles_names.into_vec(),
            vec!["editor".to_string(), "admin".to_string()]
        );
    }

    #[test]
    fn test_register_request_rejects_bad_email_and_empty_password() {
        let req = RegisterRequest {
            email: "not-an-email".to_string(),
            password: String::new(),
            name: None,
            gender: None,
            birth: None,
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_register_request_accepts_valid_input() {
        let req = RegisterRequest {
            email: "user@example.com".to_string(),
            password: "correct horse battery".to_string(),
            name: Some("User".to_string()),
            gender: None,
            birth: None,
        };
        assert!(req.validate().is_ok());
    }
}
