//! User entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user.
///
/// Soft-deleted users keep their row (with `deleted_at` set) but are
/// excluded from every lookup; callers never see them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Email address (unique, case-insensitive).
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Display name.
    pub name: Option<String>,
    /// Gender (free-form).
    pub gender: Option<String>,
    /// Date of birth.
    pub birth: Option<NaiveDate>,
    /// Whether the email address has been confirmed.
    pub confirmed: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
    /// When the user was soft-deleted, if ever.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Whether this user has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Display name (optional).
    pub name: Option<String>,
    /// Gender (optional).
    pub gender: Option<String>,
    /// Date of birth (optional).
    pub birth: Option<NaiveDate>,
}
