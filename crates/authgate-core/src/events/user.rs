//! User-related domain events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events related to user operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UserEvent {
    /// A new user registered.
    Registered {
        /// The user ID.
        user_id: Uuid,
        /// The registered email.
        email: String,
    },
    /// Roles were assigned to a user.
    RolesAssigned {
        /// The user ID.
        user_id: Uuid,
        /// The assigned role names, in assignment order.
        roles: Vec<String>,
    },
    /// A user was soft-deleted.
    Deleted {
        /// The user ID.
        user_id: Uuid,
    },
}
