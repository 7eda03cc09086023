//! Per-request view of a user's roles and permissions.

use std::collections::HashSet;

/// An immutable snapshot of one user's roles and effective permissions.
///
/// Built once per request by [`super::AccessChecker::snapshot`]; answers
/// membership questions from memory without further store round-trips.
/// Must not be held across requests, since grants can change at runtime.
#[derive(Debug, Clone)]
pub struct AccessSnapshot {
    roles: HashSet<String>,
    permissions: HashSet<String>,
}

impl AccessSnapshot {
    /// Build a snapshot from resolved role and permission names.
    pub fn new(
        roles: impl IntoIterator<Item = String>,
        permissions: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            roles: roles.into_iter().collect(),
            permissions: permissions.into_iter().collect(),
        }
    }

    /// A snapshot with no roles and no permissions, as seen for
    /// soft-deleted or nonexistent users.
    pub fn empty() -> Self {
        Self {
            roles: HashSet::new(),
            permissions: HashSet::new(),
        }
    }

    /// Direct role membership.
    pub fn has_role(&self, name: &str) -> bool {
        self.roles.contains(name)
    }

    /// Whether the permission is in the union across all held roles.
    pub fn has_permission(&self, name: &str) -> bool {
        self.permissions.contains(name)
    }

    /// Number of roles held.
    pub fn role_count(&self) -> usize {
        self.roles.len()
    }

    /// All effective permission names, unordered.
    pub fn permissions(&self) -> &HashSet<String> {
        &self.permissions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership() {
        let snapshot = AccessSnapshot::new(
            vec!["admin".to_string()],
            vec!["manage-roles".to_string(), "list-users".to_string()],
        );
        assert!(snapshot.has_role("admin"));
        assert!(!snapshot.has_role("client"));
        assert!(snapshot.has_permission("manage-roles"));
        assert!(!snapshot.has_permission("delete-users"));
    }

    #[test]
    fn test_empty_denies_everything() {
        let snapshot = AccessSnapshot::empty();
        assert!(!snapshot.has_role("admin"));
        assert!(!snapshot.has_permission("manage-roles"));
        assert_eq!(snapshot.role_count(), 0);
    }
}
