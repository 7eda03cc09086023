//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing (HMAC-SHA256).
    #[serde(default = "default_token_secret")]
    pub token_secret: String,
    /// Bearer token TTL in minutes.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: u64,
    /// Role assigned to every newly registered user.
    #[serde(default = "default_role")]
    pub default_role: String,
    /// Whether registration issues a token immediately.
    #[serde(default = "default_true")]
    pub auto_login_on_register: bool,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Email of a bootstrap admin account created at startup (optional).
    #[serde(default)]
    pub bootstrap_admin_email: Option<String>,
    /// Password of the bootstrap admin account (optional).
    #[serde(default)]
    pub bootstrap_admin_password: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: default_token_secret(),
            token_ttl_minutes: default_token_ttl(),
            default_role: default_role(),
            auto_login_on_register: true,
            password_min_length: default_password_min(),
            bootstrap_admin_email: None,
            bootstrap_admin_password: None,
        }
    }
}

fn default_token_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_token_ttl() -> u64 {
    1440
}

fn default_role() -> String {
    "client".to_string()
}

fn default_password_min() -> usize {
    8
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_to_empty_section() {
        let config: AuthConfig = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(config.token_ttl_minutes, 1440);
        assert_eq!(config.default_role, "client");
        assert!(config.auto_login_on_register);
        assert!(config.bootstrap_admin_email.is_none());
    }
}
