//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for session token signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Session token lifetime in hours.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_hours: u64,
    /// Minimum password length accepted at sign-up and password change.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Human-readable name of the OAuth popup provider.
    #[serde(default = "default_oauth_label")]
    pub oauth_provider_label: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            session_ttl_hours: default_session_ttl(),
            password_min_length: default_password_min(),
            oauth_provider_label: default_oauth_label(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_session_ttl() -> u64 {
    24 * 14
}

fn default_password_min() -> usize {
    6
}

fn default_oauth_label() -> String {
    "Google".to_string()
}
