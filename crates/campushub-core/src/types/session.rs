//! Authenticated users and sessions as reported by the auth provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::id::UserId;

/// How an account can sign in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum AuthMethod {
    /// Email and password.
    Password,
    /// An OAuth popup provider, e.g. `google.com`.
    OAuth {
        /// Provider id.
        provider: String,
    },
}

/// Where a signed-in session is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persistence {
    /// Survives restarts ("remember me").
    #[default]
    Local,
    /// Cleared when the client session ends.
    Session,
}

impl Persistence {
    /// Persistence for a "remember me" checkbox value.
    pub fn remember(remember_me: bool) -> Self {
        if remember_me { Self::Local } else { Self::Session }
    }
}

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Provider uid.
    pub uid: UserId,
    /// Email address, if known.
    pub email: Option<String>,
    /// Display name, if set.
    pub display_name: Option<String>,
    /// Linked sign-in methods.
    pub methods: Vec<AuthMethod>,
}

impl AuthUser {
    /// Whether the account has an email/password credential.
    pub fn has_password(&self) -> bool {
        self.methods.contains(&AuthMethod::Password)
    }
}

/// A live authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// The signed-in user.
    pub user: AuthUser,
    /// Signed session token.
    pub access_token: String,
    /// When the session was issued.
    pub issued_at: DateTime<Utc>,
    /// When the session expires.
    pub expires_at: DateTime<Utc>,
    /// Where the session is kept.
    pub persistence: Persistence,
}

/// Result of an OAuth popup, handed to the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthCredential {
    /// Provider id, e.g. `google.com`.
    pub provider: String,
    /// The provider's stable subject id.
    pub subject: String,
    /// Email reported by the provider.
    pub email: Option<String>,
    /// Whether the provider has verified `email`.
    #[serde(default)]
    pub email_verified: bool,
    /// Display name reported by the provider.
    pub display_name: Option<String>,
}
