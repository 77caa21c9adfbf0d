//! Accounts held by the in-process provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campushub_core::types::{AuthMethod, AuthUser, UserId};

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Provider uid.
    pub uid: UserId,
    /// Email address, if known.
    pub email: Option<String>,
    /// Display name, if set.
    pub display_name: Option<String>,
    /// Argon2 hash of the password, for email/password accounts.
    pub password_hash: Option<String>,
    /// Linked OAuth identities as `(provider, subject)`.
    pub oauth_identities: Vec<(String, String)>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Public view of the account.
    pub fn to_user(&self) -> AuthUser {
        let mut methods = Vec::new();
        if self.password_hash.is_some() {
            methods.push(AuthMethod::Password);
        }
        methods.extend(
            self.oauth_identities
                .iter()
                .map(|(provider, _)| AuthMethod::OAuth {
                    provider: provider.clone(),
                }),
        );
        AuthUser {
            uid: self.uid.clone(),
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            methods,
        }
    }
}

/// A password reset email that was "sent".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetEmail {
    /// Recipient.
    pub email: String,
    /// Send time.
    pub sent_at: DateTime<Utc>,
}

/// Normalized lookup key for an email address.
pub fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}
