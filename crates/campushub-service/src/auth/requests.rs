//! Form payloads of the auth page.

use serde::{Deserialize, Serialize};
use validator::Validate;

use campushub_entity::ProfileSeed;

/// Email/password sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignInRequest {
    /// Email address.
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Keep the session across restarts.
    #[serde(default)]
    pub remember_me: bool,
}

/// Email/password sign-up with the initial profile.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignUpRequest {
    /// Full name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Email address.
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    /// Password.
    pub password: String,
    /// Phone number.
    #[serde(default)]
    pub phone: String,
    /// City.
    #[serde(default)]
    pub city: String,
    /// College.
    #[serde(default)]
    pub college: String,
    /// Keep the session across restarts.
    #[serde(default)]
    pub remember_me: bool,
}

impl SignUpRequest {
    /// Profile values captured by the sign-up form.
    pub fn profile_seed(&self) -> ProfileSeed {
        let optional = |value: &str| {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };
        ProfileSeed {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: optional(&self.phone),
            city: optional(&self.city),
            college: optional(&self.college),
        }
    }
}

/// Password change for a signed-in email/password account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    /// Current password, used to re-authenticate.
    pub current_password: String,
    /// New password.
    pub new_password: String,
    /// New password again.
    pub confirm_password: String,
}
