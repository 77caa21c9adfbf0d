//! Policy checks for new passwords.

use campushub_core::config::AuthConfig;
use campushub_core::error::AppError;

/// Validates new passwords at sign-up and password change.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
}

impl PasswordValidator {
    /// Create a validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Minimum accepted length, in characters.
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Check a new password against the length policy.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }
        Ok(())
    }

    /// Check that the new password and its confirmation agree.
    pub fn validate_confirmation(&self, new_password: &str, confirm: &str) -> Result<(), AppError> {
        if new_password != confirm {
            return Err(AppError::validation("New passwords do not match"));
        }
        Ok(())
    }

    /// Check that the new password differs from the current one.
    pub fn validate_not_same(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        if current_password == new_password {
            return Err(AppError::validation(
                "New password must be different from the current password",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> PasswordValidator {
        PasswordValidator::new(&AuthConfig::default())
    }

    #[test]
    fn test_min_length_from_config() {
        let v = validator();
        assert_eq!(v.min_length(), 6);
        assert!(v.validate("12345").is_err());
        assert!(v.validate("123456").is_ok());
    }

    #[test]
    fn test_confirmation_and_reuse() {
        let v = validator();
        assert!(v.validate_confirmation("abcdef", "abcdeg").is_err());
        assert!(v.validate_not_same("abcdef", "abcdef").is_err());
        assert!(v.validate_not_same("abcdef", "ghijkl").is_ok());
    }
}
