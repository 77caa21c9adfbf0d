//! Session token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use campushub_core::config::AuthConfig;
use campushub_core::error::AppError;

use super::claims::Claims;

/// Validates HS256 session tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Create a decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decode and validate a session token.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::session("Session has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::session("Invalid session token format")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::session("Invalid session token signature")
                }
                _ => AppError::session(format!("Session token validation failed: {e}")),
            }
        })?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::JwtEncoder;
    use campushub_core::types::{AuthMethod, AuthUser, Persistence, UserId};

    fn user() -> AuthUser {
        AuthUser {
            uid: UserId::new("uid-123"),
            email: Some("asha@example.com".into()),
            display_name: None,
            methods: vec![AuthMethod::Password],
        }
    }

    #[test]
    fn test_issue_then_decode() {
        let config = AuthConfig::default();
        let issued = JwtEncoder::new(&config).issue(&user(), Persistence::Session).unwrap();
        let claims = JwtDecoder::new(&config).decode(&issued.token).unwrap();
        assert_eq!(claims.user_id(), UserId::new("uid-123"));
        assert_eq!(claims.persistence, Persistence::Session);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issued = JwtEncoder::new(&AuthConfig::default())
            .issue(&user(), Persistence::Local)
            .unwrap();
        let other = AuthConfig {
            jwt_secret: "another-secret".into(),
            ..AuthConfig::default()
        };
        let err = JwtDecoder::new(&other).decode(&issued.token).unwrap_err();
        assert_eq!(err.kind, campushub_core::error::ErrorKind::Session);
    }
}
