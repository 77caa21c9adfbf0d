//! Auth page flows on top of the auth provider.

use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use campushub_auth::PasswordValidator;
use campushub_core::config::AuthConfig;
use campushub_core::error::AppError;
use campushub_core::result::AppResult;
use campushub_core::traits::AuthProvider;
use campushub_core::types::{AuthSession, OAuthCredential, Persistence};
use campushub_entity::ProfileSeed;

use super::requests::{ChangePasswordRequest, SignInRequest, SignUpRequest};
use crate::feedback::Notice;
use crate::profile::ProfileService;

/// Shown when reset is clicked with an empty email.
pub const RESET_NEEDS_EMAIL: &str = "Enter your email, then click reset.";
/// Shown after a reset email was sent.
pub const RESET_SENT: &str = "Password reset email sent. Check your inbox.";

/// Orchestrates the auth provider and profile creation.
#[derive(Debug, Clone)]
pub struct AuthService {
    auth: Arc<dyn AuthProvider>,
    profiles: ProfileService,
    validator: PasswordValidator,
    oauth_label: String,
}

impl AuthService {
    /// Create the service.
    pub fn new(auth: Arc<dyn AuthProvider>, profiles: ProfileService, config: &AuthConfig) -> Self {
        Self {
            auth,
            profiles,
            validator: PasswordValidator::new(config),
            oauth_label: config.oauth_provider_label.clone(),
        }
    }

    /// Sign in with email and password, then make sure a profile exists.
    pub async fn sign_in(&self, req: &SignInRequest) -> AppResult<AuthSession> {
        req.validate()
            .map_err(|e| AppError::validation(format!("Invalid sign-in details: {e}")))?;
        self.auth
            .set_persistence(Persistence::remember(req.remember_me))
            .await?;
        let session = self
            .auth
            .sign_in_with_password(req.email.trim(), &req.password)
            .await?;
        self.ensure_profile(&session).await?;
        Ok(session)
    }

    /// Create an account, name it, and write its profile.
    pub async fn sign_up(&self, req: &SignUpRequest) -> AppResult<AuthSession> {
        req.validate()
            .map_err(|e| AppError::validation(format!("Invalid sign-up details: {e}")))?;
        self.validator.validate(&req.password)?;
        self.auth
            .set_persistence(Persistence::remember(req.remember_me))
            .await?;
        let session = self
            .auth
            .sign_up_with_password(req.email.trim(), &req.password)
            .await?;
        self.auth.update_display_name(req.name.trim()).await?;
        self.profiles
            .create_profile(&session.user.uid, &req.profile_seed())
            .await?;
        info!(user_id = %session.user.uid, "Signed up");
        Ok(session)
    }

    /// Sign in with an OAuth popup result, then make sure a profile exists.
    pub async fn sign_in_with_oauth(
        &self,
        credential: OAuthCredential,
        remember_me: bool,
    ) -> AppResult<AuthSession> {
        self.auth
            .set_persistence(Persistence::remember(remember_me))
            .await?;
        let session = self.auth.sign_in_with_oauth(credential).await?;
        self.ensure_profile(&session).await?;
        Ok(session)
    }

    async fn ensure_profile(&self, session: &AuthSession) -> AppResult<()> {
        let user = &session.user;
        let seed = ProfileSeed::basic(
            user.display_name.clone().unwrap_or_default(),
            user.email.clone().unwrap_or_default(),
        );
        self.profiles.ensure_profile(&user.uid, &seed).await?;
        Ok(())
    }

    /// Send a password reset email. A blank email is answered with a hint
    /// and never reaches the provider.
    pub async fn send_password_reset(&self, email: &str) -> AppResult<Notice> {
        let email = email.trim();
        if email.is_empty() {
            return Ok(Notice::error(RESET_NEEDS_EMAIL));
        }
        self.auth.send_password_reset_email(email).await?;
        Ok(Notice::success(RESET_SENT))
    }

    /// Re-authenticate and replace the password.
    pub async fn change_password(&self, req: &ChangePasswordRequest) -> AppResult<()> {
        let session = self
            .auth
            .current_session()
            .await?
            .ok_or_else(|| AppError::session("Sign in to change your password"))?;
        if !session.user.has_password() {
            warn!(user_id = %session.user.uid, "Password change on OAuth-only account");
            return Err(AppError::authorization(format!(
                "You signed in with {}. Password change is only available for email/password accounts.",
                self.oauth_label
            )));
        }
        self.validator
            .validate_confirmation(&req.new_password, &req.confirm_password)?;
        self.validator.validate(&req.new_password)?;
        self.validator
            .validate_not_same(&req.current_password, &req.new_password)?;
        self.auth
            .reauthenticate_and_change_password(&req.current_password, &req.new_password)
            .await?;
        info!(user_id = %session.user.uid, "Password changed");
        Ok(())
    }

    /// End the session.
    pub async fn sign_out(&self) -> AppResult<()> {
        self.auth.sign_out().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campushub_auth::MemoryAuthProvider;
    use campushub_core::error::ErrorKind;
    use campushub_core::traits::DocumentStore;
    use campushub_core::types::UserId;
    use campushub_store::MemoryDocumentStore;

    use crate::feedback::NoticeLevel;
    use crate::view::ViewState;

    struct Fixture {
        auth: Arc<MemoryAuthProvider>,
        profiles: ProfileService,
        service: AuthService,
    }

    fn fixture() -> Fixture {
        let config = AuthConfig::default();
        let auth = Arc::new(MemoryAuthProvider::new(&config));
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        let profiles = ProfileService::new(store, auth.clone());
        let service = AuthService::new(auth.clone(), profiles.clone(), &config);
        Fixture {
            auth,
            profiles,
            service,
        }
    }

    fn sign_up_request() -> SignUpRequest {
        SignUpRequest {
            name: "Asha".into(),
            email: "asha@example.com".into(),
            password: "secret1".into(),
            phone: "98765".into(),
            city: "Pune".into(),
            college: "COEP".into(),
            remember_me: false,
        }
    }

    #[tokio::test]
    async fn test_sign_up_writes_profile_and_name() {
        let f = fixture();
        let session = f.service.sign_up(&sign_up_request()).await.unwrap();
        assert_eq!(session.persistence, Persistence::Session);

        let profile = f.profiles.load(&session.user.uid).await.unwrap();
        let profile = profile.ready().unwrap();
        assert_eq!(profile.college.as_deref(), Some("COEP"));
        assert_eq!(profile.name.as_deref(), Some("Asha"));

        let current = f.auth.current_session().await.unwrap().unwrap();
        assert_eq!(current.user.display_name.as_deref(), Some("Asha"));
    }

    #[tokio::test]
    async fn test_sign_up_rejects_bad_email_before_provider() {
        let f = fixture();
        let req = SignUpRequest {
            email: "asha".into(),
            ..sign_up_request()
        };
        let err = f.service.sign_up(&req).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(f.auth.account_count(), 0);
    }

    #[tokio::test]
    async fn test_oauth_sign_in_creates_profile_once() {
        let f = fixture();
        let credential = OAuthCredential {
            provider: "google.com".into(),
            subject: "g-1".into(),
            email: Some("b@c.d".into()),
            email_verified: true,
            display_name: Some("Bea".into()),
        };
        let session = f.service.sign_in_with_oauth(credential.clone(), true).await.unwrap();
        let uid: UserId = session.user.uid.clone();
        let first = f.profiles.load(&uid).await.unwrap();
        assert!(matches!(first, ViewState::Ready(_)));

        f.service.sign_out().await.unwrap();
        f.service.sign_in_with_oauth(credential, true).await.unwrap();
        assert_eq!(f.profiles.load(&uid).await.unwrap(), first);
    }

    #[tokio::test]
    async fn test_reset_messages() {
        let f = fixture();
        let notice = f.service.send_password_reset("  ").await.unwrap();
        assert_eq!(notice.message, RESET_NEEDS_EMAIL);
        assert!(f.auth.outbox().await.is_empty());

        f.service.sign_up(&sign_up_request()).await.unwrap();
        let notice = f.service.send_password_reset("asha@example.com").await.unwrap();
        assert_eq!(notice.level, NoticeLevel::Success);
        assert_eq!(notice.message, RESET_SENT);
    }

    #[tokio::test]
    async fn test_change_password_checks() {
        let f = fixture();
        f.service.sign_up(&sign_up_request()).await.unwrap();

        let mismatch = ChangePasswordRequest {
            current_password: "secret1".into(),
            new_password: "secret2".into(),
            confirm_password: "secret3".into(),
        };
        assert_eq!(
            f.service.change_password(&mismatch).await.unwrap_err().kind,
            ErrorKind::Validation
        );

        let ok = ChangePasswordRequest {
            confirm_password: "secret2".into(),
            ..mismatch
        };
        f.service.change_password(&ok).await.unwrap();
    }

    #[tokio::test]
    async fn test_change_password_rejects_oauth_only() {
        let f = fixture();
        f.service
            .sign_in_with_oauth(
                OAuthCredential {
                    provider: "google.com".into(),
                    subject: "g-9".into(),
                    email: None,
                    email_verified: false,
                    display_name: None,
                },
                true,
            )
            .await
            .unwrap();
        let err = f
            .service
            .change_password(&ChangePasswordRequest {
                current_password: "x".into(),
                new_password: "secret2".into(),
                confirm_password: "secret2".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
        assert!(err.message.contains("Google"));
    }
}
