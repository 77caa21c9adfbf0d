//! Auth provider trait for the hosted authentication service.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::result::AppResult;
use crate::types::{AuthSession, OAuthCredential, Persistence};

/// A hosted authentication service.
///
/// The provider owns the "current session" and pushes every change to
/// subscribers of [`AuthProvider::subscribe`].
#[async_trait]
pub trait AuthProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Choose where the next session is kept.
    async fn set_persistence(&self, persistence: Persistence) -> AppResult<()>;

    /// Sign in with email and password.
    async fn sign_in_with_password(&self, email: &str, password: &str) -> AppResult<AuthSession>;

    /// Create an email/password account and sign it in.
    async fn sign_up_with_password(&self, email: &str, password: &str) -> AppResult<AuthSession>;

    /// Sign in with the result of an OAuth popup, creating the account on
    /// first use.
    async fn sign_in_with_oauth(&self, credential: OAuthCredential) -> AppResult<AuthSession>;

    /// End the current session.
    async fn sign_out(&self) -> AppResult<()>;

    /// The current session, if any.
    async fn current_session(&self) -> AppResult<Option<AuthSession>>;

    /// Receive every change of the current session.
    fn subscribe(&self) -> watch::Receiver<Option<AuthSession>>;

    /// Send a password reset email.
    async fn send_password_reset_email(&self, email: &str) -> AppResult<()>;

    /// Re-authenticate the current user and replace their password.
    ///
    /// Only email/password accounts can do this.
    async fn reauthenticate_and_change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()>;

    /// Set the current user's display name.
    async fn update_display_name(&self, display_name: &str) -> AppResult<()>;
}
