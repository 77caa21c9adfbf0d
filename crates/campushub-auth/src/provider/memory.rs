//! In-process auth provider.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::sync::{Mutex, RwLock, watch};
use tracing::{debug, info, warn};
use uuid::Uuid;

use campushub_core::config::AuthConfig;
use campushub_core::error::AppError;
use campushub_core::result::AppResult;
use campushub_core::traits::AuthProvider;
use campushub_core::types::{AuthSession, AuthUser, OAuthCredential, Persistence, UserId};

use super::account::{Account, ResetEmail, email_key};
use crate::jwt::{JwtDecoder, JwtEncoder};
use crate::password::{PasswordHasher, PasswordValidator};

/// Auth provider that keeps accounts in memory.
///
/// Passwords are stored as Argon2id hashes and sessions carry signed
/// HS256 tokens. Reset emails are collected in an outbox instead of being
/// delivered.
#[derive(Debug, Clone)]
pub struct MemoryAuthProvider {
    accounts: Arc<DashMap<UserId, Account>>,
    by_email: Arc<DashMap<String, UserId>>,
    by_oauth: Arc<DashMap<(String, String), UserId>>,
    hasher: PasswordHasher,
    validator: PasswordValidator,
    encoder: JwtEncoder,
    decoder: JwtDecoder,
    persistence: Arc<RwLock<Persistence>>,
    current: Arc<watch::Sender<Option<AuthSession>>>,
    outbox: Arc<Mutex<Vec<ResetEmail>>>,
}

impl MemoryAuthProvider {
    /// Create a provider with no accounts.
    pub fn new(config: &AuthConfig) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            accounts: Arc::new(DashMap::new()),
            by_email: Arc::new(DashMap::new()),
            by_oauth: Arc::new(DashMap::new()),
            hasher: PasswordHasher::new(),
            validator: PasswordValidator::new(config),
            encoder: JwtEncoder::new(config),
            decoder: JwtDecoder::new(config),
            persistence: Arc::new(RwLock::new(Persistence::default())),
            current: Arc::new(current),
            outbox: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Reset emails sent so far.
    pub async fn outbox(&self) -> Vec<ResetEmail> {
        self.outbox.lock().await.clone()
    }

    /// Look up an account by uid.
    pub fn account(&self, uid: &UserId) -> Option<Account> {
        self.accounts.get(uid).map(|a| a.clone())
    }

    /// Number of registered accounts.
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Index and store an account. An email already owned by another
    /// account keeps its owner.
    fn insert_account(&self, account: Account) {
        if let Some(email) = &account.email {
            self.by_email
                .entry(email_key(email))
                .or_insert_with(|| account.uid.clone());
        }
        for identity in &account.oauth_identities {
            self.by_oauth.insert(identity.clone(), account.uid.clone());
        }
        self.accounts.insert(account.uid.clone(), account);
    }

    async fn start_session(&self, user: AuthUser) -> AppResult<AuthSession> {
        let persistence = *self.persistence.read().await;
        let issued = self.encoder.issue(&user, persistence)?;
        let session = AuthSession {
            user,
            access_token: issued.token,
            issued_at: issued.issued_at,
            expires_at: issued.expires_at,
            persistence,
        };
        self.current.send_replace(Some(session.clone()));
        info!(user_id = %session.user.uid, ?persistence, "Signed in");
        Ok(session)
    }

    fn signed_in_uid(&self) -> AppResult<UserId> {
        self.current
            .borrow()
            .as_ref()
            .map(|s| s.user.uid.clone())
            .ok_or_else(|| AppError::session("Not signed in"))
    }

    /// Push the account's current public view into the live session.
    fn refresh_current_user(&self, uid: &UserId) {
        let Some(user) = self.accounts.get(uid).map(|a| a.to_user()) else {
            return;
        };
        self.current.send_if_modified(|current| match current {
            Some(session) if &session.user.uid == uid => {
                session.user = user;
                true
            }
            _ => false,
        });
    }
}

#[async_trait]
impl AuthProvider for MemoryAuthProvider {
    async fn set_persistence(&self, persistence: Persistence) -> AppResult<()> {
        *self.persistence.write().await = persistence;
        debug!(?persistence, "Session persistence set");
        Ok(())
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let invalid = || AppError::authentication("Invalid email or password");
        let uid = self
            .by_email
            .get(&email_key(email))
            .map(|uid| uid.clone())
            .ok_or_else(invalid)?;
        let account = self.account(&uid).ok_or_else(invalid)?;
        let Some(hash) = &account.password_hash else {
            return Err(AppError::authentication(
                "This account signs in with an OAuth provider",
            ));
        };
        if !self.hasher.verify_password(password, hash)? {
            warn!(user_id = %uid, "Password sign-in rejected");
            return Err(invalid());
        }
        self.start_session(account.to_user()).await
    }

    async fn sign_up_with_password(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let key = email_key(email);
        if key.is_empty() {
            return Err(AppError::validation("Email is required"));
        }
        if self.by_email.contains_key(&key) {
            return Err(AppError::conflict("An account already exists for this email"));
        }
        self.validator.validate(password)?;
        let password_hash = self.hasher.hash_password(password)?;

        let uid = UserId::new(Uuid::new_v4().simple().to_string());
        match self.by_email.entry(key) {
            Entry::Occupied(_) => {
                return Err(AppError::conflict("An account already exists for this email"));
            }
            Entry::Vacant(slot) => {
                slot.insert(uid.clone());
            }
        }

        let account = Account {
            uid,
            email: Some(email.trim().to_string()),
            display_name: None,
            password_hash: Some(password_hash),
            oauth_identities: Vec::new(),
            created_at: Utc::now(),
        };
        let user = account.to_user();
        info!(user_id = %user.uid, "Account created");
        self.insert_account(account);
        self.start_session(user).await
    }

    async fn sign_in_with_oauth(&self, credential: OAuthCredential) -> AppResult<AuthSession> {
        let identity = (credential.provider.clone(), credential.subject.clone());
        if let Some(uid) = self.by_oauth.get(&identity).map(|u| u.clone()) {
            let account = self
                .account(&uid)
                .ok_or_else(|| AppError::internal("OAuth identity points at a missing account"))?;
            return self.start_session(account.to_user()).await;
        }

        // First sign-in links to an existing account only through a
        // verified email.
        let existing = credential
            .email
            .as_deref()
            .filter(|_| credential.email_verified)
            .and_then(|email| self.by_email.get(&email_key(email)).map(|u| u.clone()));

        let account = match existing.and_then(|uid| self.account(&uid)) {
            Some(mut account) => {
                account.oauth_identities.push(identity);
                if account.display_name.is_none() {
                    account.display_name = credential.display_name.clone();
                }
                account
            }
            None => Account {
                uid: UserId::new(Uuid::new_v4().simple().to_string()),
                email: credential.email.clone(),
                display_name: credential.display_name.clone(),
                password_hash: None,
                oauth_identities: vec![identity],
                created_at: Utc::now(),
            },
        };
        let user = account.to_user();
        info!(user_id = %user.uid, provider = %credential.provider, "OAuth identity linked");
        self.insert_account(account);
        self.start_session(user).await
    }

    async fn sign_out(&self) -> AppResult<()> {
        if let Some(session) = self.current.send_replace(None) {
            info!(user_id = %session.user.uid, "Signed out");
        }
        Ok(())
    }

    async fn current_session(&self) -> AppResult<Option<AuthSession>> {
        let session = (*self.current.borrow()).clone();
        let Some(session) = session else {
            return Ok(None);
        };
        match self.decoder.decode(&session.access_token) {
            Ok(_) => Ok(Some(session)),
            Err(e) => {
                warn!(user_id = %session.user.uid, error = %e, "Dropping invalid session");
                self.current.send_replace(None);
                Ok(None)
            }
        }
    }

    fn subscribe(&self) -> watch::Receiver<Option<AuthSession>> {
        self.current.subscribe()
    }

    async fn send_password_reset_email(&self, email: &str) -> AppResult<()> {
        let key = email_key(email);
        if key.is_empty() {
            return Err(AppError::validation("Email is required"));
        }
        if !self.by_email.contains_key(&key) {
            return Err(AppError::not_found("No account exists for this email"));
        }
        self.outbox.lock().await.push(ResetEmail {
            email: email.trim().to_string(),
            sent_at: Utc::now(),
        });
        info!("Password reset email queued");
        Ok(())
    }

    async fn reauthenticate_and_change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let uid = self.signed_in_uid()?;
        let account = self
            .account(&uid)
            .ok_or_else(|| AppError::not_found("Account no longer exists"))?;
        let Some(hash) = &account.password_hash else {
            return Err(AppError::authorization(
                "Password change is only available for email/password accounts",
            ));
        };
        if !self.hasher.verify_password(current_password, hash)? {
            return Err(AppError::authentication("Current password is incorrect"));
        }
        self.validator.validate(new_password)?;
        self.validator.validate_not_same(current_password, new_password)?;

        let new_hash = self.hasher.hash_password(new_password)?;
        if let Some(mut entry) = self.accounts.get_mut(&uid) {
            entry.password_hash = Some(new_hash);
        }
        info!(user_id = %uid, "Password changed");
        Ok(())
    }

    async fn update_display_name(&self, display_name: &str) -> AppResult<()> {
        let uid = self.signed_in_uid()?;
        {
            let mut entry = self
                .accounts
                .get_mut(&uid)
                .ok_or_else(|| AppError::not_found("Account no longer exists"))?;
            let trimmed = display_name.trim();
            entry.display_name = (!trimmed.is_empty()).then(|| trimmed.to_string());
        }
        self.refresh_current_user(&uid);
        debug!(user_id = %uid, "Display name updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campushub_core::error::ErrorKind;

    fn provider() -> MemoryAuthProvider {
        MemoryAuthProvider::new(&AuthConfig::default())
    }

    fn google(subject: &str, email: &str) -> OAuthCredential {
        OAuthCredential {
            provider: "google.com".into(),
            subject: subject.into(),
            email: Some(email.into()),
            email_verified: true,
            display_name: Some("Asha".into()),
        }
    }

    #[tokio::test]
    async fn test_sign_up_sign_out_sign_in() {
        let auth = provider();
        let session = auth.sign_up_with_password("asha@example.com", "secret1").await.unwrap();
        assert!(session.user.has_password());
        assert_eq!(auth.current_session().await.unwrap(), Some(session.clone()));

        auth.sign_out().await.unwrap();
        assert!(auth.current_session().await.unwrap().is_none());

        let again = auth
            .sign_in_with_password("ASHA@example.com ", "secret1")
            .await
            .unwrap();
        assert_eq!(again.user.uid, session.user.uid);
    }

    #[tokio::test]
    async fn test_wrong_password_and_duplicate_email() {
        let auth = provider();
        auth.sign_up_with_password("asha@example.com", "secret1").await.unwrap();
        let err = auth.sign_in_with_password("asha@example.com", "nope").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        let err = auth.sign_up_with_password("asha@example.com", "secret2").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_short_password_rejected() {
        let err = provider().sign_up_with_password("a@b.c", "123").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_persistence_recorded_on_session() {
        let auth = provider();
        auth.set_persistence(Persistence::remember(false)).await.unwrap();
        let session = auth.sign_up_with_password("a@b.c", "secret1").await.unwrap();
        assert_eq!(session.persistence, Persistence::Session);
    }

    #[tokio::test]
    async fn test_oauth_creates_then_reuses_account() {
        let auth = provider();
        let first = auth.sign_in_with_oauth(google("g-1", "asha@example.com")).await.unwrap();
        let second = auth.sign_in_with_oauth(google("g-1", "asha@example.com")).await.unwrap();
        assert_eq!(first.user.uid, second.user.uid);
        assert!(!first.user.has_password());
        assert_eq!(auth.account_count(), 1);
    }

    #[tokio::test]
    async fn test_change_password_rules() {
        let auth = provider();
        auth.sign_up_with_password("a@b.c", "secret1").await.unwrap();

        let err = auth
            .reauthenticate_and_change_password("wrong!", "secret2")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);

        let err = auth
            .reauthenticate_and_change_password("secret1", "secret1")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        auth.reauthenticate_and_change_password("secret1", "secret2").await.unwrap();
        auth.sign_out().await.unwrap();
        assert!(auth.sign_in_with_password("a@b.c", "secret2").await.is_ok());
    }

    #[tokio::test]
    async fn test_change_password_rejects_oauth_only() {
        let auth = provider();
        auth.sign_in_with_oauth(google("g-2", "b@c.d")).await.unwrap();
        let err = auth
            .reauthenticate_and_change_password("anything", "secret2")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn test_reset_email_outbox() {
        let auth = provider();
        auth.sign_up_with_password("a@b.c", "secret1").await.unwrap();
        auth.send_password_reset_email("a@b.c").await.unwrap();
        assert!(auth.send_password_reset_email("x@y.z").await.unwrap_err().is_not_found());
        let outbox = auth.outbox().await;
        assert_eq!(outbox.len(), 1);
        assert_eq!(outbox[0].email, "a@b.c");
    }

    #[tokio::test]
    async fn test_display_name_pushed_to_subscribers() {
        let auth = provider();
        let mut rx = auth.subscribe();
        auth.sign_up_with_password("a@b.c", "secret1").await.unwrap();
        rx.borrow_and_update();
        auth.update_display_name("Asha").await.unwrap();
        assert!(rx.has_changed().unwrap());
        let name = rx.borrow().as_ref().and_then(|s| s.user.display_name.clone());
        assert_eq!(name.as_deref(), Some("Asha"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_sign_ups_claim_email_once() {
        let auth = provider();
        let attempts: Vec<_> = (0..8)
            .map(|_| {
                let auth = auth.clone();
                tokio::spawn(async move {
                    auth.sign_up_with_password("race@example.com", "secret1").await
                })
            })
            .collect();

        let mut created = 0;
        for attempt in attempts {
            match attempt.await.unwrap() {
                Ok(_) => created += 1,
                Err(e) => assert_eq!(e.kind, ErrorKind::Conflict),
            }
        }
        assert_eq!(created, 1);
        assert_eq!(auth.account_count(), 1);
    }

    #[tokio::test]
    async fn test_oauth_links_only_verified_email() {
        let auth = provider();
        let owner = auth.sign_up_with_password("asha@example.com", "secret1").await.unwrap();

        let mut unverified = google("g-3", "asha@example.com");
        unverified.email_verified = false;
        let stranger = auth.sign_in_with_oauth(unverified).await.unwrap();
        assert_ne!(stranger.user.uid, owner.user.uid);
        assert_eq!(auth.account_count(), 2);
        auth.sign_out().await.unwrap();
        let again = auth.sign_in_with_password("asha@example.com", "secret1").await.unwrap();
        assert_eq!(again.user.uid, owner.user.uid);

        let linked = auth.sign_in_with_oauth(google("g-4", "asha@example.com")).await.unwrap();
        assert_eq!(linked.user.uid, owner.user.uid);
        assert!(linked.user.has_password());
    }
}
