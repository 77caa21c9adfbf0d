//! Session store: the app's view of "who is signed in".

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use campushub_core::error::AppError;
use campushub_core::result::AppResult;
use campushub_core::traits::AuthProvider;
use campushub_core::types::{AuthSession, AuthUser};

/// Immutable readout of the session store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// The current session, if signed in.
    pub session: Option<AuthSession>,
    /// Whether the provider has not answered yet.
    pub loading: bool,
}

impl SessionSnapshot {
    /// Snapshot before the provider has answered.
    pub fn loading() -> Self {
        Self {
            session: None,
            loading: true,
        }
    }

    /// Settled snapshot with the given session.
    pub fn settled(session: Option<AuthSession>) -> Self {
        Self {
            session,
            loading: false,
        }
    }

    /// The signed-in user.
    pub fn user(&self) -> Option<&AuthUser> {
        self.session.as_ref().map(|s| &s.user)
    }

    /// Whether a user is signed in.
    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }
}

/// Tracks the auth provider's current session.
///
/// Starts loading, settles after the provider's first answer, then follows
/// every sign-in and sign-out. Dropping the store stops following.
#[derive(Debug)]
pub struct SessionStore {
    state: watch::Receiver<SessionSnapshot>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl SessionStore {
    /// Start tracking the provider. Must be called inside a tokio runtime.
    pub fn start(provider: Arc<dyn AuthProvider>) -> Self {
        let (tx, rx) = watch::channel(SessionSnapshot::loading());
        let cancel = CancellationToken::new();
        let task = tokio::spawn(follow(provider, tx, cancel.clone()));
        Self {
            state: rx,
            cancel,
            task,
        }
    }

    /// Latest snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    /// Receive every snapshot change.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.clone()
    }

    /// Wait until the store has settled and return that snapshot.
    pub async fn settled(&self) -> AppResult<SessionSnapshot> {
        let mut rx = self.state.clone();
        let snapshot = rx
            .wait_for(|s| !s.loading)
            .await
            .map_err(|_| AppError::session("Session store stopped"))?;
        Ok(snapshot.clone())
    }

    /// Wait for the next snapshot that satisfies `pred`.
    pub async fn wait_until(
        &self,
        pred: impl FnMut(&SessionSnapshot) -> bool,
    ) -> AppResult<SessionSnapshot> {
        let mut rx = self.state.clone();
        let snapshot = rx
            .wait_for(pred)
            .await
            .map_err(|_| AppError::session("Session store stopped"))?;
        Ok(snapshot.clone())
    }
}

impl Drop for SessionStore {
    fn drop(&mut self) {
        self.cancel.cancel();
        self.task.abort();
    }
}

async fn follow(
    provider: Arc<dyn AuthProvider>,
    tx: watch::Sender<SessionSnapshot>,
    cancel: CancellationToken,
) {
    // Subscribe first so a change during the initial read is not lost.
    let mut changes = provider.subscribe();
    changes.borrow_and_update();

    let initial = match provider.current_session().await {
        Ok(session) => session,
        Err(e) => {
            warn!(error = %e, "Initial session lookup failed");
            None
        }
    };
    tx.send_replace(SessionSnapshot::settled(initial));
    debug!("Session store settled");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                let session = changes.borrow_and_update().clone();
                debug!(signed_in = session.is_some(), "Session changed");
                tx.send_replace(SessionSnapshot::settled(session));
            }
        }
    }
}
