//! Shared test helpers for scenario tests.

#![allow(dead_code)]

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use campushub_auth::MemoryAuthProvider;
use campushub_core::config::AppConfig;
use campushub_core::traits::{AuthProvider, DocumentStore};
use campushub_service::{AdminGate, AuthService, ProfileService};
use campushub_store::MemoryDocumentStore;

/// In-memory backends wired the way the CLI wires them.
pub struct TestApp {
    /// Document store.
    pub store: Arc<MemoryDocumentStore>,
    /// Auth provider.
    pub auth: Arc<MemoryAuthProvider>,
    /// Application config.
    pub config: AppConfig,
}

impl TestApp {
    /// Fresh, empty backends with default configuration.
    pub fn new() -> Self {
        let config = AppConfig::default();
        Self {
            store: Arc::new(MemoryDocumentStore::new()),
            auth: Arc::new(MemoryAuthProvider::new(&config.auth)),
            config,
        }
    }

    /// The store as a trait object.
    pub fn documents(&self) -> Arc<dyn DocumentStore> {
        self.store.clone()
    }

    /// The auth provider as a trait object.
    pub fn provider(&self) -> Arc<dyn AuthProvider> {
        self.auth.clone()
    }

    /// Profile service over the test backends.
    pub fn profiles(&self) -> ProfileService {
        ProfileService::new(self.documents(), self.provider())
    }

    /// Auth flows over the test backends.
    pub fn auth_service(&self) -> AuthService {
        AuthService::new(self.provider(), self.profiles(), &self.config.auth)
    }

    /// Admin gate over the test backends.
    pub fn admin_gate(&self) -> AdminGate {
        AdminGate::new(self.documents(), &self.config.roles)
    }

    /// Wait until the store has exactly `expected` live listeners.
    ///
    /// Released subscriptions drop their listener from a background task,
    /// so the count settles shortly after the release.
    pub async fn wait_for_listeners(&self, expected: usize) {
        let store = self.store.clone();
        eventually(move || {
            let store = store.clone();
            async move { store.total_listeners().await == expected }
        })
        .await;
        assert_eq!(self.store.total_listeners().await, expected);
    }
}

/// Poll `check` until it holds, failing the test after about two seconds.
pub async fn eventually<F, Fut>(mut check: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    for _ in 0..400 {
        if check().await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached in time");
}
