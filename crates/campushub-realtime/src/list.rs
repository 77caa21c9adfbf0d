//! Live ordered list of one collection.

use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use campushub_core::error::AppError;
use campushub_core::result::AppResult;
use campushub_core::traits::{DocumentStore, Entity};
use campushub_core::types::{CollectionPath, OrderBy, QueryListener, QuerySnapshot};

use crate::decode::decode_documents;
use crate::handle::{SubscriptionHandle, SubscriptionId};
use crate::registry::SubscriptionRegistry;

/// Readout of a managed list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    /// Records in query order.
    pub items: Vec<T>,
    /// Whether the first snapshot of the current subscription is pending.
    pub loading: bool,
    /// Bumped every time the manager re-subscribes or unsubscribes.
    /// A snapshot tagged with an older generation is discarded.
    pub generation: u64,
}

impl<T> ListState<T> {
    fn idle() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            generation: 0,
        }
    }
}

/// Keeps a typed, ordered list in sync with one collection.
///
/// Every change in the collection rebuilds the full list. The store
/// listener lives in a task tracked by the view's [`SubscriptionRegistry`].
#[derive(Debug)]
pub struct SubscriptionManager<T: Entity> {
    store: Arc<dyn DocumentStore>,
    registry: Arc<SubscriptionRegistry>,
    state: Arc<watch::Sender<ListState<T>>>,
    current: Option<SubscriptionId>,
    path: Option<CollectionPath>,
}

impl<T: Entity> SubscriptionManager<T> {
    /// Create an idle manager with its own registry.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_registry(store, Arc::new(SubscriptionRegistry::new()))
    }

    /// Create an idle manager that tracks its subscriptions in a shared
    /// registry.
    pub fn with_registry(store: Arc<dyn DocumentStore>, registry: Arc<SubscriptionRegistry>) -> Self {
        let (state, _) = watch::channel(ListState::idle());
        Self {
            store,
            registry,
            state: Arc::new(state),
            current: None,
            path: None,
        }
    }

    /// Subscribe to the entity's top-level collection in its default order.
    pub async fn subscribe_collection(&mut self) -> AppResult<()> {
        self.subscribe(CollectionPath::root(T::COLLECTION)).await
    }

    /// Subscribe to a collection in the entity's default order.
    pub async fn subscribe(&mut self, path: CollectionPath) -> AppResult<()> {
        self.subscribe_ordered(path, T::order_by()).await
    }

    /// Subscribe to a collection with an explicit order, replacing any
    /// previous subscription.
    pub async fn subscribe_ordered(&mut self, path: CollectionPath, order: OrderBy) -> AppResult<()> {
        self.release_current();
        let mut generation = 0;
        self.state.send_modify(|state| {
            state.generation += 1;
            state.items.clear();
            state.loading = true;
            generation = state.generation;
        });

        let listener = match self.store.listen(&path, &order).await {
            Ok(listener) => listener,
            Err(e) => {
                self.state.send_if_modified(|state| {
                    if state.generation != generation {
                        return false;
                    }
                    state.loading = false;
                    true
                });
                return Err(e);
            }
        };

        let cancel = CancellationToken::new();
        let task = tokio::spawn(pump::<T>(
            listener,
            self.state.clone(),
            generation,
            path.clone(),
            cancel.clone(),
        ));
        let handle = SubscriptionHandle::new(path.to_string(), cancel, task);
        self.current = Some(self.registry.track(handle));
        info!(collection = %path, order = %order.field, generation, "Subscribed");
        self.path = Some(path);
        Ok(())
    }

    /// Stop listening. The list keeps its last contents and no longer
    /// changes.
    pub fn unsubscribe(&mut self) {
        self.release_current();
        self.state.send_modify(|state| {
            state.generation += 1;
            state.loading = false;
        });
        if let Some(path) = self.path.take() {
            debug!(collection = %path, "Unsubscribed");
        }
    }

    /// Stop listening and empty the list.
    pub fn clear(&mut self) {
        self.release_current();
        self.path = None;
        self.state.send_modify(|state| {
            state.generation += 1;
            state.items.clear();
            state.loading = false;
        });
    }

    /// Current readout.
    pub fn state(&self) -> ListState<T> {
        self.state.borrow().clone()
    }

    /// Current records.
    pub fn items(&self) -> Vec<T> {
        self.state.borrow().items.clone()
    }

    /// Whether the first snapshot is pending.
    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// Path currently subscribed to.
    pub fn path(&self) -> Option<&CollectionPath> {
        self.path.as_ref()
    }

    /// Whether a subscription is open.
    pub fn is_subscribed(&self) -> bool {
        self.current.is_some()
    }

    /// Receive every state change.
    pub fn watch(&self) -> watch::Receiver<ListState<T>> {
        self.state.subscribe()
    }

    /// Wait for a state satisfying `pred`.
    pub async fn wait_until(
        &self,
        pred: impl FnMut(&ListState<T>) -> bool,
    ) -> AppResult<ListState<T>> {
        let mut rx = self.state.subscribe();
        let state = rx
            .wait_for(pred)
            .await
            .map_err(|_| AppError::service_unavailable("Subscription state closed"))?;
        Ok(state.clone())
    }

    /// Wait until the current subscription has delivered its first snapshot.
    pub async fn loaded(&self) -> AppResult<ListState<T>> {
        self.wait_until(|s| !s.loading).await
    }

    fn release_current(&mut self) {
        if let Some(id) = self.current.take() {
            self.registry.release(id);
        }
    }
}

impl<T: Entity> Drop for SubscriptionManager<T> {
    fn drop(&mut self) {
        if let Some(id) = self.current.take() {
            self.registry.release(id);
        }
    }
}

/// Forward snapshots into the list state until cancelled.
async fn pump<T: Entity>(
    mut listener: QueryListener,
    state: Arc<watch::Sender<ListState<T>>>,
    generation: u64,
    path: CollectionPath,
    cancel: CancellationToken,
) {
    apply(&state, generation, &path, &listener.latest());
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            next = listener.next() => match next {
                Ok(snapshot) => apply(&state, generation, &path, &snapshot),
                Err(e) => {
                    debug!(collection = %path, error = %e, "Listener closed");
                    break;
                }
            },
        }
    }
}

fn apply<T: Entity>(
    state: &watch::Sender<ListState<T>>,
    generation: u64,
    path: &CollectionPath,
    snapshot: &QuerySnapshot,
) {
    let items = decode_documents::<T>(path, &snapshot.documents);
    let count = items.len();
    let applied = state.send_if_modified(|s| {
        if s.generation != generation {
            return false;
        }
        s.items = items;
        s.loading = false;
        true
    });
    if applied {
        debug!(collection = %path, count, "Snapshot applied");
    } else {
        debug!(collection = %path, generation, "Stale snapshot discarded");
    }
}
