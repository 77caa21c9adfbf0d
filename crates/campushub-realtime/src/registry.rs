//! Dispose-list of subscriptions owned by one view.

use dashmap::DashMap;
use tracing::debug;

use crate::handle::{SubscriptionHandle, SubscriptionId};

/// Every subscription a view has opened and not yet released.
///
/// Releasing the registry (or dropping it) cancels all of them.
#[derive(Debug, Default)]
pub struct SubscriptionRegistry {
    handles: DashMap<SubscriptionId, SubscriptionHandle>,
}

impl SubscriptionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a handle.
    pub fn track(&self, handle: SubscriptionHandle) -> SubscriptionId {
        let id = handle.id();
        debug!(subscription = %id, label = handle.label(), "Subscription tracked");
        self.handles.insert(id, handle);
        id
    }

    /// Cancel and forget one subscription. Unknown ids are ignored.
    pub fn release(&self, id: SubscriptionId) {
        if let Some((_, mut handle)) = self.handles.remove(&id) {
            handle.cancel();
            debug!(subscription = %id, label = handle.label(), "Subscription released");
        }
    }

    /// Cancel every tracked subscription.
    pub fn dispose_all(&self) {
        let ids: Vec<SubscriptionId> = self.handles.iter().map(|e| *e.key()).collect();
        for id in ids {
            self.release(id);
        }
    }

    /// Number of tracked subscriptions.
    pub fn active_count(&self) -> usize {
        self.handles.len()
    }

    /// Whether a subscription is still tracked.
    pub fn contains(&self, id: SubscriptionId) -> bool {
        self.handles.contains_key(&id)
    }
}
