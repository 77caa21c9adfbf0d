//! A list scoped under a selectable parent document.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use campushub_core::result::AppResult;
use campushub_core::traits::{DocumentStore, Entity};
use campushub_core::types::{CollectionPath, DocumentId};

use crate::list::{ListState, SubscriptionManager};
use crate::registry::SubscriptionRegistry;

/// A sub-collection list that follows a selector, e.g. the lessons of the
/// selected course.
///
/// Changing the selector cancels the old subscription, empties the list,
/// and opens one on the new parent. An empty selector holds no
/// subscription.
#[derive(Debug)]
pub struct ScopedSubscription<T: Entity> {
    parent: CollectionPath,
    manager: SubscriptionManager<T>,
    selected: Option<DocumentId>,
}

impl<T: Entity> ScopedSubscription<T> {
    /// A scoped list under documents of `parent`, with its own registry.
    pub fn new(store: Arc<dyn DocumentStore>, parent: CollectionPath) -> Self {
        Self::with_registry(store, parent, Arc::new(SubscriptionRegistry::new()))
    }

    /// A scoped list tracked in a shared registry.
    pub fn with_registry(
        store: Arc<dyn DocumentStore>,
        parent: CollectionPath,
        registry: Arc<SubscriptionRegistry>,
    ) -> Self {
        Self {
            parent,
            manager: SubscriptionManager::with_registry(store, registry),
            selected: None,
        }
    }

    /// Point the list at a parent document, or at nothing.
    ///
    /// Selecting the current parent again is a no-op.
    pub async fn select(&mut self, parent_id: Option<DocumentId>) -> AppResult<()> {
        let parent_id = parent_id.filter(|id| !id.is_blank());
        if parent_id == self.selected && (parent_id.is_none() || self.manager.is_subscribed()) {
            return Ok(());
        }
        match parent_id {
            Some(id) => {
                let path = self.parent.child(&id, T::COLLECTION)?;
                debug!(parent = %self.parent, parent_id = %id, "Rescoping subscription");
                self.selected = Some(id);
                self.manager.subscribe(path).await
            }
            None => {
                self.selected = None;
                self.manager.clear();
                Ok(())
            }
        }
    }

    /// The selected parent document.
    pub fn selected(&self) -> Option<&DocumentId> {
        self.selected.as_ref()
    }

    /// Current readout.
    pub fn state(&self) -> ListState<T> {
        self.manager.state()
    }

    /// Current records.
    pub fn items(&self) -> Vec<T> {
        self.manager.items()
    }

    /// Receive every state change.
    pub fn watch(&self) -> watch::Receiver<ListState<T>> {
        self.manager.watch()
    }

    /// Wait until the current scope has delivered its first snapshot.
    pub async fn loaded(&self) -> AppResult<ListState<T>> {
        self.manager.loaded().await
    }

    /// Wait for a state satisfying `pred`.
    pub async fn wait_until(
        &self,
        pred: impl FnMut(&ListState<T>) -> bool,
    ) -> AppResult<ListState<T>> {
        self.manager.wait_until(pred).await
    }
}
