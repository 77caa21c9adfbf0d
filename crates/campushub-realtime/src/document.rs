//! Live view of a single typed document.

use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use campushub_core::error::AppError;
use campushub_core::result::AppResult;
use campushub_core::traits::{DocumentStore, Entity};
use campushub_core::types::{CollectionPath, DocumentId, DocumentListener, DocumentSnapshot};

use crate::decode::decode_document;
use crate::handle::{SubscriptionHandle, SubscriptionId};
use crate::registry::SubscriptionRegistry;

/// State of a watched document.
#[derive(Debug, Clone, PartialEq)]
pub enum DocState<T> {
    /// First snapshot pending.
    Loading,
    /// The document exists.
    Found(T),
    /// The document does not exist (or cannot be read as `T`).
    Missing,
}

impl<T> DocState<T> {
    /// Whether the first snapshot is pending.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The record, if found.
    pub fn found(&self) -> Option<&T> {
        match self {
            Self::Found(record) => Some(record),
            _ => None,
        }
    }
}

/// Keeps one document in sync, re-evaluating on every change.
#[derive(Debug)]
pub struct DocumentWatch<T: Entity> {
    registry: Arc<SubscriptionRegistry>,
    state: watch::Receiver<DocState<T>>,
    current: Option<SubscriptionId>,
}

impl<T: Entity> DocumentWatch<T> {
    /// Start watching `id` in `path`, tracked in the given registry.
    pub async fn open(
        store: &Arc<dyn DocumentStore>,
        registry: Arc<SubscriptionRegistry>,
        path: CollectionPath,
        id: DocumentId,
    ) -> AppResult<Self> {
        let listener = store.listen_document(&path, &id).await?;
        let (tx, rx) = watch::channel(DocState::Loading);
        let cancel = CancellationToken::new();
        let label = format!("{path}/{id}");
        let task = tokio::spawn(pump::<T>(listener, tx, path, cancel.clone()));
        let current = registry.track(SubscriptionHandle::new(label.clone(), cancel, task));
        info!(document = %label, "Watching document");
        Ok(Self {
            registry,
            state: rx,
            current: Some(current),
        })
    }

    /// Current state.
    pub fn state(&self) -> DocState<T> {
        self.state.borrow().clone()
    }

    /// Wait until the first snapshot has arrived.
    pub async fn settled(&self) -> AppResult<DocState<T>> {
        self.wait_until(|s| !s.is_loading()).await
    }

    /// Wait for a state satisfying `pred`.
    pub async fn wait_until(
        &self,
        pred: impl FnMut(&DocState<T>) -> bool,
    ) -> AppResult<DocState<T>> {
        let mut rx = self.state.clone();
        let state = rx
            .wait_for(pred)
            .await
            .map_err(|_| AppError::service_unavailable("Document watch closed"))?;
        Ok(state.clone())
    }

    /// Receive every state change.
    pub fn watch(&self) -> watch::Receiver<DocState<T>> {
        self.state.clone()
    }

    /// Stop watching. The last state is kept.
    pub fn close(&mut self) {
        if let Some(id) = self.current.take() {
            self.registry.release(id);
        }
    }
}

impl<T: Entity> Drop for DocumentWatch<T> {
    fn drop(&mut self) {
        self.close();
    }
}

async fn pump<T: Entity>(
    mut listener: DocumentListener,
    state: watch::Sender<DocState<T>>,
    path: CollectionPath,
    cancel: CancellationToken,
) {
    state.send_replace(evaluate(&path, &listener.latest()));
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            next = listener.next() => match next {
                Ok(snapshot) => {
                    state.send_replace(evaluate(&path, &snapshot));
                }
                Err(e) => {
                    debug!(collection = %path, error = %e, "Document listener closed");
                    break;
                }
            },
        }
    }
}

fn evaluate<T: Entity>(path: &CollectionPath, snapshot: &DocumentSnapshot) -> DocState<T> {
    match snapshot.document.as_ref().and_then(|doc| decode_document(path, doc)) {
        Some(record) => DocState::Found(record),
        None => DocState::Missing,
    }
}
