//! RAII handle for one live subscription.

use std::fmt;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Identifier of a tracked subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// A fresh id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owns the task pumping one store listener. Dropping the handle cancels
/// the task, which drops the listener and frees the store-side slot.
#[derive(Debug)]
pub struct SubscriptionHandle {
    id: SubscriptionId,
    label: String,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl SubscriptionHandle {
    /// Wrap a spawned pump task and its cancellation token.
    pub fn new(label: impl Into<String>, cancel: CancellationToken, task: JoinHandle<()>) -> Self {
        Self {
            id: SubscriptionId::new(),
            label: label.into(),
            cancel,
            task: Some(task),
        }
    }

    /// Handle id.
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// What the subscription listens to, for logs.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the pump task is still running.
    pub fn is_active(&self) -> bool {
        !self.cancel.is_cancelled() && self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop the subscription.
    pub fn cancel(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
