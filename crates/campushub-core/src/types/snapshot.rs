//! Snapshots delivered by the document store and the listeners that carry them.

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::error::AppError;
use crate::result::AppResult;
use crate::types::document::Document;
use crate::types::id::DocumentId;

/// Full, ordered readout of a collection query.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySnapshot {
    /// Matching documents in query order.
    pub documents: Vec<Document>,
    /// When the snapshot was taken.
    pub read_time: DateTime<Utc>,
}

impl QuerySnapshot {
    /// Number of documents in the snapshot.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the snapshot has no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Readout of a single document, which may not exist.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSnapshot {
    /// The id that was watched.
    pub id: DocumentId,
    /// The document, if it exists.
    pub document: Option<Document>,
    /// When the snapshot was taken.
    pub read_time: DateTime<Utc>,
}

impl DocumentSnapshot {
    /// Whether the document exists.
    pub fn exists(&self) -> bool {
        self.document.is_some()
    }
}

/// Receiving end of a live store subscription.
///
/// The store keeps only the latest snapshot for each listener; every
/// snapshot is complete, so skipping an intermediate one loses nothing.
/// Dropping the listener releases the subscription on the store side.
#[derive(Debug)]
pub struct SnapshotListener<T> {
    receiver: watch::Receiver<T>,
}

/// Listener for a collection query.
pub type QueryListener = SnapshotListener<QuerySnapshot>;
/// Listener for a single document.
pub type DocumentListener = SnapshotListener<DocumentSnapshot>;

impl<T: Clone> SnapshotListener<T> {
    /// Wrap a store-side watch receiver.
    pub fn new(receiver: watch::Receiver<T>) -> Self {
        Self { receiver }
    }

    /// Take the latest snapshot, marking it as seen.
    pub fn latest(&mut self) -> T {
        self.receiver.borrow_and_update().clone()
    }

    /// Wait for the next snapshot.
    ///
    /// Fails once the store side has gone away.
    pub async fn next(&mut self) -> AppResult<T> {
        self.receiver
            .changed()
            .await
            .map_err(|_| AppError::service_unavailable("Document store listener closed"))?;
        Ok(self.latest())
    }
}
