//! Live listeners registered against the store.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use campushub_core::types::{
    CollectionPath, DocumentId, DocumentSnapshot, OrderBy, QuerySnapshot,
};

use super::state::Collections;

/// An ordered query listener on one collection.
#[derive(Debug)]
struct QueryWatch {
    order: OrderBy,
    sender: watch::Sender<QuerySnapshot>,
}

/// A listener on one document.
#[derive(Debug)]
struct DocumentWatch {
    id: DocumentId,
    sender: watch::Sender<DocumentSnapshot>,
}

/// All listeners, keyed by collection path.
///
/// A listener is released when its receiver is dropped. Released entries
/// are pruned on the next notification for their path, and from every
/// path whenever a new listener registers.
#[derive(Debug, Default)]
pub struct ListenerSet {
    queries: HashMap<CollectionPath, Vec<QueryWatch>>,
    documents: HashMap<CollectionPath, Vec<DocumentWatch>>,
}

impl ListenerSet {
    /// Create an empty listener set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a query listener seeded with the current snapshot.
    pub fn add_query(
        &mut self,
        path: &CollectionPath,
        order: &OrderBy,
        state: &Collections,
        read_time: DateTime<Utc>,
    ) -> watch::Receiver<QuerySnapshot> {
        self.prune();
        let (sender, receiver) = watch::channel(query_snapshot(state, path, order, read_time));
        self.queries.entry(path.clone()).or_default().push(QueryWatch {
            order: order.clone(),
            sender,
        });
        receiver
    }

    /// Register a document listener seeded with the current snapshot.
    pub fn add_document(
        &mut self,
        path: &CollectionPath,
        id: &DocumentId,
        state: &Collections,
        read_time: DateTime<Utc>,
    ) -> watch::Receiver<DocumentSnapshot> {
        self.prune();
        let (sender, receiver) = watch::channel(document_snapshot(state, path, id, read_time));
        self.documents
            .entry(path.clone())
            .or_default()
            .push(DocumentWatch {
                id: id.clone(),
                sender,
            });
        receiver
    }

    /// Push fresh snapshots after a write to `id` in `path`.
    pub fn notify(
        &mut self,
        path: &CollectionPath,
        id: &DocumentId,
        state: &Collections,
        read_time: DateTime<Utc>,
    ) {
        if let Some(watches) = self.queries.get_mut(path) {
            watches.retain(|w| !w.sender.is_closed());
            for w in watches.iter() {
                w.sender
                    .send_replace(query_snapshot(state, path, &w.order, read_time));
            }
            if watches.is_empty() {
                self.queries.remove(path);
            }
        }

        if let Some(watches) = self.documents.get_mut(path) {
            watches.retain(|w| !w.sender.is_closed());
            for w in watches.iter().filter(|w| &w.id == id) {
                w.sender
                    .send_replace(document_snapshot(state, path, id, read_time));
            }
            if watches.is_empty() {
                self.documents.remove(path);
            }
        }
    }

    /// Drop released listeners and the paths left without any.
    pub fn prune(&mut self) {
        self.queries.retain(|_, ws| {
            ws.retain(|w| !w.sender.is_closed());
            !ws.is_empty()
        });
        self.documents.retain(|_, ws| {
            ws.retain(|w| !w.sender.is_closed());
            !ws.is_empty()
        });
    }

    /// Entries held, released or not, and the number of paths keyed.
    pub fn retained(&self) -> (usize, usize) {
        let entries = self.queries.values().map(Vec::len).sum::<usize>()
            + self.documents.values().map(Vec::len).sum::<usize>();
        (entries, self.queries.len() + self.documents.len())
    }

    /// Number of live listeners (query and document) on a path.
    pub fn count(&self, path: &CollectionPath) -> usize {
        let queries = self
            .queries
            .get(path)
            .map_or(0, |ws| ws.iter().filter(|w| !w.sender.is_closed()).count());
        let documents = self
            .documents
            .get(path)
            .map_or(0, |ws| ws.iter().filter(|w| !w.sender.is_closed()).count());
        queries + documents
    }

    /// Number of live listeners across all paths.
    pub fn total(&self) -> usize {
        let queries: usize = self
            .queries
            .values()
            .map(|ws| ws.iter().filter(|w| !w.sender.is_closed()).count())
            .sum();
        let documents: usize = self
            .documents
            .values()
            .map(|ws| ws.iter().filter(|w| !w.sender.is_closed()).count())
            .sum();
        queries + documents
    }
}

fn query_snapshot(
    state: &Collections,
    path: &CollectionPath,
    order: &OrderBy,
    read_time: DateTime<Utc>,
) -> QuerySnapshot {
    QuerySnapshot {
        documents: state.ordered(path, order),
        read_time,
    }
}

fn document_snapshot(
    state: &Collections,
    path: &CollectionPath,
    id: &DocumentId,
    read_time: DateTime<Utc>,
) -> DocumentSnapshot {
    DocumentSnapshot {
        id: id.clone(),
        document: state.get(path, id).cloned(),
        read_time,
    }
}
