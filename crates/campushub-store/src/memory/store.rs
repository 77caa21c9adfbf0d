//! `DocumentStore` implementation backed by process memory.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use campushub_core::config::store::StoreConfig;
use campushub_core::result::AppResult;
use campushub_core::traits::DocumentStore;
use campushub_core::types::{
    CollectionPath, Document, DocumentId, DocumentListener, OrderBy, QueryListener,
    QuerySnapshot, SetOptions, SnapshotListener, WriteFields,
};

use super::clock::CommitClock;
use super::listeners::ListenerSet;
use super::state::{Collections, resolve};
use crate::persist;

/// Mutable store state, guarded by one lock so that a write and the
/// snapshots it pushes are observed in commit order.
#[derive(Debug)]
struct Inner {
    data: Collections,
    listeners: ListenerSet,
    clock: CommitClock,
    version: u64,
}

/// Write-through target for persisted stores.
#[derive(Debug)]
struct FileSink {
    path: PathBuf,
    /// Highest version written so far.
    written: Mutex<u64>,
}

/// In-process document store.
///
/// Cloning shares the same underlying data.
#[derive(Debug, Clone)]
pub struct MemoryDocumentStore {
    inner: Arc<RwLock<Inner>>,
    sink: Option<Arc<FileSink>>,
}

impl MemoryDocumentStore {
    /// Create an empty, non-persistent store.
    pub fn new() -> Self {
        Self::from_collections(Collections::new(), None)
    }

    /// Open a store from configuration, loading the data file if persistence
    /// is enabled.
    pub async fn open(config: &StoreConfig) -> AppResult<Self> {
        if !config.persist {
            info!("Document store running in memory only");
            return Ok(Self::new());
        }
        let path = PathBuf::from(&config.data_file);
        let data = persist::load(&path).await?.unwrap_or_default();
        info!(path = %path.display(), "Document store persisting to file");
        Ok(Self::from_collections(
            data,
            Some(Arc::new(FileSink {
                path,
                written: Mutex::new(0),
            })),
        ))
    }

    fn from_collections(data: Collections, sink: Option<Arc<FileSink>>) -> Self {
        let clock = data
            .newest_time()
            .map(CommitClock::resume_after)
            .unwrap_or_default();
        Self {
            inner: Arc::new(RwLock::new(Inner {
                data,
                listeners: ListenerSet::new(),
                clock,
                version: 0,
            })),
            sink,
        }
    }

    /// Live listeners on a collection path.
    pub async fn listener_count(&self, path: &CollectionPath) -> usize {
        self.inner.read().await.listeners.count(path)
    }

    /// Live listeners across the whole store.
    pub async fn total_listeners(&self) -> usize {
        self.inner.read().await.listeners.total()
    }

    /// Listener entries still held by the store, released or not.
    pub async fn retained_listeners(&self) -> usize {
        self.inner.read().await.listeners.retained().0
    }

    /// Number of documents in a collection.
    pub async fn collection_len(&self, path: &CollectionPath) -> usize {
        self.inner.read().await.data.len(path)
    }

    /// Write the current contents to the data file, if persistent.
    pub async fn flush(&self) -> AppResult<()> {
        let Some(sink) = &self.sink else {
            return Ok(());
        };
        let (version, bytes) = {
            let inner = self.inner.read().await;
            (inner.version, persist::encode(&inner.data)?)
        };
        Self::write_through(sink, version, bytes).await
    }

    /// Finish a committed write: push snapshots and capture the bytes to
    /// persist. Runs under the write lock.
    fn after_commit(
        &self,
        inner: &mut Inner,
        path: &CollectionPath,
        id: &DocumentId,
        commit: DateTime<Utc>,
    ) -> AppResult<Option<(u64, Vec<u8>)>> {
        inner.version += 1;
        let Inner {
            data, listeners, ..
        } = &mut *inner;
        listeners.notify(path, id, data, commit);
        match &self.sink {
            Some(_) => Ok(Some((inner.version, persist::encode(&inner.data)?))),
            None => Ok(None),
        }
    }

    async fn persist(&self, payload: Option<(u64, Vec<u8>)>) -> AppResult<()> {
        match (&self.sink, payload) {
            (Some(sink), Some((version, bytes))) => {
                Self::write_through(sink, version, bytes).await
            }
            _ => Ok(()),
        }
    }

    async fn write_through(sink: &FileSink, version: u64, bytes: Vec<u8>) -> AppResult<()> {
        let mut written = sink.written.lock().await;
        if version < *written {
            return Ok(());
        }
        persist::save(&sink.path, &bytes).await?;
        *written = version;
        Ok(())
    }
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn listen(&self, path: &CollectionPath, order: &OrderBy) -> AppResult<QueryListener> {
        let mut guard = self.inner.write().await;
        let Inner {
            data, listeners, ..
        } = &mut *guard;
        let receiver = listeners.add_query(path, order, data, Utc::now());
        debug!(collection = %path, order = %order.field, "Query listener registered");
        Ok(SnapshotListener::new(receiver))
    }

    async fn listen_document(
        &self,
        path: &CollectionPath,
        id: &DocumentId,
    ) -> AppResult<DocumentListener> {
        let mut guard = self.inner.write().await;
        let Inner {
            data, listeners, ..
        } = &mut *guard;
        let receiver = listeners.add_document(path, id, data, Utc::now());
        debug!(collection = %path, document_id = %id, "Document listener registered");
        Ok(SnapshotListener::new(receiver))
    }

    async fn query(&self, path: &CollectionPath, order: &OrderBy) -> AppResult<QuerySnapshot> {
        let inner = self.inner.read().await;
        Ok(QuerySnapshot {
            documents: inner.data.ordered(path, order),
            read_time: Utc::now(),
        })
    }

    async fn get(&self, path: &CollectionPath, id: &DocumentId) -> AppResult<Option<Document>> {
        Ok(self.inner.read().await.data.get(path, id).cloned())
    }

    async fn add(&self, path: &CollectionPath, fields: WriteFields) -> AppResult<DocumentId> {
        let id = DocumentId::generate();
        self.set(path, &id, fields, SetOptions::overwrite()).await?;
        Ok(id)
    }

    async fn set(
        &self,
        path: &CollectionPath,
        id: &DocumentId,
        fields: WriteFields,
        options: SetOptions,
    ) -> AppResult<()> {
        let payload = {
            let mut inner = self.inner.write().await;
            let commit = inner.clock.tick();
            inner
                .data
                .set(path, id, resolve(fields, commit), options.merge, commit);
            debug!(collection = %path, document_id = %id, merge = options.merge, "Document set");
            self.after_commit(&mut inner, path, id, commit)?
        };
        self.persist(payload).await
    }

    async fn update(
        &self,
        path: &CollectionPath,
        id: &DocumentId,
        fields: WriteFields,
    ) -> AppResult<()> {
        let payload = {
            let mut inner = self.inner.write().await;
            let commit = inner.clock.tick();
            inner.data.update(path, id, resolve(fields, commit), commit)?;
            debug!(collection = %path, document_id = %id, "Document updated");
            self.after_commit(&mut inner, path, id, commit)?
        };
        self.persist(payload).await
    }

    async fn delete(&self, path: &CollectionPath, id: &DocumentId) -> AppResult<()> {
        let payload = {
            let mut inner = self.inner.write().await;
            if inner.data.remove(path, id).is_none() {
                debug!(collection = %path, document_id = %id, "Delete of absent document");
                return Ok(());
            }
            let commit = inner.clock.tick();
            debug!(collection = %path, document_id = %id, "Document deleted");
            self.after_commit(&mut inner, path, id, commit)?
        };
        self.persist(payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campushub_core::types::{CREATED_AT, FieldValue, UPDATED_AT};
    use serde_json::json;

    fn fields(pairs: &[(&str, FieldValue)]) -> WriteFields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn stamped(title: &str) -> WriteFields {
        fields(&[
            ("title", FieldValue::from(title)),
            (CREATED_AT, FieldValue::ServerTimestamp),
            (UPDATED_AT, FieldValue::ServerTimestamp),
        ])
    }

    #[tokio::test]
    async fn test_listener_receives_initial_and_pushed_snapshots() {
        let store = MemoryDocumentStore::new();
        let courses = CollectionPath::root("courses");
        let mut listener = store.listen(&courses, &OrderBy::newest_first()).await.unwrap();
        assert!(listener.latest().is_empty());

        store.add(&courses, stamped("Signals")).await.unwrap();
        let snapshot = listener.next().await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.documents[0].fields["title"], json!("Signals"));
    }

    #[tokio::test]
    async fn test_newest_first_ordering() {
        let store = MemoryDocumentStore::new();
        let courses = CollectionPath::root("courses");
        store.add(&courses, stamped("First")).await.unwrap();
        store.add(&courses, stamped("Second")).await.unwrap();
        let snapshot = store.query(&courses, &OrderBy::newest_first()).await.unwrap();
        let titles: Vec<_> = snapshot
            .documents
            .iter()
            .map(|d| d.fields["title"].clone())
            .collect();
        assert_eq!(titles, vec![json!("Second"), json!("First")]);
    }

    #[tokio::test]
    async fn test_document_listener_sees_delete() {
        let store = MemoryDocumentStore::new();
        let courses = CollectionPath::root("courses");
        let id = store.add(&courses, stamped("Signals")).await.unwrap();
        let mut listener = store.listen_document(&courses, &id).await.unwrap();
        assert!(listener.latest().exists());

        store.delete(&courses, &id).await.unwrap();
        assert!(!listener.next().await.unwrap().exists());
    }

    #[tokio::test]
    async fn test_dropped_listener_is_released() {
        let store = MemoryDocumentStore::new();
        let courses = CollectionPath::root("courses");
        let listener = store.listen(&courses, &OrderBy::newest_first()).await.unwrap();
        assert_eq!(store.listener_count(&courses).await, 1);
        drop(listener);
        assert_eq!(store.listener_count(&courses).await, 0);
        store.add(&courses, stamped("Signals")).await.unwrap();
        assert_eq!(store.total_listeners().await, 0);
    }

    #[tokio::test]
    async fn test_delete_parent_keeps_subcollection() {
        let store = MemoryDocumentStore::new();
        let courses = CollectionPath::root("courses");
        let course_id = store.add(&courses, stamped("Signals")).await.unwrap();
        let lessons = courses.child(&course_id, "lessons").unwrap();
        store
            .add(&lessons, fields(&[("title", "Intro".into()), ("order", 1i64.into())]))
            .await
            .unwrap();

        store.delete(&courses, &course_id).await.unwrap();
        assert!(store.get(&courses, &course_id).await.unwrap().is_none());
        assert_eq!(store.collection_len(&lessons).await, 1);
    }

    #[tokio::test]
    async fn test_update_missing_document_fails() {
        let store = MemoryDocumentStore::new();
        let err = store
            .update(&CollectionPath::root("courses"), &DocumentId::new("ghost"), stamped("x"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_overwrite_keeps_create_time() {
        let store = MemoryDocumentStore::new();
        let courses = CollectionPath::root("courses");
        let id = store.add(&courses, stamped("Signals")).await.unwrap();
        let before = store.get(&courses, &id).await.unwrap().unwrap();
        store
            .set(&courses, &id, fields(&[("title", "Systems".into())]), SetOptions::overwrite())
            .await
            .unwrap();
        let after = store.get(&courses, &id).await.unwrap().unwrap();
        assert_eq!(after.create_time, before.create_time);
        assert!(after.update_time > before.update_time);
        assert!(after.get(CREATED_AT).is_none());
    }
}
