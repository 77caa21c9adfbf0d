//! Document store trait for the hosted database.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::{
    CollectionPath, Document, DocumentId, DocumentListener, OrderBy, QueryListener,
    QuerySnapshot, SetOptions, WriteFields,
};

/// A hosted document store: collections of schemaless documents with live
/// query subscriptions.
///
/// Writes resolve [`FieldValue::ServerTimestamp`](crate::types::FieldValue)
/// sentinels to one commit time per write. Concurrent writes to the same
/// document are last-write-wins.
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug + 'static {
    /// Subscribe to a collection ordered by one field.
    ///
    /// The listener's first value is the current snapshot; every later
    /// write to the collection pushes a new full snapshot.
    async fn listen(&self, path: &CollectionPath, order: &OrderBy) -> AppResult<QueryListener>;

    /// Subscribe to a single document.
    async fn listen_document(
        &self,
        path: &CollectionPath,
        id: &DocumentId,
    ) -> AppResult<DocumentListener>;

    /// One-shot ordered read of a collection.
    async fn query(&self, path: &CollectionPath, order: &OrderBy) -> AppResult<QuerySnapshot>;

    /// Read a single document.
    async fn get(&self, path: &CollectionPath, id: &DocumentId) -> AppResult<Option<Document>>;

    /// Create a document with a generated id.
    async fn add(&self, path: &CollectionPath, fields: WriteFields) -> AppResult<DocumentId>;

    /// Write a document at a known id, replacing or merging.
    async fn set(
        &self,
        path: &CollectionPath,
        id: &DocumentId,
        fields: WriteFields,
        options: SetOptions,
    ) -> AppResult<()>;

    /// Merge fields into an existing document. Fails if it does not exist.
    async fn update(
        &self,
        path: &CollectionPath,
        id: &DocumentId,
        fields: WriteFields,
    ) -> AppResult<()>;

    /// Delete a document. Sub-collections are left untouched.
    async fn delete(&self, path: &CollectionPath, id: &DocumentId) -> AppResult<()>;
}
