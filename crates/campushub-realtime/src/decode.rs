//! Snapshot to typed record conversion.

use tracing::warn;

use campushub_core::traits::Entity;
use campushub_core::types::{CollectionPath, Document};

/// Decode every document, skipping ones that do not fit the record.
pub fn decode_documents<T: Entity>(path: &CollectionPath, documents: &[Document]) -> Vec<T> {
    documents
        .iter()
        .filter_map(|doc| decode_document(path, doc))
        .collect()
}

/// Decode one document, logging and discarding it if it does not fit.
pub fn decode_document<T: Entity>(path: &CollectionPath, doc: &Document) -> Option<T> {
    match T::from_document(doc) {
        Ok(record) => Some(record),
        Err(e) => {
            warn!(collection = %path, document_id = %doc.id, error = %e, "Skipping undecodable document");
            None
        }
    }
}
