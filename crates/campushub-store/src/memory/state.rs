//! Stored collections and the pure write logic applied to them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campushub_core::result::AppResult;
use campushub_core::types::{
    CollectionPath, Document, DocumentId, FieldValue, Fields, OrderBy, WriteFields,
    timestamp_value,
};
use campushub_core::AppError;

/// Documents of one collection keyed by id.
pub type Collection = BTreeMap<DocumentId, Document>;

/// Every collection the store holds, keyed by path.
///
/// Sub-collections are independent entries; removing a parent document
/// never touches them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collections(BTreeMap<CollectionPath, Collection>);

impl Collections {
    /// Empty store contents.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a document.
    pub fn get(&self, path: &CollectionPath, id: &DocumentId) -> Option<&Document> {
        self.0.get(path).and_then(|c| c.get(id))
    }

    /// Number of documents in a collection.
    pub fn len(&self, path: &CollectionPath) -> usize {
        self.0.get(path).map_or(0, Collection::len)
    }

    /// Documents of a collection that carry the order field, sorted by it
    /// with document id as tie-breaker.
    pub fn ordered(&self, path: &CollectionPath, order: &OrderBy) -> Vec<Document> {
        let Some(collection) = self.0.get(path) else {
            return Vec::new();
        };
        let mut docs: Vec<Document> = collection
            .values()
            .filter(|doc| order.includes(&doc.fields))
            .cloned()
            .collect();
        docs.sort_by(|a, b| order.compare(&a.fields, &b.fields).then_with(|| a.id.cmp(&b.id)));
        docs
    }

    /// Write a document, replacing or merging its fields.
    pub fn set(
        &mut self,
        path: &CollectionPath,
        id: &DocumentId,
        fields: Fields,
        merge: bool,
        commit: DateTime<Utc>,
    ) -> Document {
        let collection = self.0.entry(path.clone()).or_default();
        let doc = collection.entry(id.clone()).or_insert_with(|| Document {
            id: id.clone(),
            fields: Fields::new(),
            create_time: commit,
            update_time: commit,
        });
        if merge {
            doc.fields.extend(fields);
        } else {
            doc.fields = fields;
        }
        doc.update_time = commit;
        doc.clone()
    }

    /// Merge fields into an existing document.
    pub fn update(
        &mut self,
        path: &CollectionPath,
        id: &DocumentId,
        fields: Fields,
        commit: DateTime<Utc>,
    ) -> AppResult<Document> {
        let doc = self
            .0
            .get_mut(path)
            .and_then(|c| c.get_mut(id))
            .ok_or_else(|| AppError::not_found(format!("No document '{id}' in '{path}'")))?;
        doc.fields.extend(fields);
        doc.update_time = commit;
        Ok(doc.clone())
    }

    /// Remove a document. Returns it if it existed.
    pub fn remove(&mut self, path: &CollectionPath, id: &DocumentId) -> Option<Document> {
        let collection = self.0.get_mut(path)?;
        let removed = collection.remove(id);
        if collection.is_empty() {
            self.0.remove(path);
        }
        removed
    }

    /// Latest update time across all documents.
    pub fn newest_time(&self) -> Option<DateTime<Utc>> {
        self.0
            .values()
            .flat_map(Collection::values)
            .map(|doc| doc.update_time)
            .max()
    }

    /// Number of documents across all collections.
    pub fn document_count(&self) -> usize {
        self.0.values().map(Collection::len).sum()
    }
}

/// Replace server timestamp sentinels with the commit time.
pub fn resolve(fields: WriteFields, commit: DateTime<Utc>) -> Fields {
    fields
        .into_iter()
        .map(|(name, value)| {
            let value = match value {
                FieldValue::Value(v) => v,
                FieldValue::ServerTimestamp => timestamp_value(commit),
            };
            (name, value)
        })
        .collect()
}
