//! Contracts implemented by every content type and its form draft.

use serde::de::DeserializeOwned;

use crate::result::AppResult;
use crate::types::{Document, DocumentId, OrderBy, WriteFields};

/// A typed record stored as a document.
///
/// Each entity names its top-level collection and its list ordering.
/// Sub-collection entities (lessons) are addressed through an explicit
/// [`CollectionPath`](crate::types::CollectionPath) instead.
pub trait Entity: Clone + Send + Sync + DeserializeOwned + 'static {
    /// Collection name.
    const COLLECTION: &'static str;

    /// Whether writes stamp `createdAt`/`updatedAt`.
    const TIMESTAMPED: bool = true;

    /// Document id.
    fn id(&self) -> &DocumentId;

    /// Ordering used by list subscriptions.
    fn order_by() -> OrderBy {
        OrderBy::newest_first()
    }

    /// Decode from a stored document.
    fn from_document(doc: &Document) -> AppResult<Self> {
        doc.decode()
    }
}

/// A required form field and its current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredField<'a> {
    /// Wire name of the field.
    pub name: &'static str,
    /// Current draft value.
    pub value: &'a str,
}

impl<'a> RequiredField<'a> {
    /// Pair a field name with its draft value.
    pub fn new(name: &'static str, value: &'a str) -> Self {
        Self { name, value }
    }

    /// Whether the value is empty after trimming.
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// The uncommitted edit buffer behind an entity form.
///
/// A draft without an id creates a new document; a draft with an id
/// overwrites that document.
pub trait Draft: Clone + Default + Send + Sync + 'static {
    /// The entity this draft writes.
    type Entity: Entity;

    /// Id of the document being edited, if any.
    fn id(&self) -> Option<&DocumentId>;

    /// Fields that must be non-blank before anything is written.
    fn required_fields(&self) -> Vec<RequiredField<'_>>;

    /// Trimmed field values to write.
    fn to_fields(&self) -> WriteFields;

    /// Pre-fill a draft from an existing entity.
    fn from_entity(entity: &Self::Entity) -> Self;

    /// Names of required fields that are blank.
    fn missing_fields(&self) -> Vec<&'static str> {
        self.required_fields()
            .into_iter()
            .filter(RequiredField::is_blank)
            .map(|f| f.name)
            .collect()
    }
}
