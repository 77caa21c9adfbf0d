//! Study notes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campushub_core::traits::{Draft, Entity, RequiredField};
use campushub_core::types::{DocumentId, FieldValue, WriteFields};

use crate::filterable::Filterable;

/// A downloadable note (PDF, short notes, PYQ, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Document id.
    pub id: DocumentId,
    /// Note title.
    pub title: String,
    /// Branch tag.
    #[serde(default)]
    pub tag: String,
    /// Category (handwritten, PYQ, ...).
    pub category: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Download link.
    pub download_url: Option<String>,
    /// Server creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Server update time.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Note {
    const COLLECTION: &'static str = "notes";

    fn id(&self) -> &DocumentId {
        &self.id
    }
}

impl Filterable for Note {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn branch(&self) -> Option<&str> {
        Some(&self.tag)
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

/// Form draft for a note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    /// Id of the note being edited.
    pub id: Option<DocumentId>,
    /// Title (required).
    pub title: String,
    /// Branch tag (required).
    pub tag: String,
    /// Category.
    pub category: String,
    /// Description.
    pub description: String,
    /// Download link.
    pub download_url: String,
}

impl Draft for NoteDraft {
    type Entity = Note;

    fn id(&self) -> Option<&DocumentId> {
        self.id.as_ref()
    }

    fn required_fields(&self) -> Vec<RequiredField<'_>> {
        vec![
            RequiredField::new("title", &self.title),
            RequiredField::new("tag", &self.tag),
        ]
    }

    fn to_fields(&self) -> WriteFields {
        WriteFields::from([
            ("title".to_string(), FieldValue::trimmed(&self.title)),
            ("tag".to_string(), FieldValue::trimmed(&self.tag)),
            ("category".to_string(), FieldValue::optional(&self.category)),
            ("description".to_string(), FieldValue::optional(&self.description)),
            ("downloadUrl".to_string(), FieldValue::optional(&self.download_url)),
        ])
    }

    fn from_entity(note: &Note) -> Self {
        Self {
            id: Some(note.id.clone()),
            title: note.title.clone(),
            tag: note.tag.clone(),
            category: note.category.clone().unwrap_or_default(),
            description: note.description.clone().unwrap_or_default(),
            download_url: note.download_url.clone().unwrap_or_default(),
        }
    }
}
