//! Syllabus entries per branch and semester.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campushub_core::traits::{Draft, Entity, RequiredField};
use campushub_core::types::{DocumentId, FieldValue, WriteFields};

use crate::filterable::Filterable;

/// A syllabus document for one branch and semester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyllabusEntry {
    /// Document id.
    pub id: DocumentId,
    /// Title.
    pub title: String,
    /// Branch tag.
    #[serde(default)]
    pub branch: String,
    /// Semester, free text ("3", "Sem 5", ...).
    #[serde(default)]
    pub semester: String,
    /// Description.
    pub description: Option<String>,
    /// Download link.
    pub download_url: Option<String>,
    /// Server creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Server update time.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for SyllabusEntry {
    const COLLECTION: &'static str = "syllabus";

    fn id(&self) -> &DocumentId {
        &self.id
    }
}

impl Filterable for SyllabusEntry {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn branch(&self) -> Option<&str> {
        Some(&self.branch)
    }
}

/// Form draft for a syllabus entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyllabusDraft {
    /// Id of the entry being edited.
    pub id: Option<DocumentId>,
    /// Title (required).
    pub title: String,
    /// Branch (required).
    pub branch: String,
    /// Semester (required).
    pub semester: String,
    /// Description.
    pub description: String,
    /// Download link.
    pub download_url: String,
}

impl Draft for SyllabusDraft {
    type Entity = SyllabusEntry;

    fn id(&self) -> Option<&DocumentId> {
        self.id.as_ref()
    }

    fn required_fields(&self) -> Vec<RequiredField<'_>> {
        vec![
            RequiredField::new("title", &self.title),
            RequiredField::new("branch", &self.branch),
            RequiredField::new("semester", &self.semester),
        ]
    }

    fn to_fields(&self) -> WriteFields {
        WriteFields::from([
            ("title".to_string(), FieldValue::trimmed(&self.title)),
            ("branch".to_string(), FieldValue::trimmed(&self.branch)),
            ("semester".to_string(), FieldValue::trimmed(&self.semester)),
            ("description".to_string(), FieldValue::optional(&self.description)),
            ("downloadUrl".to_string(), FieldValue::optional(&self.download_url)),
        ])
    }

    fn from_entity(entry: &SyllabusEntry) -> Self {
        Self {
            id: Some(entry.id.clone()),
            title: entry.title.clone(),
            branch: entry.branch.clone(),
            semester: entry.semester.clone(),
            description: entry.description.clone().unwrap_or_default(),
            download_url: entry.download_url.clone().unwrap_or_default(),
        }
    }
}
