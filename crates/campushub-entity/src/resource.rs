//! Extra study resources (reference books, question banks, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campushub_core::traits::{Draft, Entity, RequiredField};
use campushub_core::types::{DocumentId, FieldValue, WriteFields};

use crate::filterable::Filterable;

/// A categorized resource, optionally tied to a branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Document id.
    pub id: DocumentId,
    /// Title.
    pub title: String,
    /// Category.
    #[serde(default)]
    pub category: String,
    /// Branch tag, if branch-specific.
    pub branch: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Download link.
    pub download_url: Option<String>,
    /// Server creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Server update time.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Resource {
    const COLLECTION: &'static str = "resources";

    fn id(&self) -> &DocumentId {
        &self.id
    }
}

impl Filterable for Resource {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }
}

/// Form draft for a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDraft {
    /// Id of the resource being edited.
    pub id: Option<DocumentId>,
    /// Title (required).
    pub title: String,
    /// Category (required).
    pub category: String,
    /// Branch.
    pub branch: String,
    /// Description.
    pub description: String,
    /// Download link.
    pub download_url: String,
}

impl Draft for ResourceDraft {
    type Entity = Resource;

    fn id(&self) -> Option<&DocumentId> {
        self.id.as_ref()
    }

    fn required_fields(&self) -> Vec<RequiredField<'_>> {
        vec![
            RequiredField::new("title", &self.title),
            RequiredField::new("category", &self.category),
        ]
    }

    fn to_fields(&self) -> WriteFields {
        WriteFields::from([
            ("title".to_string(), FieldValue::trimmed(&self.title)),
            ("category".to_string(), FieldValue::trimmed(&self.category)),
            ("branch".to_string(), FieldValue::optional(&self.branch)),
            ("description".to_string(), FieldValue::optional(&self.description)),
            ("downloadUrl".to_string(), FieldValue::optional(&self.download_url)),
        ])
    }

    fn from_entity(resource: &Resource) -> Self {
        Self {
            id: Some(resource.id.clone()),
            title: resource.title.clone(),
            category: resource.category.clone(),
            branch: resource.branch.clone().unwrap_or_default(),
            description: resource.description.clone().unwrap_or_default(),
            download_url: resource.download_url.clone().unwrap_or_default(),
        }
    }
}
