//! Course entity model and form draft.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campushub_core::traits::{Draft, Entity, RequiredField};
use campushub_core::types::{DocumentId, FieldValue, WriteFields};

use super::status::CourseStatus;
use crate::filterable::Filterable;

/// A course shown on the explore page and the course detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Document id.
    pub id: DocumentId,
    /// Course title.
    pub title: String,
    /// Free-text branch tag (ECE, EE, ...).
    #[serde(default)]
    pub branch: String,
    /// Longer description.
    pub description: Option<String>,
    /// Intro video link.
    pub youtube_url: Option<String>,
    /// Publication status.
    #[serde(default)]
    pub status: CourseStatus,
    /// Server creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Server update time.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Course {
    const COLLECTION: &'static str = "courses";

    fn id(&self) -> &DocumentId {
        &self.id
    }
}

impl Filterable for Course {
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

/// Form draft for creating or editing a course.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDraft {
    /// Id of the course being edited; `None` creates a new one.
    pub id: Option<DocumentId>,
    /// Title (required).
    pub title: String,
    /// Branch (required).
    pub branch: String,
    /// Description.
    pub description: String,
    /// Intro video link.
    pub youtube_url: String,
    /// Publication status.
    pub status: CourseStatus,
}

impl Draft for CourseDraft {
    type Entity = Course;

    fn id(&self) -> Option<&DocumentId> {
        self.id.as_ref()
    }

    fn required_fields(&self) -> Vec<RequiredField<'_>> {
        vec![
            RequiredField::new("title", &self.title),
            RequiredField::new("branch", &self.branch),
        ]
    }

    fn to_fields(&self) -> WriteFields {
        WriteFields::from([
            ("title".to_string(), FieldValue::trimmed(&self.title)),
            ("branch".to_string(), FieldValue::trimmed(&self.branch)),
            ("description".to_string(), FieldValue::optional(&self.description)),
            ("youtubeUrl".to_string(), FieldValue::optional(&self.youtube_url)),
            ("status".to_string(), FieldValue::from(self.status.as_str())),
        ])
    }

    fn from_entity(course: &Course) -> Self {
        Self {
            id: Some(course.id.clone()),
            title: course.title.clone(),
            branch: course.branch.clone(),
            description: course.description.clone().unwrap_or_default(),
            youtube_url: course.youtube_url.clone().unwrap_or_default(),
            status: course.status,
        }
    }
}
