//! Announcement entity model and form draft.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campushub_core::traits::{Draft, Entity, RequiredField};
use campushub_core::types::{DocumentId, FieldValue, WriteFields};

use super::kind::AnnouncementKind;
use crate::filterable::Filterable;

/// A dated announcement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    /// Document id.
    pub id: DocumentId,
    /// Headline.
    pub title: String,
    /// Body text.
    #[serde(default)]
    pub message: String,
    /// Visual type.
    #[serde(rename = "type", default)]
    pub kind: AnnouncementKind,
    /// Free-text display date.
    pub date: Option<String>,
    /// Server creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Server update time.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Announcement {
    const COLLECTION: &'static str = "announcements";

    fn id(&self) -> &DocumentId {
        &self.id
    }
}

impl Filterable for Announcement {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> Option<&str> {
        Some(&self.message)
    }

    fn category(&self) -> Option<&str> {
        Some(self.kind.as_str())
    }
}

/// Form draft for an announcement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementDraft {
    /// Id of the announcement being edited.
    pub id: Option<DocumentId>,
    /// Headline (required).
    pub title: String,
    /// Body (required).
    pub message: String,
    /// Visual type.
    pub kind: AnnouncementKind,
    /// Display date.
    pub date: String,
}

impl Draft for AnnouncementDraft {
    type Entity = Announcement;

    fn id(&self) -> Option<&DocumentId> {
        self.id.as_ref()
    }

    fn required_fields(&self) -> Vec<RequiredField<'_>> {
        vec![
            RequiredField::new("title", &self.title),
            RequiredField::new("message", &self.message),
        ]
    }

    fn to_fields(&self) -> WriteFields {
        WriteFields::from([
            ("title".to_string(), FieldValue::trimmed(&self.title)),
            ("message".to_string(), FieldValue::trimmed(&self.message)),
            ("type".to_string(), FieldValue::from(self.kind.as_str())),
            ("date".to_string(), FieldValue::optional(&self.date)),
        ])
    }

    fn from_entity(announcement: &Announcement) -> Self {
        Self {
            id: Some(announcement.id.clone()),
            title: announcement.title.clone(),
            message: announcement.message.clone(),
            kind: announcement.kind,
            date: announcement.date.clone().unwrap_or_default(),
        }
    }
}
