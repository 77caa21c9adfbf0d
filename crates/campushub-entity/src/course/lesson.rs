//! Lessons, stored in the `lessons` sub-collection of a course.

use serde::{Deserialize, Serialize};

use campushub_core::result::AppResult;
use campushub_core::traits::{Draft, Entity, RequiredField};
use campushub_core::types::{CollectionPath, DocumentId, FieldValue, OrderBy, WriteFields};

use super::model::Course;

/// Field lessons are sorted by.
pub const LESSON_ORDER_FIELD: &str = "order";

/// One video lesson of a course.
///
/// `order` is user-assigned and not unique; lessons sharing an order keep
/// the store's stable order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    /// Document id.
    pub id: DocumentId,
    /// Lesson title.
    pub title: String,
    /// Video link.
    pub youtube_url: Option<String>,
    /// Position in the course.
    pub order: i64,
}

impl Lesson {
    /// Path of the lessons sub-collection for a course.
    ///
    /// Blank course ids and ids containing `/` are rejected.
    pub fn collection_for(course_id: &DocumentId) -> AppResult<CollectionPath> {
        CollectionPath::root(Course::COLLECTION).child(course_id, Self::COLLECTION)
    }
}

impl Entity for Lesson {
    const COLLECTION: &'static str = "lessons";
    const TIMESTAMPED: bool = false;

    fn id(&self) -> &DocumentId {
        &self.id
    }

    fn order_by() -> OrderBy {
        OrderBy::asc(LESSON_ORDER_FIELD)
    }
}

/// Form draft for a lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonDraft {
    /// Id of the lesson being edited.
    pub id: Option<DocumentId>,
    /// Title (required).
    pub title: String,
    /// Video link.
    pub youtube_url: String,
    /// Position in the course.
    pub order: i64,
}

impl Default for LessonDraft {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            youtube_url: String::new(),
            order: 1,
        }
    }
}

impl Draft for LessonDraft {
    type Entity = Lesson;

    fn id(&self) -> Option<&DocumentId> {
        self.id.as_ref()
    }

    fn required_fields(&self) -> Vec<RequiredField<'_>> {
        vec![RequiredField::new("title", &self.title)]
    }

    fn to_fields(&self) -> WriteFields {
        WriteFields::from([
            ("title".to_string(), FieldValue::trimmed(&self.title)),
            ("youtubeUrl".to_string(), FieldValue::optional(&self.youtube_url)),
            (LESSON_ORDER_FIELD.to_string(), FieldValue::from(self.order)),
        ])
    }

    fn from_entity(lesson: &Lesson) -> Self {
        Self {
            id: Some(lesson.id.clone()),
            title: lesson.title.clone(),
            youtube_url: lesson.youtube_url.clone().unwrap_or_default(),
            order: lesson.order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_path() {
        let path = Lesson::collection_for(&DocumentId::new("c1")).unwrap();
        assert_eq!(path.to_string(), "courses/c1/lessons");
        assert!(Lesson::collection_for(&DocumentId::new("")).is_err());
        assert!(Lesson::collection_for(&DocumentId::new("c1/x")).is_err());
    }

    #[test]
    fn test_new_draft_starts_at_order_one() {
        assert_eq!(LessonDraft::default().order, 1);
    }
}
