//! # campushub-entity
//!
//! Typed records for every document CampusHub stores. Each struct mirrors
//! the wire shape field-for-field (camelCase names), makes required and
//! optional fields explicit, and comes with the form draft that writes it.

pub mod announcement;
pub mod course;
pub mod filterable;
pub mod note;
pub mod profile;
pub mod resource;
pub mod role;
pub mod syllabus;

pub use announcement::{Announcement, AnnouncementDraft, AnnouncementKind};
pub use course::{Course, CourseDraft, CourseStatus, Lesson, LessonDraft};
pub use filterable::Filterable;
pub use note::{Note, NoteDraft};
pub use profile::{Profile, ProfileDraft, ProfileSeed};
pub use resource::{Resource, ResourceDraft};
pub use role::{ADMIN_ROLE, Role};
pub use syllabus::{SyllabusDraft, SyllabusEntry};
