//! Courses and their lessons sub-collection.

pub mod lesson;
pub mod model;
pub mod status;

pub use lesson::{Lesson, LessonDraft};
pub use model::{Course, CourseDraft};
pub use status::CourseStatus;
