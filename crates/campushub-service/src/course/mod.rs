//! The course detail page: one course, its lessons, and the player.

pub mod detail;
pub mod youtube;

pub use detail::CourseDetail;
pub use youtube::to_embed_url;
