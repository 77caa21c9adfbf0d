//! Announcements shown on the announcements page.

pub mod kind;
pub mod model;

pub use kind::AnnouncementKind;
pub use model::{Announcement, AnnouncementDraft};
