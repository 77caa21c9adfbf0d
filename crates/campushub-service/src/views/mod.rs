//! Read pages. Each owns its subscriptions through one registry and
//! releases them on teardown.

pub mod announcements;
pub mod explore;
pub mod syllabus;

pub use announcements::AnnouncementsView;
pub use explore::ExploreView;
pub use syllabus::SyllabusView;
