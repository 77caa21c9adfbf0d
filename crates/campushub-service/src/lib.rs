//! # campushub-service
//!
//! Application layer for CampusHub. Services take their collaborators
//! (document store, auth provider) as `Arc<dyn ...>` at construction time.
//!
//! - `repository`: generic upsert/delete/read per entity and the form
//!   state that drives it
//! - `filter`: client-side list filtering
//! - `role`: the admin gate
//! - `profile` and `auth`: account flows
//! - `course`: the course detail page
//! - `views`: explore, syllabus, and announcements pages

pub mod auth;
pub mod course;
pub mod feedback;
pub mod filter;
pub mod profile;
pub mod repository;
pub mod role;
pub mod view;
pub mod views;

pub use auth::{AuthService, ChangePasswordRequest, SignInRequest, SignUpRequest};
pub use course::{CourseDetail, to_embed_url};
pub use feedback::{Notice, NoticeLevel};
pub use filter::{PREVIEW_LIMIT, filter, matches, preview};
pub use profile::ProfileService;
pub use repository::{EntityRepository, FormMode, FormState, UpsertOutcome};
pub use role::AdminGate;
pub use view::ViewState;
pub use views::{AnnouncementsView, ExploreView, SyllabusView};
