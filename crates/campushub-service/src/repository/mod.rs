//! Per-entity CRUD and form state.

pub mod form;
pub mod outcome;
pub mod repo;

pub use form::{FormMode, FormState};
pub use outcome::UpsertOutcome;
pub use repo::EntityRepository;
