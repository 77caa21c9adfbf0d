//! Owned session state for views.

pub mod store;

pub use store::{SessionSnapshot, SessionStore};
