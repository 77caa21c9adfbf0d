//! Core traits defined in `campushub-core` and implemented by other crates.

pub mod auth;
pub mod entity;
pub mod store;

pub use auth::AuthProvider;
pub use entity::{Draft, Entity, RequiredField};
pub use store::DocumentStore;
