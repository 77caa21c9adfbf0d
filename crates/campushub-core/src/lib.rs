//! # campushub-core
//!
//! Core crate for CampusHub. Contains the document-store and auth-provider
//! traits, the `Entity`/`Draft` contracts every content type implements,
//! configuration schemas, document and snapshot types, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other CampusHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
