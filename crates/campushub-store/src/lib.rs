//! # campushub-store
//!
//! Document store backends for CampusHub.
//!
//! - **memory**: an in-process store with ordered live queries, document
//!   watches, and server-timestamp resolution. Optionally writes its
//!   contents through to a JSON file so the CLI keeps state between runs.

pub mod memory;
pub mod persist;

pub use memory::MemoryDocumentStore;
