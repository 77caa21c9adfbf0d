//! In-memory document store.

pub mod clock;
pub mod listeners;
pub mod state;
pub mod store;

pub use store::MemoryDocumentStore;
