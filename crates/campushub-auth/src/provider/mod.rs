//! Auth provider implementations.

pub mod account;
pub mod memory;

pub use account::{Account, ResetEmail};
pub use memory::MemoryAuthProvider;
