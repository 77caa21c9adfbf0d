//! # campushub-realtime
//!
//! Live subscriptions over the document store. Provides:
//!
//! - [`SubscriptionManager`]: an ordered, typed list kept in sync with a
//!   collection
//! - [`ScopedSubscription`]: a list under a selectable parent document
//!   (lessons of the selected course)
//! - [`DocumentWatch`]: a single typed document
//! - [`SubscriptionRegistry`]: the dispose-list a view releases on teardown

pub mod decode;
pub mod document;
pub mod handle;
pub mod list;
pub mod registry;
pub mod scoped;

pub use document::{DocState, DocumentWatch};
pub use handle::{SubscriptionHandle, SubscriptionId};
pub use list::{ListState, SubscriptionManager};
pub use registry::SubscriptionRegistry;
pub use scoped::ScopedSubscription;
