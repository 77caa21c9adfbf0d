//! Core type definitions used across the CampusHub workspace.

pub mod document;
pub mod filter;
pub mod id;
pub mod path;
pub mod session;
pub mod snapshot;
pub mod sorting;

pub use document::{
    CREATED_AT, Document, FieldValue, Fields, SetOptions, UPDATED_AT, WriteFields, timestamp_value,
};
pub use filter::FilterCriteria;
pub use id::{DocumentId, UserId};
pub use path::CollectionPath;
pub use session::{AuthMethod, AuthSession, AuthUser, OAuthCredential, Persistence};
pub use snapshot::{DocumentListener, DocumentSnapshot, QueryListener, QuerySnapshot, SnapshotListener};
pub use sorting::{OrderBy, SortDirection};
