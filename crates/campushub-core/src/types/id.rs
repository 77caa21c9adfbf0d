//! Newtype wrappers around the string identifiers used by the document store
//! and the auth provider.
//!
//! Document ids are opaque strings assigned by the store; user ids are the
//! auth provider's uid, which doubles as the document id for `profiles` and
//! `roles`. Keeping them distinct prevents passing a course id where a uid is
//! expected.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of generated document ids, matching the hosted store's auto ids.
const GENERATED_ID_LEN: usize = 20;

macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier string.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }

            /// Whether the identifier is empty or whitespace only.
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifier of a document within its collection.
    DocumentId
);

define_id!(
    /// Identifier of an authenticated user (the provider uid).
    UserId
);

impl DocumentId {
    /// Generate a fresh random document id.
    pub fn generate() -> Self {
        let raw = Uuid::new_v4().simple().to_string();
        Self(raw[..GENERATED_ID_LEN].to_string())
    }
}

impl From<UserId> for DocumentId {
    fn from(uid: UserId) -> Self {
        Self(uid.0)
    }
}

impl From<&UserId> for DocumentId {
    fn from(uid: &UserId) -> Self {
        Self(uid.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = DocumentId::generate();
        let b = DocumentId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), GENERATED_ID_LEN);
    }

    #[test]
    fn test_blank_detection() {
        assert!(DocumentId::new("  ").is_blank());
        assert!(DocumentId::default().is_blank());
        assert!(!DocumentId::new("abc").is_blank());
    }

    #[test]
    fn test_serde_transparent() {
        let uid = UserId::new("uid-123");
        assert_eq!(serde_json::to_string(&uid).unwrap(), "\"uid-123\"");
        let doc: DocumentId = uid.into();
        assert_eq!(doc.as_str(), "uid-123");
    }
}
