//! Role documents keyed by user id.

use serde::{Deserialize, Serialize};

use campushub_core::traits::Entity;
use campushub_core::types::DocumentId;

/// The only role value with meaning.
pub const ADMIN_ROLE: &str = "admin";

/// A user's role marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// The user id.
    pub id: DocumentId,
    /// Role name.
    #[serde(default)]
    pub role: String,
}

impl Role {
    /// Whether this marks an administrator.
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

impl Entity for Role {
    const COLLECTION: &'static str = "roles";
    const TIMESTAMPED: bool = false;

    fn id(&self) -> &DocumentId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_exact_admin_counts() {
        let role = |r: &str| Role {
            id: DocumentId::new("uid-123"),
            role: r.to_string(),
        };
        assert!(role("admin").is_admin());
        assert!(!role("Admin").is_admin());
        assert!(!role("editor").is_admin());
    }
}
