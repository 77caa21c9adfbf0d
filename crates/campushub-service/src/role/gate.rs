//! Cached "is this user an admin" lookups.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, info};

use campushub_core::config::RolesConfig;
use campushub_core::result::AppResult;
use campushub_core::traits::{DocumentStore, Entity};
use campushub_core::types::{
    CollectionPath, DocumentId, FieldValue, OrderBy, SetOptions, UserId, WriteFields,
};
use campushub_entity::{ADMIN_ROLE, Role};
use campushub_realtime::decode::{decode_document, decode_documents};

/// Advisory admin check for UI gating.
///
/// Reads the user's role document once and caches the answer until a
/// grant or revoke through this gate invalidates it.
#[derive(Debug, Clone)]
pub struct AdminGate {
    store: Arc<dyn DocumentStore>,
    cache: Cache<UserId, bool>,
    path: CollectionPath,
}

impl AdminGate {
    /// Create a gate over the `roles` collection.
    pub fn new(store: Arc<dyn DocumentStore>, config: &RolesConfig) -> Self {
        let mut builder = Cache::builder().max_capacity(config.cache_capacity);
        if config.cache_ttl_seconds > 0 {
            builder = builder.time_to_live(Duration::from_secs(config.cache_ttl_seconds));
        }
        Self {
            store,
            cache: builder.build(),
            path: CollectionPath::root(Role::COLLECTION),
        }
    }

    /// Whether the user's role document says `admin`. A missing document
    /// or any other value is `false`.
    pub async fn is_admin(&self, uid: &UserId) -> AppResult<bool> {
        if let Some(cached) = self.cache.get(uid).await {
            return Ok(cached);
        }
        let doc_id = DocumentId::from(uid);
        let is_admin = self
            .store
            .get(&self.path, &doc_id)
            .await?
            .and_then(|doc| decode_document::<Role>(&self.path, &doc))
            .is_some_and(|role| role.is_admin());
        self.cache.insert(uid.clone(), is_admin).await;
        debug!(user_id = %uid, is_admin, "Role resolved");
        Ok(is_admin)
    }

    /// Make the user an admin.
    pub async fn grant_admin(&self, uid: &UserId) -> AppResult<()> {
        let fields = WriteFields::from([("role".to_string(), FieldValue::from(ADMIN_ROLE))]);
        self.store
            .set(&self.path, &DocumentId::from(uid), fields, SetOptions::overwrite())
            .await?;
        self.cache.invalidate(uid).await;
        info!(user_id = %uid, "Admin role granted");
        Ok(())
    }

    /// Remove the user's role document.
    pub async fn revoke_admin(&self, uid: &UserId) -> AppResult<()> {
        self.store.delete(&self.path, &DocumentId::from(uid)).await?;
        self.cache.invalidate(uid).await;
        info!(user_id = %uid, "Admin role revoked");
        Ok(())
    }

    /// All role documents marking an admin.
    pub async fn list_admins(&self) -> AppResult<Vec<Role>> {
        let snapshot = self.store.query(&self.path, &OrderBy::asc("role")).await?;
        Ok(decode_documents::<Role>(&self.path, &snapshot.documents)
            .into_iter()
            .filter(Role::is_admin)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campushub_store::MemoryDocumentStore;

    fn gate() -> (AdminGate, Arc<dyn DocumentStore>) {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        (AdminGate::new(store.clone(), &RolesConfig::default()), store)
    }

    #[tokio::test]
    async fn test_grant_then_check() {
        let (gate, _) = gate();
        let admin = UserId::new("uid-123");
        assert!(!gate.is_admin(&admin).await.unwrap());
        gate.grant_admin(&admin).await.unwrap();
        assert!(gate.is_admin(&admin).await.unwrap());
        assert!(!gate.is_admin(&UserId::new("uid-456")).await.unwrap());
        assert_eq!(gate.list_admins().await.unwrap().len(), 1);

        gate.revoke_admin(&admin).await.unwrap();
        assert!(!gate.is_admin(&admin).await.unwrap());
    }

    #[tokio::test]
    async fn test_other_role_values_are_not_admin() {
        let (gate, store) = gate();
        let uid = UserId::new("uid-789");
        store
            .set(
                &CollectionPath::root("roles"),
                &DocumentId::from(&uid),
                WriteFields::from([("role".to_string(), FieldValue::from("Admin"))]),
                SetOptions::overwrite(),
            )
            .await
            .unwrap();
        assert!(!gate.is_admin(&uid).await.unwrap());
    }

    #[tokio::test]
    async fn test_answer_is_cached_per_user() {
        let (gate, store) = gate();
        let uid = UserId::new("uid-123");
        assert!(!gate.is_admin(&uid).await.unwrap());
        // Written behind the gate's back: the cached answer stands.
        store
            .set(
                &CollectionPath::root("roles"),
                &DocumentId::from(&uid),
                WriteFields::from([("role".to_string(), FieldValue::from(ADMIN_ROLE))]),
                SetOptions::overwrite(),
            )
            .await
            .unwrap();
        assert!(!gate.is_admin(&uid).await.unwrap());
    }
}
