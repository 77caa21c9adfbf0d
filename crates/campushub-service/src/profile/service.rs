//! Profile creation, editing, and loading.

use std::sync::Arc;

use tracing::{debug, info};

use campushub_core::result::AppResult;
use campushub_core::traits::{AuthProvider, DocumentStore, Draft};
use campushub_core::types::{CREATED_AT, DocumentId, FieldValue, UPDATED_AT, UserId};
use campushub_entity::{Profile, ProfileDraft, ProfileSeed};
use campushub_realtime::{DocumentWatch, SubscriptionRegistry};

use crate::repository::EntityRepository;
use crate::view::ViewState;

/// Reads and writes `profiles/{uid}`.
#[derive(Debug, Clone)]
pub struct ProfileService {
    store: Arc<dyn DocumentStore>,
    auth: Arc<dyn AuthProvider>,
    repo: EntityRepository<ProfileDraft>,
}

impl ProfileService {
    /// Create a profile service.
    pub fn new(store: Arc<dyn DocumentStore>, auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            repo: EntityRepository::root(store.clone()),
            store,
            auth,
        }
    }

    /// Create the profile if it does not exist yet. Returns whether it was
    /// created.
    pub async fn ensure_profile(&self, uid: &UserId, seed: &ProfileSeed) -> AppResult<bool> {
        let id = DocumentId::from(uid);
        if self.store.get(self.repo.path(), &id).await?.is_some() {
            debug!(user_id = %uid, "Profile already exists");
            return Ok(false);
        }
        self.write_seed(&id, seed).await?;
        info!(user_id = %uid, "Profile created");
        Ok(true)
    }

    /// Write the sign-up profile, merging into anything already there.
    pub async fn create_profile(&self, uid: &UserId, seed: &ProfileSeed) -> AppResult<()> {
        self.write_seed(&DocumentId::from(uid), seed).await?;
        info!(user_id = %uid, "Sign-up profile written");
        Ok(())
    }

    async fn write_seed(&self, id: &DocumentId, seed: &ProfileSeed) -> AppResult<()> {
        let mut fields = seed.to_fields();
        fields.insert(CREATED_AT.to_string(), FieldValue::ServerTimestamp);
        fields.insert(UPDATED_AT.to_string(), FieldValue::ServerTimestamp);
        self.repo.merge(id, fields).await
    }

    /// Merge the edited fields and update the provider display name.
    pub async fn save_profile(&self, uid: &UserId, draft: &ProfileDraft) -> AppResult<()> {
        self.repo.merge(&DocumentId::from(uid), draft.to_fields()).await?;
        let name = draft.name.trim();
        if !name.is_empty() {
            self.auth.update_display_name(name).await?;
        }
        info!(user_id = %uid, "Profile saved");
        Ok(())
    }

    /// One-shot load for the profile page.
    pub async fn load(&self, uid: &UserId) -> AppResult<ViewState<Profile>> {
        Ok(ViewState::from_option(
            self.repo.get(&DocumentId::from(uid)).await?,
        ))
    }

    /// Live view of the profile.
    pub async fn watch(
        &self,
        uid: &UserId,
        registry: Arc<SubscriptionRegistry>,
    ) -> AppResult<DocumentWatch<Profile>> {
        DocumentWatch::open(
            &self.store,
            registry,
            self.repo.path().clone(),
            DocumentId::from(uid),
        )
        .await
    }
}
