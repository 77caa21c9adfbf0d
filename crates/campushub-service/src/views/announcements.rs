//! The announcements page.

use std::sync::Arc;

use tracing::info;

use campushub_core::result::AppResult;
use campushub_core::traits::DocumentStore;
use campushub_entity::{Announcement, AnnouncementKind};
use campushub_realtime::{ListState, SubscriptionManager, SubscriptionRegistry};

/// Live announcements, newest first.
#[derive(Debug)]
pub struct AnnouncementsView {
    registry: Arc<SubscriptionRegistry>,
    announcements: SubscriptionManager<Announcement>,
}

impl AnnouncementsView {
    /// Subscribe to announcements.
    pub async fn open(store: Arc<dyn DocumentStore>) -> AppResult<Self> {
        let registry = Arc::new(SubscriptionRegistry::new());
        let mut announcements = SubscriptionManager::with_registry(store, registry.clone());
        announcements.subscribe_collection().await?;
        info!("Announcements page opened");
        Ok(Self {
            registry,
            announcements,
        })
    }

    /// All announcements.
    pub fn items(&self) -> Vec<Announcement> {
        self.announcements.items()
    }

    /// Announcements of one kind.
    pub fn of_kind(&self, kind: AnnouncementKind) -> Vec<Announcement> {
        self.items().into_iter().filter(|a| a.kind == kind).collect()
    }

    /// Wait until the list satisfies `pred`.
    pub async fn wait_until(
        &self,
        pred: impl FnMut(&ListState<Announcement>) -> bool,
    ) -> AppResult<ListState<Announcement>> {
        self.announcements.wait_until(pred).await
    }

    /// Release every subscription.
    pub fn dispose(&mut self) {
        self.announcements.unsubscribe();
        self.registry.dispose_all();
    }
}

impl Drop for AnnouncementsView {
    fn drop(&mut self) {
        self.registry.dispose_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campushub_entity::AnnouncementDraft;
    use campushub_store::MemoryDocumentStore;

    use crate::repository::EntityRepository;

    #[tokio::test]
    async fn test_newest_first_and_frozen_after_dispose() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        let repo = EntityRepository::<AnnouncementDraft>::root(store.clone());
        let mut view = AnnouncementsView::open(store).await.unwrap();

        for (title, kind) in [
            ("Exams moved", AnnouncementKind::Alert),
            ("Library hours", AnnouncementKind::Info),
        ] {
            repo.upsert(&AnnouncementDraft {
                title: title.into(),
                message: "See notice board".into(),
                kind,
                ..Default::default()
            })
            .await
            .unwrap();
        }
        let state = view.wait_until(|s| s.items.len() == 2).await.unwrap();
        assert_eq!(state.items[0].title, "Library hours");
        assert_eq!(view.of_kind(AnnouncementKind::Alert).len(), 1);

        view.dispose();
        repo.upsert(&AnnouncementDraft {
            title: "Holiday".into(),
            message: "Campus closed".into(),
            ..Default::default()
        })
        .await
        .unwrap();
        tokio::task::yield_now().await;
        assert_eq!(view.items().len(), 2);
    }
}
