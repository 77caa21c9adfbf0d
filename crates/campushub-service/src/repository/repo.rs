//! Generic repository over one collection.

use std::marker::PhantomData;
use std::sync::Arc;

use tracing::{debug, info};

use campushub_core::result::AppResult;
use campushub_core::traits::{DocumentStore, Draft, Entity};
use campushub_core::types::{
    CREATED_AT, CollectionPath, DocumentId, FieldValue, OrderBy, SetOptions, UPDATED_AT,
    WriteFields,
};
use campushub_realtime::decode::{decode_document, decode_documents};
use campushub_realtime::{SubscriptionManager, SubscriptionRegistry};

use super::outcome::UpsertOutcome;

/// CRUD for the entity a draft type writes.
///
/// Parameterized by collection path; ordering and required fields come
/// from the entity and draft types.
#[derive(Debug)]
pub struct EntityRepository<D: Draft> {
    store: Arc<dyn DocumentStore>,
    path: CollectionPath,
    _draft: PhantomData<fn() -> D>,
}

impl<D: Draft> Clone for EntityRepository<D> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            path: self.path.clone(),
            _draft: PhantomData,
        }
    }
}

impl<D: Draft> EntityRepository<D> {
    /// Repository over the entity's top-level collection.
    pub fn root(store: Arc<dyn DocumentStore>) -> Self {
        Self::scoped(store, CollectionPath::root(<D::Entity as Entity>::COLLECTION))
    }

    /// Repository over an explicit collection path, e.g. one course's lessons.
    pub fn scoped(store: Arc<dyn DocumentStore>, path: CollectionPath) -> Self {
        Self {
            store,
            path,
            _draft: PhantomData,
        }
    }

    /// Collection this repository writes.
    pub fn path(&self) -> &CollectionPath {
        &self.path
    }

    /// Validate the draft, then create or overwrite its document.
    ///
    /// A draft with blank required fields writes nothing. A draft without
    /// an id creates a document stamped with equal `createdAt` and
    /// `updatedAt`; a draft with an id overwrites that document's fields
    /// and advances `updatedAt` only.
    pub async fn upsert(&self, draft: &D) -> AppResult<UpsertOutcome> {
        let missing = draft.missing_fields();
        if !missing.is_empty() {
            debug!(collection = %self.path, ?missing, "Upsert rejected");
            return Ok(UpsertOutcome::Rejected { missing });
        }

        let mut fields = draft.to_fields();
        let timestamped = <D::Entity as Entity>::TIMESTAMPED;

        match draft.id().filter(|id| !id.is_blank()) {
            None => {
                if timestamped {
                    fields.insert(CREATED_AT.to_string(), FieldValue::ServerTimestamp);
                    fields.insert(UPDATED_AT.to_string(), FieldValue::ServerTimestamp);
                }
                let id = self.store.add(&self.path, fields).await?;
                info!(collection = %self.path, document_id = %id, "Document created");
                Ok(UpsertOutcome::Created(id))
            }
            Some(id) => {
                if timestamped {
                    fields.insert(UPDATED_AT.to_string(), FieldValue::ServerTimestamp);
                }
                self.store.update(&self.path, id, fields).await?;
                info!(collection = %self.path, document_id = %id, "Document updated");
                Ok(UpsertOutcome::Updated(id.clone()))
            }
        }
    }

    /// Merge fields into a document, creating it if absent.
    pub async fn merge(&self, id: &DocumentId, fields: WriteFields) -> AppResult<()> {
        self.store
            .set(&self.path, id, fields, SetOptions::merge())
            .await?;
        debug!(collection = %self.path, document_id = %id, "Document merged");
        Ok(())
    }

    /// Delete a document. Sub-collections are left in place.
    pub async fn delete(&self, id: &DocumentId) -> AppResult<()> {
        self.store.delete(&self.path, id).await?;
        info!(collection = %self.path, document_id = %id, "Document deleted");
        Ok(())
    }

    /// Read one record. Missing and undecodable documents are `None`.
    pub async fn get(&self, id: &DocumentId) -> AppResult<Option<D::Entity>> {
        Ok(self
            .store
            .get(&self.path, id)
            .await?
            .and_then(|doc| decode_document(&self.path, &doc)))
    }

    /// One-shot ordered read in the entity's default order.
    pub async fn list(&self) -> AppResult<Vec<D::Entity>> {
        self.list_ordered(&<D::Entity as Entity>::order_by()).await
    }

    /// One-shot read in an explicit order.
    pub async fn list_ordered(&self, order: &OrderBy) -> AppResult<Vec<D::Entity>> {
        let snapshot = self.store.query(&self.path, order).await?;
        Ok(decode_documents(&self.path, &snapshot.documents))
    }

    /// Open a live list of this collection, tracked in `registry`.
    pub async fn subscribe(
        &self,
        registry: Arc<SubscriptionRegistry>,
    ) -> AppResult<SubscriptionManager<D::Entity>> {
        let mut manager = SubscriptionManager::with_registry(self.store.clone(), registry);
        manager.subscribe(self.path.clone()).await?;
        Ok(manager)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campushub_entity::{Course, CourseDraft, CourseStatus, LessonDraft, Lesson};
    use campushub_store::MemoryDocumentStore;

    fn store() -> Arc<dyn DocumentStore> {
        Arc::new(MemoryDocumentStore::new())
    }

    fn signals() -> CourseDraft {
        CourseDraft {
            title: "  Signals ".into(),
            branch: "ECE".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_stamps_equal_timestamps() {
        let store = store();
        let repo = EntityRepository::<CourseDraft>::root(store.clone());
        let outcome = repo.upsert(&signals()).await.unwrap();
        let UpsertOutcome::Created(id) = outcome else {
            panic!("expected create, got {outcome:?}");
        };
        let doc = store.get(repo.path(), &id).await.unwrap().unwrap();
        assert_eq!(doc.get("title").unwrap(), "Signals");
        assert_eq!(doc.get(CREATED_AT), doc.get(UPDATED_AT));

        let course: Course = repo.get(&id).await.unwrap().unwrap();
        assert_eq!(course.status, CourseStatus::Published);
        assert_eq!(course.created_at, course.updated_at);
    }

    #[tokio::test]
    async fn test_update_advances_only_updated_at() {
        let store = store();
        let repo = EntityRepository::<CourseDraft>::root(store.clone());
        let id = repo.upsert(&signals()).await.unwrap().id().cloned().unwrap();
        let before = repo.get(&id).await.unwrap().unwrap();

        let mut draft = CourseDraft::from_entity(&before);
        draft.title = "Signals & Systems".into();
        assert_eq!(repo.upsert(&draft).await.unwrap(), UpsertOutcome::Updated(id.clone()));

        let after = repo.get(&id).await.unwrap().unwrap();
        assert_eq!(after.title, "Signals & Systems");
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at > before.updated_at);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_required_field_writes_nothing() {
        let store = store();
        let repo = EntityRepository::<CourseDraft>::root(store.clone());
        let draft = CourseDraft {
            title: "Signals".into(),
            branch: "   ".into(),
            ..Default::default()
        };
        assert_eq!(
            repo.upsert(&draft).await.unwrap(),
            UpsertOutcome::Rejected { missing: vec!["branch"] }
        );
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_of_deleted_document_is_error() {
        let store = store();
        let repo = EntityRepository::<CourseDraft>::root(store);
        let id = repo.upsert(&signals()).await.unwrap().id().cloned().unwrap();
        repo.delete(&id).await.unwrap();
        let draft = CourseDraft {
            id: Some(id),
            ..signals()
        };
        assert!(repo.upsert(&draft).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_lessons_have_no_timestamps() {
        let store = store();
        let repo = EntityRepository::<LessonDraft>::scoped(
            store.clone(),
            Lesson::collection_for(&DocumentId::new("c1")).unwrap(),
        );
        let draft = LessonDraft {
            title: "Intro".into(),
            ..Default::default()
        };
        let id = repo.upsert(&draft).await.unwrap().id().cloned().unwrap();
        let doc = store.get(repo.path(), &id).await.unwrap().unwrap();
        assert!(doc.get(CREATED_AT).is_none());
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }
}
