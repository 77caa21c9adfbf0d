//! Edit buffer behind an entity form.

use tracing::debug;

use campushub_core::result::AppResult;
use campushub_core::traits::Draft;
use campushub_core::types::DocumentId;

use super::outcome::UpsertOutcome;
use super::repo::EntityRepository;

/// Whether the form creates or edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    /// Empty draft; submit creates.
    Create,
    /// Draft pre-filled from an existing record; submit overwrites it.
    Edit(DocumentId),
}

/// Local, uncommitted form state for one entity.
#[derive(Debug, Clone, Default)]
pub struct FormState<D: Draft> {
    draft: D,
}

impl<D: Draft> FormState<D> {
    /// An empty form in create mode.
    pub fn new() -> Self {
        Self { draft: D::default() }
    }

    /// Switch to editing an existing record.
    pub fn edit(&mut self, entity: &D::Entity) {
        self.draft = D::from_entity(entity);
    }

    /// Discard the draft and return to create mode.
    pub fn reset(&mut self) {
        self.draft = D::default();
    }

    /// Current mode.
    pub fn mode(&self) -> FormMode {
        match self.draft.id().filter(|id| !id.is_blank()) {
            Some(id) => FormMode::Edit(id.clone()),
            None => FormMode::Create,
        }
    }

    /// The draft.
    pub fn draft(&self) -> &D {
        &self.draft
    }

    /// The draft, for editing fields.
    pub fn draft_mut(&mut self) -> &mut D {
        &mut self.draft
    }

    /// Upsert the draft. On a write the form resets to create mode; on
    /// rejection or error the draft is kept for correction.
    pub async fn submit(&mut self, repo: &EntityRepository<D>) -> AppResult<UpsertOutcome> {
        let outcome = repo.upsert(&self.draft).await?;
        if outcome.is_written() {
            self.reset();
            debug!(collection = %repo.path(), "Form reset after submit");
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use campushub_entity::NoteDraft;
    use campushub_store::MemoryDocumentStore;

    #[tokio::test]
    async fn test_create_edit_cycle() {
        let repo = EntityRepository::<NoteDraft>::root(Arc::new(MemoryDocumentStore::new()));
        let mut form = FormState::<NoteDraft>::new();
        assert_eq!(form.mode(), FormMode::Create);

        form.draft_mut().title = "Network Theory".into();
        let outcome = form.submit(&repo).await.unwrap();
        assert_eq!(outcome, UpsertOutcome::Rejected { missing: vec!["tag"] });
        assert_eq!(form.draft().title, "Network Theory");

        form.draft_mut().tag = "ECE".into();
        let id = form.submit(&repo).await.unwrap().id().cloned().unwrap();
        assert_eq!(form.draft(), &NoteDraft::default());

        let note = repo.get(&id).await.unwrap().unwrap();
        form.edit(&note);
        assert_eq!(form.mode(), FormMode::Edit(id.clone()));
        form.draft_mut().category = "PYQ".into();
        assert_eq!(form.submit(&repo).await.unwrap(), UpsertOutcome::Updated(id.clone()));
        assert_eq!(form.mode(), FormMode::Create);
        assert_eq!(
            repo.get(&id).await.unwrap().unwrap().category.as_deref(),
            Some("PYQ")
        );
    }
}
