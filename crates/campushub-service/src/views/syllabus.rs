//! The syllabus page: syllabus entries and study resources.

use std::sync::Arc;

use tracing::info;

use campushub_core::result::AppResult;
use campushub_core::traits::DocumentStore;
use campushub_core::types::FilterCriteria;
use campushub_entity::{Resource, SyllabusEntry};
use campushub_realtime::{SubscriptionManager, SubscriptionRegistry};

use crate::filter::filter;

/// Live syllabus entries and resources filtered by text and branch.
#[derive(Debug)]
pub struct SyllabusView {
    registry: Arc<SubscriptionRegistry>,
    syllabus: SubscriptionManager<SyllabusEntry>,
    resources: SubscriptionManager<Resource>,
    criteria: FilterCriteria,
}

impl SyllabusView {
    /// Subscribe to both collections.
    pub async fn open(store: Arc<dyn DocumentStore>) -> AppResult<Self> {
        let registry = Arc::new(SubscriptionRegistry::new());
        let mut syllabus = SubscriptionManager::with_registry(store.clone(), registry.clone());
        let mut resources = SubscriptionManager::with_registry(store, registry.clone());
        futures::try_join!(
            syllabus.subscribe_collection(),
            resources.subscribe_collection()
        )?;
        info!("Syllabus page opened");
        Ok(Self {
            registry,
            syllabus,
            resources,
            criteria: FilterCriteria::all(),
        })
    }

    /// Set the search text and branch. Category is not offered here.
    pub fn set_criteria(&mut self, text: impl Into<String>, branch: impl Into<String>) {
        self.criteria = FilterCriteria::all().text(text).branch(branch);
    }

    /// Matching syllabus entries.
    pub fn syllabus(&self) -> Vec<SyllabusEntry> {
        filter(&self.syllabus.items(), &self.criteria)
    }

    /// Matching resources. A resource without a branch only matches an
    /// empty branch filter.
    pub fn resources(&self) -> Vec<Resource> {
        filter(&self.resources.items(), &self.criteria)
    }

    /// Wait until both lists have loaded.
    pub async fn loaded(&self) -> AppResult<()> {
        futures::try_join!(self.syllabus.loaded(), self.resources.loaded())?;
        Ok(())
    }

    /// Wait until the unfiltered resource list has `count` items.
    pub async fn wait_for_resources(&self, count: usize) -> AppResult<()> {
        self.resources
            .wait_until(|s| !s.loading && s.items.len() == count)
            .await?;
        Ok(())
    }

    /// Wait until the unfiltered syllabus list has `count` items.
    pub async fn wait_for_syllabus(&self, count: usize) -> AppResult<()> {
        self.syllabus
            .wait_until(|s| !s.loading && s.items.len() == count)
            .await?;
        Ok(())
    }

    /// Release every subscription.
    pub fn dispose(&mut self) {
        self.syllabus.unsubscribe();
        self.resources.unsubscribe();
        self.registry.dispose_all();
    }
}

impl Drop for SyllabusView {
    fn drop(&mut self) {
        self.registry.dispose_all();
    }
}
