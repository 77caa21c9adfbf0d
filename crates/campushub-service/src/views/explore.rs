//! The explore page: course and note teasers with one search box.

use std::sync::Arc;

use tracing::{debug, info};

use campushub_core::result::AppResult;
use campushub_core::traits::DocumentStore;
use campushub_core::types::FilterCriteria;
use campushub_entity::{Course, CourseStatus, Note};
use campushub_realtime::{SubscriptionManager, SubscriptionRegistry};

use crate::filter::{PREVIEW_LIMIT, filter, preview};

/// Live courses and notes, newest first.
#[derive(Debug)]
pub struct ExploreView {
    registry: Arc<SubscriptionRegistry>,
    courses: SubscriptionManager<Course>,
    notes: SubscriptionManager<Note>,
    criteria: FilterCriteria,
}

impl ExploreView {
    /// Subscribe to courses and notes.
    pub async fn open(store: Arc<dyn DocumentStore>) -> AppResult<Self> {
        let registry = Arc::new(SubscriptionRegistry::new());
        let mut courses = SubscriptionManager::with_registry(store.clone(), registry.clone());
        let mut notes = SubscriptionManager::with_registry(store, registry.clone());
        futures::try_join!(courses.subscribe_collection(), notes.subscribe_collection())?;
        info!(subscriptions = registry.active_count(), "Explore page opened");
        Ok(Self {
            registry,
            courses,
            notes,
            criteria: FilterCriteria::all(),
        })
    }

    /// Replace the search box and branch dropdown values.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        debug!(text = %criteria.text, branch = %criteria.branch, "Explore filter changed");
        self.criteria = criteria;
    }

    /// Current filter.
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Published courses matching text and branch.
    pub fn courses(&self) -> Vec<Course> {
        let published: Vec<Course> = self
            .courses
            .items()
            .into_iter()
            .filter(|c| c.status != CourseStatus::Draft)
            .collect();
        let criteria = FilterCriteria {
            category: String::new(),
            ..self.criteria.clone()
        };
        filter(&published, &criteria)
    }

    /// Notes matching the text query. The branch dropdown does not apply.
    pub fn notes(&self) -> Vec<Note> {
        filter(&self.notes.items(), &self.criteria.text_only())
    }

    /// Course teaser section.
    pub fn course_preview(&self) -> Vec<Course> {
        preview(&self.courses(), PREVIEW_LIMIT)
    }

    /// Note teaser section.
    pub fn note_preview(&self) -> Vec<Note> {
        preview(&self.notes(), PREVIEW_LIMIT)
    }

    /// Whether either list is still waiting for its first snapshot.
    pub fn is_loading(&self) -> bool {
        self.courses.is_loading() || self.notes.is_loading()
    }

    /// Wait until both lists have loaded.
    pub async fn loaded(&self) -> AppResult<()> {
        futures::try_join!(self.courses.loaded(), self.notes.loaded())?;
        Ok(())
    }

    /// Wait until the unfiltered course list satisfies `pred`.
    pub async fn wait_for_courses(&self, pred: impl FnMut(&[Course]) -> bool) -> AppResult<()> {
        let mut pred = pred;
        self.courses.wait_until(|s| !s.loading && pred(s.items.as_slice())).await?;
        Ok(())
    }

    /// Wait until the unfiltered note list satisfies `pred`.
    pub async fn wait_for_notes(&self, pred: impl FnMut(&[Note]) -> bool) -> AppResult<()> {
        let mut pred = pred;
        self.notes.wait_until(|s| !s.loading && pred(s.items.as_slice())).await?;
        Ok(())
    }

    /// Number of live subscriptions.
    pub fn active_subscriptions(&self) -> usize {
        self.registry.active_count()
    }

    /// Release every subscription.
    pub fn dispose(&mut self) {
        self.courses.unsubscribe();
        self.notes.unsubscribe();
        self.registry.dispose_all();
    }
}

impl Drop for ExploreView {
    fn drop(&mut self) {
        self.registry.dispose_all();
    }
}
