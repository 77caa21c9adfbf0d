//! Live course page with its ordered lessons.

use std::sync::Arc;

use tracing::{debug, info};

use campushub_core::result::AppResult;
use campushub_core::traits::{DocumentStore, Entity};
use campushub_core::types::{CollectionPath, DocumentId};
use campushub_entity::{Course, Lesson, LessonDraft};
use campushub_realtime::{DocumentWatch, ListState, SubscriptionManager, SubscriptionRegistry};

use super::youtube::to_embed_url;
use crate::repository::EntityRepository;
use crate::view::ViewState;

/// One open course page.
///
/// The course document and its `lessons` sub-collection are watched under
/// one registry, so closing the page releases both.
#[derive(Debug)]
pub struct CourseDetail {
    course_id: DocumentId,
    registry: Arc<SubscriptionRegistry>,
    course: DocumentWatch<Course>,
    lessons: SubscriptionManager<Lesson>,
    lesson_repo: EntityRepository<LessonDraft>,
    selected: Option<DocumentId>,
}

impl CourseDetail {
    /// Open the page for `course_id`.
    pub async fn open(store: Arc<dyn DocumentStore>, course_id: DocumentId) -> AppResult<Self> {
        let registry = Arc::new(SubscriptionRegistry::new());
        let course = DocumentWatch::open(
            &store,
            registry.clone(),
            CollectionPath::root(Course::COLLECTION),
            course_id.clone(),
        )
        .await?;

        let lessons_path = Lesson::collection_for(&course_id)?;
        let mut lessons = SubscriptionManager::with_registry(store.clone(), registry.clone());
        lessons.subscribe(lessons_path.clone()).await?;

        info!(course_id = %course_id, "Course page opened");
        Ok(Self {
            course_id,
            registry,
            course,
            lessons,
            lesson_repo: EntityRepository::scoped(store, lessons_path),
            selected: None,
        })
    }

    /// Id of the course shown.
    pub fn course_id(&self) -> &DocumentId {
        &self.course_id
    }

    /// The course record.
    pub fn course_state(&self) -> ViewState<Course> {
        self.course.state().into()
    }

    /// Wait for the first course snapshot.
    pub async fn course_loaded(&self) -> AppResult<ViewState<Course>> {
        Ok(self.course.settled().await?.into())
    }

    /// Lessons in ascending `order`.
    pub fn lessons(&self) -> Vec<Lesson> {
        self.lessons.items()
    }

    /// Lesson list with its loading flag.
    pub fn lesson_state(&self) -> ListState<Lesson> {
        self.lessons.state()
    }

    /// Wait for the first lessons snapshot.
    pub async fn lessons_loaded(&self) -> AppResult<ListState<Lesson>> {
        self.lessons.loaded().await
    }

    /// Wait until the lesson list satisfies `pred`.
    pub async fn wait_for_lessons(
        &self,
        pred: impl FnMut(&ListState<Lesson>) -> bool,
    ) -> AppResult<ListState<Lesson>> {
        self.lessons.wait_until(pred).await
    }

    /// Repository for this course's lessons.
    pub fn lesson_repo(&self) -> &EntityRepository<LessonDraft> {
        &self.lesson_repo
    }

    /// Play a lesson. `None` goes back to the default.
    pub fn select_lesson(&mut self, lesson_id: Option<DocumentId>) {
        debug!(course_id = %self.course_id, lesson_id = ?lesson_id, "Lesson selected");
        self.selected = lesson_id;
    }

    /// The lesson being played: the selected one while it exists, else the
    /// first lesson.
    pub fn selected_lesson(&self) -> Option<Lesson> {
        let lessons = self.lessons.items();
        self.selected
            .as_ref()
            .and_then(|id| lessons.iter().find(|l| &l.id == id).cloned())
            .or_else(|| lessons.into_iter().next())
    }

    /// Raw video link of the selected lesson, falling back to the course's
    /// own link.
    pub fn video_url(&self) -> Option<String> {
        let from_lesson = self
            .selected_lesson()
            .and_then(|l| l.youtube_url)
            .filter(|url| !url.trim().is_empty());
        from_lesson.or_else(|| {
            self.course_state()
                .ready()
                .and_then(|c| c.youtube_url.clone())
                .filter(|url| !url.trim().is_empty())
        })
    }

    /// Embeddable player URL, if there is any video.
    pub fn embed_url(&self) -> Option<String> {
        self.video_url().as_deref().and_then(to_embed_url)
    }

    /// Number of live subscriptions held by the page.
    pub fn active_subscriptions(&self) -> usize {
        self.registry.active_count()
    }

    /// Release every subscription of the page.
    pub fn close(&mut self) {
        self.course.close();
        self.lessons.unsubscribe();
        self.registry.dispose_all();
        debug!(course_id = %self.course_id, "Course page closed");
    }
}

impl Drop for CourseDetail {
    fn drop(&mut self) {
        self.registry.dispose_all();
    }
}
