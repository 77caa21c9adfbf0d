//! Scenario tests for subscription lifecycles and page teardown.

mod helpers;

use std::time::Duration;

use campushub_core::traits::{DocumentStore, Entity};
use campushub_core::types::{CollectionPath, DocumentId};
use campushub_entity::{Course, CourseDraft, Lesson, LessonDraft};
use campushub_realtime::{ScopedSubscription, SubscriptionRegistry};
use campushub_service::{CourseDetail, EntityRepository, ExploreView};

async fn course_with_lesson(app: &helpers::TestApp, title: &str) -> DocumentId {
    let courses = EntityRepository::<CourseDraft>::root(app.documents());
    let id = courses
        .upsert(&CourseDraft {
            title: title.into(),
            branch: "ECE".into(),
            ..Default::default()
        })
        .await
        .unwrap()
        .id()
        .cloned()
        .unwrap();
    EntityRepository::<LessonDraft>::scoped(app.documents(), Lesson::collection_for(&id).unwrap())
        .upsert(&LessonDraft {
            title: format!("{title} lesson"),
            ..Default::default()
        })
        .await
        .unwrap();
    id
}

#[tokio::test]
async fn test_rescoping_keeps_one_listener() {
    let app = helpers::TestApp::new();
    let mut ids = Vec::new();
    for title in ["Signals", "Machines", "Compilers"] {
        ids.push(course_with_lesson(&app, title).await);
    }

    let registry = std::sync::Arc::new(SubscriptionRegistry::new());
    let mut lessons = ScopedSubscription::<Lesson>::with_registry(
        app.documents(),
        CollectionPath::root(Course::COLLECTION),
        registry.clone(),
    );

    for round in 0..5 {
        let id = ids[round % ids.len()].clone();
        lessons.select(Some(id)).await.unwrap();
    }
    let state = lessons
        .wait_until(|s| !s.loading && s.items.len() == 1)
        .await
        .unwrap();
    assert_eq!(state.items[0].title, "Machines lesson");
    assert_eq!(registry.active_count(), 1);
    app.wait_for_listeners(1).await;

    lessons.select(None).await.unwrap();
    assert!(lessons.items().is_empty());
    app.wait_for_listeners(0).await;

    lessons.select(Some(ids[0].clone())).await.unwrap();
    app.wait_for_listeners(1).await;
    drop(lessons);
    app.wait_for_listeners(0).await;
}

#[tokio::test]
async fn test_stale_scope_never_reaches_new_list() {
    let app = helpers::TestApp::new();
    let first = course_with_lesson(&app, "Signals").await;
    let second = course_with_lesson(&app, "Machines").await;

    let mut lessons = ScopedSubscription::<Lesson>::new(
        app.documents(),
        CollectionPath::root(Course::COLLECTION),
    );
    lessons.select(Some(first.clone())).await.unwrap();
    lessons.loaded().await.unwrap();
    lessons.select(Some(second)).await.unwrap();
    lessons.loaded().await.unwrap();

    EntityRepository::<LessonDraft>::scoped(app.documents(), Lesson::collection_for(&first).unwrap())
        .upsert(&LessonDraft {
            title: "Late write".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;

    let titles: Vec<_> = lessons.items().into_iter().map(|l| l.title).collect();
    assert_eq!(titles, ["Machines lesson"]);
}

#[tokio::test]
async fn test_pages_release_everything_on_drop() {
    let app = helpers::TestApp::new();
    let id = course_with_lesson(&app, "Signals").await;

    let detail = CourseDetail::open(app.documents(), id).await.unwrap();
    let explore = ExploreView::open(app.documents()).await.unwrap();
    explore.loaded().await.unwrap();
    detail.lessons_loaded().await.unwrap();
    app.wait_for_listeners(4).await;

    drop(detail);
    app.wait_for_listeners(2).await;
    drop(explore);
    app.wait_for_listeners(0).await;
}

#[tokio::test]
async fn test_rescoping_over_quiet_courses_releases_store_entries() {
    let app = helpers::TestApp::new();
    let courses = CollectionPath::root(Course::COLLECTION);
    let mut lessons = ScopedSubscription::<Lesson>::new(app.documents(), courses.clone());

    for i in 0..50 {
        lessons
            .select(Some(DocumentId::new(format!("quiet-{i}"))))
            .await
            .unwrap();
    }
    app.wait_for_listeners(1).await;

    // Registering any listener sweeps the released ones.
    let newest = app
        .store
        .listen(&courses, &Course::order_by())
        .await
        .unwrap();
    assert_eq!(app.store.retained_listeners().await, 2);

    drop(newest);
    drop(lessons);
    app.wait_for_listeners(0).await;
}
