//! Scenario tests for content upserts, live lists and filtering.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use campushub_core::config::StoreConfig;
use campushub_core::error::ErrorKind;
use campushub_core::traits::Draft;
use campushub_core::types::{DocumentId, FilterCriteria};
use campushub_entity::{Course, CourseDraft, CourseStatus, Lesson, LessonDraft};
use campushub_realtime::SubscriptionManager;
use campushub_service::{EntityRepository, FormMode, FormState, UpsertOutcome, filter};
use campushub_store::MemoryDocumentStore;

fn signals() -> CourseDraft {
    CourseDraft {
        title: "Signals".into(),
        branch: "ECE".into(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_created_course_appears_published() {
    let app = helpers::TestApp::new();
    let repo = EntityRepository::<CourseDraft>::root(app.documents());
    let mut list = SubscriptionManager::<Course>::new(app.documents());
    list.subscribe_collection().await.unwrap();
    assert!(list.loaded().await.unwrap().items.is_empty());

    let mut form = FormState::<CourseDraft>::new();
    *form.draft_mut() = signals();
    let outcome = form.submit(&repo).await.unwrap();
    assert!(matches!(outcome, UpsertOutcome::Created(_)));
    assert_eq!(form.mode(), FormMode::Create);
    assert!(form.draft().title.is_empty());

    let state = list.wait_until(|s| s.items.len() == 1).await.unwrap();
    let course = &state.items[0];
    assert_eq!(course.title, "Signals");
    assert_eq!(course.branch, "ECE");
    assert_eq!(course.status, CourseStatus::Published);
    assert_eq!(course.created_at, course.updated_at);
}

#[tokio::test]
async fn test_lessons_sharing_an_order_are_both_listed() {
    let app = helpers::TestApp::new();
    let courses = EntityRepository::<CourseDraft>::root(app.documents());
    let course_id = courses.upsert(&signals()).await.unwrap().id().cloned().unwrap();

    let lessons =
        EntityRepository::<LessonDraft>::scoped(app.documents(), Lesson::collection_for(&course_id).unwrap());
    for title in ["Sampling", "Aliasing"] {
        lessons
            .upsert(&LessonDraft {
                title: title.into(),
                order: 1,
                ..Default::default()
            })
            .await
            .unwrap();
    }

    let listed = lessons.list().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|l| l.order == 1));
}

#[tokio::test]
async fn test_deleting_course_keeps_lessons() {
    let app = helpers::TestApp::new();
    let courses = EntityRepository::<CourseDraft>::root(app.documents());
    let course_id = courses.upsert(&signals()).await.unwrap().id().cloned().unwrap();
    let lessons =
        EntityRepository::<LessonDraft>::scoped(app.documents(), Lesson::collection_for(&course_id).unwrap());
    lessons
        .upsert(&LessonDraft {
            title: "Intro".into(),
            ..Default::default()
        })
        .await
        .unwrap();

    courses.delete(&course_id).await.unwrap();

    assert!(courses.get(&course_id).await.unwrap().is_none());
    let orphans = lessons.list().await.unwrap();
    assert_eq!(orphans.len(), 1);
    assert_eq!(orphans[0].title, "Intro");
}

#[tokio::test]
async fn test_edit_form_updates_in_place() {
    let app = helpers::TestApp::new();
    let repo = EntityRepository::<CourseDraft>::root(app.documents());
    let id = repo.upsert(&signals()).await.unwrap().id().cloned().unwrap();
    let before = repo.get(&id).await.unwrap().unwrap();

    let mut form = FormState::<CourseDraft>::new();
    form.edit(&before);
    assert_eq!(form.mode(), FormMode::Edit(id.clone()));
    form.draft_mut().status = CourseStatus::Draft;
    form.draft_mut().title = "  Signals and Systems ".into();
    assert_eq!(
        form.submit(&repo).await.unwrap(),
        UpsertOutcome::Updated(id.clone())
    );

    let after = repo.get(&id).await.unwrap().unwrap();
    assert_eq!(after.title, "Signals and Systems");
    assert_eq!(after.status, CourseStatus::Draft);
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at > before.updated_at);
    assert_eq!(repo.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_blank_title_writes_nothing() {
    let app = helpers::TestApp::new();
    let repo = EntityRepository::<CourseDraft>::root(app.documents());
    let draft = CourseDraft {
        title: "   ".into(),
        branch: "ECE".into(),
        ..Default::default()
    };
    assert_eq!(draft.missing_fields(), ["title"]);

    let mut form = FormState::<CourseDraft>::new();
    *form.draft_mut() = draft;
    let outcome = form.submit(&repo).await.unwrap();
    assert_eq!(
        outcome,
        UpsertOutcome::Rejected {
            missing: vec!["title"]
        }
    );
    assert_eq!(form.draft().branch, "ECE");
    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unsubscribed_list_ignores_later_writes() {
    let app = helpers::TestApp::new();
    let repo = EntityRepository::<CourseDraft>::root(app.documents());
    repo.upsert(&signals()).await.unwrap();

    let mut list = SubscriptionManager::<Course>::new(app.documents());
    list.subscribe_collection().await.unwrap();
    list.wait_until(|s| !s.loading && s.items.len() == 1)
        .await
        .unwrap();

    list.unsubscribe();
    let frozen = list.items();
    repo.upsert(&CourseDraft {
        title: "Networks".into(),
        branch: "CSE".into(),
        ..Default::default()
    })
    .await
    .unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(list.items(), frozen);
    app.wait_for_listeners(0).await;
}

#[tokio::test]
async fn test_filter_is_case_insensitive_and_identity_when_empty() {
    let app = helpers::TestApp::new();
    let repo = EntityRepository::<CourseDraft>::root(app.documents());
    for (title, branch, description) in [
        ("Signals", "ECE", "Fourier and Laplace"),
        ("Machines", "EE", ""),
        ("Compilers", "CSE", "Parsing"),
    ] {
        repo.upsert(&CourseDraft {
            title: title.into(),
            branch: branch.into(),
            description: description.into(),
            ..Default::default()
        })
        .await
        .unwrap();
    }
    let all = repo.list().await.unwrap();

    assert_eq!(filter(&all, &FilterCriteria::all()), all);

    let by_text = filter(&all, &FilterCriteria::all().text("FOURIER"));
    assert_eq!(by_text.len(), 1);
    assert_eq!(by_text[0].title, "Signals");

    let by_branch = filter(&all, &FilterCriteria::all().branch("ee"));
    assert_eq!(by_branch.len(), 1);
    assert_eq!(by_branch[0].title, "Machines");

    assert!(filter(&all, &FilterCriteria::all().text("zzz")).is_empty());
    assert!(repo.get(&DocumentId::new("missing")).await.unwrap().is_none());
}

#[tokio::test]
async fn test_malformed_course_id_cannot_corrupt_data_file() {
    let file = std::env::temp_dir().join(format!("campushub-lessons-{}.json", DocumentId::generate()));
    let config = StoreConfig {
        data_file: file.display().to_string(),
        persist: true,
    };
    let store = Arc::new(MemoryDocumentStore::open(&config).await.unwrap());

    for bad in ["", "  ", "a/b"] {
        let err = Lesson::collection_for(&DocumentId::new(bad)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    let path = Lesson::collection_for(&DocumentId::new("c1")).unwrap();
    EntityRepository::<LessonDraft>::scoped(store.clone(), path.clone())
        .upsert(&LessonDraft {
            title: "Sampling".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    store.flush().await.unwrap();

    let reopened = MemoryDocumentStore::open(&config).await.unwrap();
    assert_eq!(reopened.collection_len(&path).await, 1);
    let _ = std::fs::remove_file(&file);
}
