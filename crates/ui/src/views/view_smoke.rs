use std::sync::Arc;

use academy_core::model::{
    Course, CourseDraft, CourseId, Lesson, LessonCompletion, LessonId, NewCourse, Profile, Role,
    UserId,
};
use academy_core::time::fixed_now;
use chrono::{DateTime, Duration, Utc};
use storage::repository::{
    CompletionRepository, CourseRepository, LessonRepository, ProfileRepository, RoleRepository,
    Storage, StorageError,
};

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_storage};

async fn seed_course(storage: &Storage, title: &str, featured: bool, lessons: u64) -> Course {
    let draft = CourseDraft {
        is_featured: featured,
        ..CourseDraft::new(title, format!("{title} description"))
    };
    let course = storage
        .courses
        .insert_new_course(&draft.validate(UserId::random(), fixed_now()).unwrap())
        .await
        .expect("insert course");
    let base = course.id().value() * 100;
    for i in 1..=lessons {
        let lesson = Lesson::new(
            LessonId::new(base + i),
            course.id(),
            format!("{title} lesson {i}"),
            u32::try_from(i).unwrap(),
        )
        .unwrap();
        storage.lessons.upsert_lesson(&lesson).await.expect("lesson");
    }
    course
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_renders_cards_and_progress() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, Some(Role::Student)).await;
    let started = seed_course(&harness.storage, "Editing Basics", false, 2).await;
    seed_course(&harness.storage, "Coming Soon", true, 0).await;
    harness
        .storage
        .completions
        .mark_complete(
            harness.user_id,
            LessonId::new(started.id().value() * 100 + 1),
            fixed_now(),
        )
        .await
        .unwrap();

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Editing Basics"), "missing course in {html}");
    assert!(html.contains("Coming Soon"), "missing course in {html}");
    assert!(html.contains("50% complete"), "missing progress in {html}");
    assert_eq!(html.matches("% complete").count(), 1, "zero-lesson course shows a bar: {html}");
    assert!(!html.contains("New course"), "student sees create action in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_shows_create_action_for_producers() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, Some(Role::Producer)).await;
    seed_course(&harness.storage, "Growth", false, 1).await;

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("New course"), "missing create action in {html}");
    assert!(html.contains("Growth"), "missing course in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_renders_empty_catalog() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, Some(Role::Student)).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("No courses published yet."), "missing empty state in {html}");
}

struct FailingCourses;

#[async_trait::async_trait]
impl CourseRepository for FailingCourses {
    async fn insert_new_course(&self, _course: &NewCourse) -> Result<Course, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn get_course(&self, _id: CourseId) -> Result<Option<Course>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn list_published_courses(&self) -> Result<Vec<Course>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_degrades_when_courses_fail() {
    let storage = Storage {
        courses: Arc::new(FailingCourses),
        ..Storage::in_memory()
    };
    let mut harness =
        setup_view_harness_with_storage(ViewKind::Dashboard, Some(Role::Student), storage).await;
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("Courses are unavailable right now"),
        "missing degraded state in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_signed_out_renders_sign_in() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, None).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Sign in"), "missing sign-in entry in {html}");
    assert!(!html.contains("Courses"), "course data leaked in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn course_smoke_renders_lessons_and_completion() {
    let storage = Storage::in_memory();
    let course = seed_course(&storage, "Scripts", false, 3).await;
    let mut harness = setup_view_harness_with_storage(
        ViewKind::Course(course.id().value()),
        Some(Role::Student),
        storage,
    )
    .await;
    harness
        .storage
        .completions
        .mark_complete(
            harness.user_id,
            LessonId::new(course.id().value() * 100 + 2),
            fixed_now(),
        )
        .await
        .unwrap();

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Scripts lesson 1"), "missing lesson in {html}");
    assert!(html.contains("1 of 3 lessons completed"), "missing count in {html}");
    assert!(html.contains("Mark as completed"), "missing action in {html}");
    assert!(html.contains("Completed"), "missing completed marker in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn course_smoke_renders_not_found() {
    let mut harness = setup_view_harness(ViewKind::Course(404), Some(Role::Student)).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("find what you were looking for"), "missing not-found in {html}");
    assert!(html.contains("Back to courses"), "missing back link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn new_course_smoke_is_gated_by_role() {
    let mut harness = setup_view_harness(ViewKind::NewCourse, Some(Role::Student)).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Access denied"), "missing denial in {html}");
    assert!(html.contains("Back to dashboard"), "missing back link in {html}");

    let mut harness = setup_view_harness(ViewKind::NewCourse, Some(Role::Producer)).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Create course"), "missing form in {html}");
    assert!(html.contains("Channel Creation"), "missing category option in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn users_smoke_lists_users_for_admins_only() {
    let mut harness = setup_view_harness(ViewKind::Users, Some(Role::Admin)).await;
    harness
        .storage
        .profiles
        .upsert_profile(&Profile::new(
            UserId::random(),
            Some("Second Person".into()),
            fixed_now() + Duration::minutes(5),
        ))
        .await
        .unwrap();

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Test User"), "missing admin row in {html}");
    assert!(html.contains("Second Person"), "missing second row in {html}");
    assert!(html.contains("Producer"), "missing role option in {html}");

    let mut harness = setup_view_harness(ViewKind::Users, Some(Role::Producer)).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Access denied"), "missing denial in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn profile_smoke_prefills_form() {
    let mut harness = setup_view_harness(ViewKind::Profile, Some(Role::Student)).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Avatar URL"), "missing avatar field in {html}");
    assert!(html.contains("Test User"), "missing name value in {html}");
}

struct FailingCompletions;

#[async_trait::async_trait]
impl CompletionRepository for FailingCompletions {
    async fn list_completions(
        &self,
        _user_id: UserId,
    ) -> Result<Vec<LessonCompletion>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn mark_complete(
        &self,
        _user_id: UserId,
        _lesson_id: LessonId,
        _at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn course_smoke_marks_lesson_after_write() {
    let storage = Storage::in_memory();
    let course = seed_course(&storage, "Audio", false, 2).await;
    let mut harness = setup_view_harness_with_storage(
        ViewKind::CourseActions(course.id().value()),
        Some(Role::Student),
        storage,
    )
    .await;
    harness.settle().await;
    assert!(harness.render().contains("0 of 2 lessons completed"));

    let complete = harness.handles.complete_lesson();
    harness.call(complete, LessonId::new(course.id().value() * 100 + 1));
    harness.flush().await;

    let html = harness.render();
    assert!(html.contains("1 of 2 lessons completed"), "missing count in {html}");
    assert!(html.contains("Lesson marked as completed."), "missing notice in {html}");
    let stored = harness
        .storage
        .completions
        .list_completions(harness.user_id)
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn course_smoke_keeps_state_when_completion_fails() {
    let storage = Storage {
        completions: Arc::new(FailingCompletions),
        ..Storage::in_memory()
    };
    let course = seed_course(&storage, "Audio", false, 2).await;
    let mut harness = setup_view_harness_with_storage(
        ViewKind::CourseActions(course.id().value()),
        Some(Role::Student),
        storage,
    )
    .await;
    harness.settle().await;

    let complete = harness.handles.complete_lesson();
    harness.call(complete, LessonId::new(course.id().value() * 100 + 1));
    harness.flush().await;

    let html = harness.render();
    assert!(html.contains("mark the lesson as completed."), "missing error notice in {html}");
    assert!(html.contains("0 of 2 lessons completed"), "count changed in {html}");
    assert!(!html.contains("lesson-status"), "lesson shown as completed in {html}");
    assert!(html.contains("Mark as completed"), "missing action in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn users_smoke_self_demotion_drops_admin_access() {
    let mut harness = setup_view_harness(ViewKind::UsersActions, Some(Role::Admin)).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("users-table"), "missing table in {html}");

    let change_role = harness.handles.change_role();
    let me = harness.user_id;
    harness.call(change_role, (me, Role::Student));
    harness.flush().await;

    let html = harness.render();
    assert!(html.contains("Access denied"), "admin view survived demotion: {html}");
    assert!(!html.contains("users-table"), "user table still shown in {html}");
    assert_eq!(
        harness.storage.roles.get_role(me).await.unwrap(),
        Some(Role::Student)
    );

    // The stale callback must not restore the old role.
    harness.call(change_role, (me, Role::Admin));
    harness.flush().await;
    assert_eq!(
        harness.storage.roles.get_role(me).await.unwrap(),
        Some(Role::Student)
    );
}

#[tokio::test(flavor = "current_thread")]
async fn users_smoke_changing_another_role_keeps_admin_view() {
    let mut harness = setup_view_harness(ViewKind::UsersActions, Some(Role::Admin)).await;
    let other = UserId::random();
    harness
        .storage
        .profiles
        .upsert_profile(&Profile::new(
            other,
            Some("Second Person".into()),
            fixed_now() + Duration::minutes(5),
        ))
        .await
        .unwrap();
    harness.settle().await;

    let change_role = harness.handles.change_role();
    harness.call(change_role, (other, Role::Producer));
    harness.flush().await;

    let html = harness.render();
    assert!(html.contains("users-table"), "admin lost access in {html}");
    assert!(html.contains("Role updated to Producer."), "missing notice in {html}");
    assert_eq!(
        harness.storage.roles.get_role(other).await.unwrap(),
        Some(Role::Producer)
    );
}
