use academy_core::aggregate_progress;
use academy_core::model::{
    CourseDraft, CourseId, CourseLevel, Lesson, LessonId, Profile, ProfileUpdate, Role, UserId,
};
use academy_core::time::fixed_now;
use chrono::Duration;
use storage::repository::{
    CompletionRepository, CourseRepository, LessonRepository, ProfileRepository, RoleRepository,
    StorageError,
};
use storage::sqlite::SqliteRepository;

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

fn draft(title: &str) -> CourseDraft {
    CourseDraft::new(title, format!("{title} description"))
}

#[tokio::test]
async fn sqlite_roundtrip_persists_course_fields() {
    let repo = connect("memdb_course_roundtrip").await;
    let author = UserId::random();

    let new_course = CourseDraft {
        category: Some("monetizacao".into()),
        level: Some(CourseLevel::Advanced),
        duration_minutes: Some(90),
        is_featured: true,
        is_extra: true,
        ..draft("  Scaling  ")
    }
    .validate(author, fixed_now())
    .unwrap();

    let inserted = repo.insert_new_course(&new_course).await.unwrap();
    let fetched = repo
        .get_course(inserted.id())
        .await
        .unwrap()
        .expect("course exists");

    assert_eq!(fetched.title(), "Scaling");
    assert_eq!(fetched.category().map(|c| c.as_str()), Some("monetizacao"));
    assert_eq!(fetched.level(), Some(CourseLevel::Advanced));
    assert_eq!(fetched.duration_minutes(), Some(90));
    assert!(fetched.is_featured());
    assert!(fetched.is_extra());
    assert!(fetched.is_published());
    assert_eq!(fetched.created_by(), author);
    assert_eq!(fetched.created_at(), fixed_now());

    assert!(repo.get_course(CourseId::new(999)).await.unwrap().is_none());
}

#[tokio::test]
async fn sqlite_lists_only_published_in_catalog_order() {
    let repo = connect("memdb_catalog_order").await;
    let author = UserId::random();
    let now = fixed_now();

    let older = draft("Older").validate(author, now).unwrap();
    let hidden = CourseDraft {
        is_published: false,
        ..draft("Hidden")
    }
    .validate(author, now + Duration::minutes(1))
    .unwrap();
    let featured = CourseDraft {
        is_featured: true,
        ..draft("Featured")
    }
    .validate(author, now + Duration::minutes(2))
    .unwrap();

    repo.insert_new_course(&older).await.unwrap();
    repo.insert_new_course(&hidden).await.unwrap();
    repo.insert_new_course(&featured).await.unwrap();

    let titles: Vec<String> = repo
        .list_published_courses()
        .await
        .unwrap()
        .iter()
        .map(|c| c.title().to_string())
        .collect();
    assert_eq!(titles, vec!["Featured", "Older"]);
}

#[tokio::test]
async fn sqlite_lessons_enforce_course_and_order() {
    let repo = connect("memdb_lessons").await;
    let course = repo
        .insert_new_course(&draft("Course").validate(UserId::random(), fixed_now()).unwrap())
        .await
        .unwrap();

    let second = Lesson::new(LessonId::new(2), course.id(), "Second", 2).unwrap();
    let first = Lesson::new(LessonId::new(1), course.id(), "First", 1).unwrap();
    repo.upsert_lesson(&second).await.unwrap();
    repo.upsert_lesson(&first).await.unwrap();

    let lessons = repo.list_course_lessons(course.id()).await.unwrap();
    let titles: Vec<&str> = lessons.iter().map(Lesson::title).collect();
    assert_eq!(titles, vec!["First", "Second"]);

    let clash = Lesson::new(LessonId::new(3), course.id(), "Clash", 1).unwrap();
    assert!(matches!(
        repo.upsert_lesson(&clash).await,
        Err(StorageError::Conflict)
    ));

    let orphan = Lesson::new(LessonId::new(4), CourseId::new(77), "Orphan", 1).unwrap();
    assert!(matches!(
        repo.upsert_lesson(&orphan).await,
        Err(StorageError::NotFound)
    ));

    let renamed = Lesson::new(LessonId::new(1), course.id(), "First, revised", 1).unwrap();
    repo.upsert_lesson(&renamed).await.unwrap();
    let lessons = repo.list_course_lessons(course.id()).await.unwrap();
    assert_eq!(lessons[0].title(), "First, revised");
    assert_eq!(repo.list_lessons().await.unwrap().len(), 2);
}

#[tokio::test]
async fn sqlite_completions_feed_progress_and_stay_idempotent() {
    let repo = connect("memdb_completions").await;
    let user = UserId::random();
    let author = UserId::random();

    let c1 = repo
        .insert_new_course(&draft("C1").validate(author, fixed_now()).unwrap())
        .await
        .unwrap();
    let c2 = repo
        .insert_new_course(&draft("C2").validate(author, fixed_now()).unwrap())
        .await
        .unwrap();
    for (id, course, order) in [(1, c1.id(), 1), (2, c1.id(), 2), (3, c2.id(), 1)] {
        let lesson = Lesson::new(LessonId::new(id), course, format!("L{id}"), order).unwrap();
        repo.upsert_lesson(&lesson).await.unwrap();
    }

    repo.mark_complete(user, LessonId::new(1), fixed_now())
        .await
        .unwrap();
    repo.mark_complete(user, LessonId::new(1), fixed_now() + Duration::days(1))
        .await
        .unwrap();

    let completions = repo.list_completions(user).await.unwrap();
    assert_eq!(completions.len(), 1);
    assert!(completions[0].completed);

    let roster = repo.list_lessons().await.unwrap();
    let progress = aggregate_progress(&roster, &completions);
    assert_eq!(progress.get(c1.id()), Some(50.0));
    assert_eq!(progress.get(c2.id()), Some(0.0));

    assert!(matches!(
        repo.mark_complete(user, LessonId::new(404), fixed_now()).await,
        Err(StorageError::NotFound)
    ));
    assert!(
        repo.list_completions(UserId::random())
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn sqlite_profiles_and_roles() {
    let repo = connect("memdb_profiles").await;
    let user = UserId::random();
    let stranger = UserId::random();

    assert!(matches!(
        repo.set_role(stranger, Role::Admin).await,
        Err(StorageError::NotFound)
    ));

    repo.upsert_profile(&Profile::new(user, Some("Ana".into()), fixed_now()))
        .await
        .unwrap();
    assert_eq!(repo.get_role(user).await.unwrap(), None);

    repo.set_role(user, Role::Producer).await.unwrap();
    repo.set_role(user, Role::Admin).await.unwrap();
    assert_eq!(repo.get_role(user).await.unwrap(), Some(Role::Admin));
    assert_eq!(repo.list_roles().await.unwrap(), vec![(user, Role::Admin)]);

    let update = ProfileUpdate::new("Ana Maria", "https://example.com/a.png").unwrap();
    let updated = repo.update_profile(user, &update).await.unwrap();
    assert_eq!(updated.name.as_deref(), Some("Ana Maria"));
    assert_eq!(updated.avatar_url.as_deref(), Some("https://example.com/a.png"));
    assert_eq!(updated.created_at, fixed_now());

    assert!(matches!(
        repo.update_profile(stranger, &update).await,
        Err(StorageError::NotFound)
    ));
    assert_eq!(repo.list_profiles().await.unwrap().len(), 1);
}
