use std::collections::HashSet;
use std::sync::Arc;

use academy_core::aggregate_progress;
use academy_core::model::{Course, CourseId, Lesson, LessonCompletion, LessonId, UserSession};
use storage::repository::{CompletionRepository, CourseRepository, LessonRepository};

use crate::Clock;
use crate::error::ProgressError;

/// A course with its ordered lessons and the viewer's completed set.
#[derive(Debug, Clone, PartialEq)]
pub struct CoursePage {
    pub course: Course,
    pub lessons: Vec<Lesson>,
    completed: HashSet<LessonId>,
}

impl CoursePage {
    #[must_use]
    pub fn new(course: Course, lessons: Vec<Lesson>, completed: HashSet<LessonId>) -> Self {
        Self {
            course,
            lessons,
            completed,
        }
    }

    #[must_use]
    pub fn is_completed(&self, lesson_id: LessonId) -> bool {
        self.completed.contains(&lesson_id)
    }

    /// Record a confirmed completion locally. Lessons outside this course are ignored.
    pub fn record_completion(&mut self, lesson_id: LessonId) {
        if self.lessons.iter().any(|l| l.id() == lesson_id) {
            self.completed.insert(lesson_id);
        }
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.lessons
            .iter()
            .filter(|l| self.completed.contains(&l.id()))
            .count()
    }

    /// Completion percentage, or `None` for a course without lessons.
    #[must_use]
    pub fn percentage(&self) -> Option<f64> {
        let roster = self.lessons.iter().map(Lesson::roster_entry).collect::<Vec<_>>();
        let completions = self
            .completed
            .iter()
            .map(|id| LessonCompletion::new(*id, true))
            .collect::<Vec<_>>();
        aggregate_progress(&roster, &completions).get(self.course.id())
    }
}

/// Loads a course page and records lesson completions.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    courses: Arc<dyn CourseRepository>,
    lessons: Arc<dyn LessonRepository>,
    completions: Arc<dyn CompletionRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(
        clock: Clock,
        courses: Arc<dyn CourseRepository>,
        lessons: Arc<dyn LessonRepository>,
        completions: Arc<dyn CompletionRepository>,
    ) -> Self {
        Self {
            clock,
            courses,
            lessons,
            completions,
        }
    }

    /// # Errors
    ///
    /// Returns `ProgressError::NotFound` if the course does not exist.
    /// Returns `ProgressError::Storage` if the course or lesson read fails.
    pub async fn load_course(
        &self,
        session: &UserSession,
        course_id: CourseId,
    ) -> Result<CoursePage, ProgressError> {
        let course = self
            .courses
            .get_course(course_id)
            .await?
            .ok_or(ProgressError::NotFound)?;
        let lessons = self.lessons.list_course_lessons(course_id).await?;

        let completed = match self.completions.list_completions(session.user_id).await {
            Ok(records) => records
                .into_iter()
                .filter(|r| r.completed)
                .map(|r| r.lesson_id)
                .collect(),
            Err(err) => {
                tracing::warn!(error = %err, %course_id, "failed to load completions");
                HashSet::new()
            }
        };

        Ok(CoursePage::new(course, lessons, completed))
    }

    /// Mark a lesson completed for the session user. Safe to repeat.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the upsert fails.
    pub async fn mark_complete(
        &self,
        session: &UserSession,
        lesson_id: LessonId,
    ) -> Result<(), ProgressError> {
        self.completions
            .mark_complete(session.user_id, lesson_id, self.clock.now())
            .await?;
        tracing::info!(%lesson_id, user_id = %session.user_id, "lesson completed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use academy_core::model::{CourseDraft, Role, UserId};
    use academy_core::time::fixed_now;
    use storage::repository::InMemoryRepository;

    async fn course_with_lessons(repo: &InMemoryRepository, count: u64) -> Course {
        let course = repo
            .insert_new_course(
                &CourseDraft::new("Course", "")
                    .validate(UserId::random(), fixed_now())
                    .unwrap(),
            )
            .await
            .unwrap();
        for id in 1..=count {
            let order = u32::try_from(count - id + 1).unwrap();
            let lesson = Lesson::new(LessonId::new(id), course.id(), format!("L{id}"), order).unwrap();
            repo.upsert_lesson(&lesson).await.unwrap();
        }
        course
    }

    fn service(repo: &InMemoryRepository) -> ProgressService {
        ProgressService::new(
            Clock::fixed(fixed_now()),
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
        )
    }

    #[tokio::test]
    async fn load_course_orders_lessons_and_tracks_completion() {
        let repo = InMemoryRepository::new();
        let course = course_with_lessons(&repo, 4).await;
        let session = UserSession::new(UserId::random(), Role::Student);
        let svc = service(&repo);

        let page = svc.load_course(&session, course.id()).await.unwrap();
        let orders: Vec<u32> = page.lessons.iter().map(Lesson::order_index).collect();
        assert_eq!(orders, vec![1, 2, 3, 4]);
        assert_eq!(page.percentage(), Some(0.0));

        svc.mark_complete(&session, LessonId::new(2)).await.unwrap();
        svc.mark_complete(&session, LessonId::new(2)).await.unwrap();

        let page = svc.load_course(&session, course.id()).await.unwrap();
        assert!(page.is_completed(LessonId::new(2)));
        assert_eq!(page.completed_count(), 1);
        assert_eq!(page.percentage(), Some(25.0));
    }

    #[tokio::test]
    async fn record_completion_only_touches_own_lessons() {
        let repo = InMemoryRepository::new();
        let course = course_with_lessons(&repo, 2).await;
        let session = UserSession::new(UserId::random(), Role::Student);

        let mut page = service(&repo)
            .load_course(&session, course.id())
            .await
            .unwrap();
        page.record_completion(LessonId::new(99));
        assert_eq!(page.completed_count(), 0);

        page.record_completion(LessonId::new(1));
        assert_eq!(page.percentage(), Some(50.0));
    }

    #[tokio::test]
    async fn missing_course_is_not_found() {
        let repo = InMemoryRepository::new();
        let session = UserSession::new(UserId::random(), Role::Student);
        let err = service(&repo)
            .load_course(&session, CourseId::new(7))
            .await
            .unwrap_err();
        assert!(matches!(err, ProgressError::NotFound));
    }

    #[tokio::test]
    async fn course_without_lessons_has_no_percentage() {
        let repo = InMemoryRepository::new();
        let course = course_with_lessons(&repo, 0).await;
        let session = UserSession::new(UserId::random(), Role::Student);

        let page = service(&repo)
            .load_course(&session, course.id())
            .await
            .unwrap();
        assert!(page.lessons.is_empty());
        assert_eq!(page.percentage(), None);
    }
}
