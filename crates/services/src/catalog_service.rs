use std::sync::Arc;

use academy_core::model::{Course, UserId, UserSession};
use academy_core::{CourseProgressMap, FilterCriteria, aggregate_progress, filter_courses};
use storage::repository::{CompletionRepository, CourseRepository, LessonRepository};

use crate::error::CatalogError;

/// A published course joined with the viewer's progress in it.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub course: Course,
    /// `None` when the course has no lessons or progress could not be loaded.
    pub progress: Option<f64>,
}

impl AsRef<Course> for CatalogEntry {
    fn as_ref(&self) -> &Course {
        &self.course
    }
}

/// Everything the dashboard renders, already degraded on fetch failures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    pub entries: Vec<CatalogEntry>,
    pub courses_unavailable: bool,
    pub progress_available: bool,
}

impl Dashboard {
    /// Entries passing `criteria`, in catalog order.
    #[must_use]
    pub fn visible(&self, criteria: &FilterCriteria) -> Vec<&CatalogEntry> {
        filter_courses(&self.entries, criteria)
    }
}

/// Reads the published catalog and per-course progress.
#[derive(Clone)]
pub struct CatalogService {
    courses: Arc<dyn CourseRepository>,
    lessons: Arc<dyn LessonRepository>,
    completions: Arc<dyn CompletionRepository>,
}

impl CatalogService {
    #[must_use]
    pub fn new(
        courses: Arc<dyn CourseRepository>,
        lessons: Arc<dyn LessonRepository>,
        completions: Arc<dyn CompletionRepository>,
    ) -> Self {
        Self {
            courses,
            lessons,
            completions,
        }
    }

    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if the course read fails.
    pub async fn list_published_courses(&self) -> Result<Vec<Course>, CatalogError> {
        Ok(self.courses.list_published_courses().await?)
    }

    /// Completion percentage per course for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if either the roster or the completion read fails.
    pub async fn course_progress(&self, user_id: UserId) -> Result<CourseProgressMap, CatalogError> {
        let (roster, completions) = tokio::join!(
            self.lessons.list_lessons(),
            self.completions.list_completions(user_id)
        );
        Ok(aggregate_progress(&roster?, &completions?))
    }

    /// Load courses and progress concurrently. Fetch failures degrade the
    /// result instead of failing it.
    pub async fn load_dashboard(&self, session: &UserSession) -> Dashboard {
        let (courses, progress) = tokio::join!(
            self.courses.list_published_courses(),
            self.course_progress(session.user_id)
        );

        let courses = match courses {
            Ok(courses) => courses,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load published courses");
                return Dashboard {
                    entries: Vec::new(),
                    courses_unavailable: true,
                    progress_available: progress.is_ok(),
                };
            }
        };

        let (progress, progress_available) = match progress {
            Ok(map) => (map, true),
            Err(err) => {
                tracing::warn!(error = %err, user_id = %session.user_id, "failed to load progress");
                (CourseProgressMap::empty(), false)
            }
        };

        let entries = courses
            .into_iter()
            .map(|course| {
                let progress = progress.get(course.id());
                CatalogEntry { course, progress }
            })
            .collect::<Vec<_>>();
        tracing::debug!(courses = entries.len(), "dashboard loaded");

        Dashboard {
            entries,
            courses_unavailable: false,
            progress_available,
        }
    }
}
