use std::sync::Arc;

use academy_core::model::{Course, CourseDraft, CourseId, UserSession};
use storage::repository::{CourseRepository, RoleRepository};

use crate::Clock;
use crate::error::CourseServiceError;
use crate::session::stored_role;

/// Orchestrates course creation and lookup.
#[derive(Clone)]
pub struct CourseService {
    clock: Clock,
    courses: Arc<dyn CourseRepository>,
    roles: Arc<dyn RoleRepository>,
}

impl CourseService {
    #[must_use]
    pub fn new(
        clock: Clock,
        courses: Arc<dyn CourseRepository>,
        roles: Arc<dyn RoleRepository>,
    ) -> Self {
        Self {
            clock,
            courses,
            roles,
        }
    }

    /// Create a course authored by the session user.
    ///
    /// Both the session and the role stored for its user must allow course
    /// management, so a session resolved before a demotion is refused.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::Forbidden` if the user cannot manage courses.
    /// Returns `CourseServiceError::Validation` for an invalid draft.
    /// Returns `CourseServiceError::Storage` if persistence fails.
    pub async fn create_course(
        &self,
        session: &UserSession,
        draft: CourseDraft,
    ) -> Result<Course, CourseServiceError> {
        let allowed = session.can_manage_courses()
            && stored_role(self.roles.as_ref(), session.user_id)
                .await?
                .can_manage_courses();
        if !allowed {
            tracing::warn!(user_id = %session.user_id, role = session.role.as_str(), "course creation refused");
            return Err(CourseServiceError::Forbidden);
        }

        let new_course = draft.validate(session.user_id, self.clock.now())?;
        let course = self.courses.insert_new_course(&new_course).await?;
        tracing::info!(course_id = %course.id(), user_id = %session.user_id, "course created");
        Ok(course)
    }

    /// Fetch a course by ID. Returns `Ok(None)` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::Storage` if repository access fails.
    pub async fn get_course(&self, id: CourseId) -> Result<Option<Course>, CourseServiceError> {
        Ok(self.courses.get_course(id).await?)
    }
}
