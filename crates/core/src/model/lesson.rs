use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::{CourseId, LessonId, UserId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error("lesson title cannot be empty")]
    EmptyTitle,
}

/// A lesson scoped to a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    id: LessonId,
    course_id: CourseId,
    title: String,
    order_index: u32,
}

impl Lesson {
    /// Create a validated lesson.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::EmptyTitle` if the title is blank.
    pub fn new(
        id: LessonId,
        course_id: CourseId,
        title: impl Into<String>,
        order_index: u32,
    ) -> Result<Self, LessonError> {
        let title = title.into();
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(LessonError::EmptyTitle);
        }
        Ok(Self {
            id,
            course_id,
            title: trimmed.to_string(),
            order_index,
        })
    }

    #[must_use]
    pub fn id(&self) -> LessonId {
        self.id
    }

    #[must_use]
    pub fn course_id(&self) -> CourseId {
        self.course_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn order_index(&self) -> u32 {
        self.order_index
    }

    #[must_use]
    pub fn roster_entry(&self) -> LessonRef {
        LessonRef::new(self.id, self.course_id)
    }
}

/// Roster projection of a lesson: just enough to group lessons by course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LessonRef {
    pub id: LessonId,
    pub course_id: CourseId,
}

impl LessonRef {
    #[must_use]
    pub fn new(id: LessonId, course_id: CourseId) -> Self {
        Self { id, course_id }
    }
}

/// Per-user completion marker for a lesson, keyed by `(user_id, lesson_id)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRecord {
    pub user_id: UserId,
    pub lesson_id: LessonId,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

impl CompletionRecord {
    #[must_use]
    pub fn completed(user_id: UserId, lesson_id: LessonId, at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            lesson_id,
            completed: true,
            completed_at: Some(at),
        }
    }

    #[must_use]
    pub fn lesson_completion(&self) -> LessonCompletion {
        LessonCompletion::new(self.lesson_id, self.completed)
    }
}

/// What the completion read returns for the current user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LessonCompletion {
    pub lesson_id: LessonId,
    pub completed: bool,
}

impl LessonCompletion {
    #[must_use]
    pub fn new(lesson_id: LessonId, completed: bool) -> Self {
        Self {
            lesson_id,
            completed,
        }
    }
}
