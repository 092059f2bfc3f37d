use thiserror::Error;

use crate::model::{CourseError, LessonError, ParseLevelError, ParseRoleError, ProfileError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Course(#[from] CourseError),
    #[error(transparent)]
    Lesson(#[from] LessonError),
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Role(#[from] ParseRoleError),
    #[error(transparent)]
    Level(#[from] ParseLevelError),
}
