mod course;
mod ids;
mod lesson;
mod profile;
mod role;

pub use ids::{CourseId, LessonId, ParseIdError, UserId};

pub use course::{
    Course, CourseCategory, CourseDraft, CourseError, CourseLevel, KNOWN_CATEGORIES, NewCourse,
    ParseLevelError,
};
pub use lesson::{CompletionRecord, Lesson, LessonCompletion, LessonError, LessonRef};
pub use profile::{Profile, ProfileError, ProfileUpdate};
pub use role::{ParseRoleError, Role, UserSession};
