use academy_core::model::LessonId;
use services::CoursePage;

use crate::vm::course_card_vm::round_percent;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonItemVm {
    pub id: LessonId,
    pub position: usize,
    pub title: String,
    pub completed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseDetailVm {
    pub title: String,
    pub description: String,
    pub is_extra: bool,
    pub lessons: Vec<LessonItemVm>,
    pub completed_label: String,
    pub progress_percent: Option<u8>,
}

impl From<&CoursePage> for CourseDetailVm {
    fn from(page: &CoursePage) -> Self {
        let lessons = page
            .lessons
            .iter()
            .enumerate()
            .map(|(idx, lesson)| LessonItemVm {
                id: lesson.id(),
                position: idx + 1,
                title: lesson.title().to_string(),
                completed: page.is_completed(lesson.id()),
            })
            .collect::<Vec<_>>();
        let completed_label = format!(
            "{} of {} lessons completed",
            page.completed_count(),
            lessons.len()
        );

        Self {
            title: page.course.title().to_string(),
            description: page.course.description().to_string(),
            is_extra: page.course.is_extra(),
            lessons,
            completed_label,
            progress_percent: page.percentage().map(round_percent),
        }
    }
}
