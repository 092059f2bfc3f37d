use academy_core::model::{Course, CourseLevel};
use services::CatalogEntry;

use crate::vm::filter_vm::category_label;
use crate::vm::time_fmt::format_duration_minutes;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseCardVm {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub badges: Vec<String>,
    pub is_featured: bool,
    pub is_extra: bool,
    /// `None` hides the progress bar.
    pub progress_percent: Option<u8>,
}

impl From<&CatalogEntry> for CourseCardVm {
    fn from(entry: &CatalogEntry) -> Self {
        let course = &entry.course;
        Self {
            id: course.id().value(),
            title: course.title().to_string(),
            description: course.description().to_string(),
            badges: course_badges(course),
            is_featured: course.is_featured(),
            is_extra: course.is_extra(),
            progress_percent: entry.progress.map(round_percent),
        }
    }
}

#[must_use]
pub fn map_course_cards(entries: &[&CatalogEntry]) -> Vec<CourseCardVm> {
    entries.iter().map(|entry| CourseCardVm::from(*entry)).collect()
}

#[must_use]
pub fn level_label(level: CourseLevel) -> &'static str {
    match level {
        CourseLevel::Beginner => "Beginner",
        CourseLevel::Intermediate => "Intermediate",
        CourseLevel::Advanced => "Advanced",
    }
}

/// Nearest whole percent, clamped to `0..=100`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn round_percent(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

fn course_badges(course: &Course) -> Vec<String> {
    let mut badges = Vec::new();
    if course.is_featured() {
        badges.push("Featured".to_string());
    }
    if course.is_extra() {
        badges.push("Extra".to_string());
    }
    if let Some(level) = course.level() {
        badges.push(level_label(level).to_string());
    }
    if let Some(category) = course.category() {
        badges.push(category_label(category.as_str()));
    }
    if let Some(minutes) = course.duration_minutes() {
        badges.push(format_duration_minutes(minutes));
    }
    badges
}
