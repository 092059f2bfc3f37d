//! Per-course completion percentages derived from lesson completion records.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::model::{CourseId, LessonCompletion, LessonId, LessonRef};

/// Completion percentage per course.
///
/// Not total over the catalog: a course without an entry has no progress data,
/// which is different from 0%.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseProgressMap(BTreeMap<CourseId, f64>);

impl CourseProgressMap {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Percentage in `[0, 100]`, unrounded.
    #[must_use]
    pub fn get(&self, course_id: CourseId) -> Option<f64> {
        self.0.get(&course_id).copied()
    }

    #[must_use]
    pub fn contains(&self, course_id: CourseId) -> bool {
        self.0.contains_key(&course_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CourseId, f64)> + '_ {
        self.0.iter().map(|(id, pct)| (*id, *pct))
    }
}

/// Compute completion percentage per course.
///
/// Lessons are grouped by course; each group's percentage is the share of its
/// lessons that appear in `completions` with `completed = true`. Courses
/// without lessons never get an entry. Completions for lessons outside the
/// roster are ignored and duplicates count once.
#[must_use]
pub fn aggregate_progress(roster: &[LessonRef], completions: &[LessonCompletion]) -> CourseProgressMap {
    let completed: HashSet<LessonId> = completions
        .iter()
        .filter(|c| c.completed)
        .map(|c| c.lesson_id)
        .collect();

    let mut groups: HashMap<CourseId, HashSet<LessonId>> = HashMap::new();
    for lesson in roster {
        groups.entry(lesson.course_id).or_default().insert(lesson.id);
    }

    let map = groups
        .into_iter()
        .map(|(course_id, lessons)| {
            let done = lessons.iter().filter(|id| completed.contains(id)).count();
            #[allow(clippy::cast_precision_loss)]
            let pct = done as f64 / lessons.len() as f64 * 100.0;
            (course_id, pct)
        })
        .collect();

    CourseProgressMap(map)
}
