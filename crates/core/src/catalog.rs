//! Catalog filtering and search over an already-ordered course list.

use crate::model::{Course, CourseCategory, CourseLevel};

/// Category clause of a filter: every category, or exactly one tag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(CourseCategory),
}

impl CategoryFilter {
    fn matches(&self, course: &Course) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => course.category() == Some(category),
        }
    }
}

/// Level clause of a filter: every level, or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelFilter {
    #[default]
    All,
    Only(CourseLevel),
}

impl LevelFilter {
    fn matches(self, course: &Course) -> bool {
        match self {
            Self::All => true,
            Self::Only(level) => course.level() == Some(level),
        }
    }
}

/// User-entered catalog filters. `Default` is the "show everything" state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub search_term: String,
    pub category: CategoryFilter,
    pub level: LevelFilter,
    pub featured_only: bool,
}

impl FilterCriteria {
    /// Search term with surrounding whitespace removed.
    #[must_use]
    pub fn trimmed_search(&self) -> &str {
        self.search_term.trim()
    }

    /// True when at least one clause narrows the catalog.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        !self.trimmed_search().is_empty()
            || self.category != CategoryFilter::All
            || self.level != LevelFilter::All
            || self.featured_only
    }

    /// Reset every clause at once.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// All clauses ANDed together.
    #[must_use]
    pub fn matches(&self, course: &Course) -> bool {
        self.matches_search(course)
            && self.category.matches(course)
            && self.level.matches(course)
            && (!self.featured_only || course.is_featured())
    }

    fn matches_search(&self, course: &Course) -> bool {
        let term = self.trimmed_search();
        if term.is_empty() {
            return true;
        }
        let needle = term.to_lowercase();
        course.title().to_lowercase().contains(&needle)
            || course.description().to_lowercase().contains(&needle)
    }
}

/// Keep the items whose course matches `criteria`, preserving input order.
#[must_use]
pub fn filter_courses<'a, T: AsRef<Course>>(items: &'a [T], criteria: &FilterCriteria) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| criteria.matches(item.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CourseDraft, CourseId, UserId};
    use crate::time::fixed_now;

    fn course(
        id: u64,
        title: &str,
        description: &str,
        category: Option<&str>,
        level: Option<CourseLevel>,
        featured: bool,
    ) -> Course {
        let mut draft = CourseDraft::new(title, description);
        draft.category = category.map(str::to_string);
        draft.level = level;
        draft.is_featured = featured;
        draft
            .validate(UserId::random(), fixed_now())
            .unwrap()
            .into_course(CourseId::new(id))
    }

    fn catalog() -> Vec<Course> {
        vec![
            course(1, "Python Basics", "Start coding", Some("fundamentos"), Some(CourseLevel::Beginner), false),
            course(2, "Advanced Editing", "Cuts and pacing", Some("monetizacao"), Some(CourseLevel::Advanced), true),
            course(3, "Channel Setup", "Branding with python scripts", Some("criacao-canal"), None, false),
            course(4, "Growth", "Algorithms", None, Some(CourseLevel::Intermediate), true),
        ]
    }

    fn titles(items: &[&Course]) -> Vec<String> {
        items.iter().map(|c| c.title().to_string()).collect()
    }

    fn category(tag: &str) -> CategoryFilter {
        CategoryFilter::Only(CourseCategory::new(tag).unwrap())
    }

    #[test]
    fn featured_only_keeps_featured_courses() {
        let courses = vec![
            course(1, "Python Basics", "", Some("fundamentos"), None, false),
            course(2, "Advanced Editing", "", Some("monetizacao"), None, true),
        ];
        let criteria = FilterCriteria {
            featured_only: true,
            ..FilterCriteria::default()
        };
        assert_eq!(titles(&filter_courses(&courses, &criteria)), vec!["Advanced Editing"]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let courses = catalog();
        let criteria = FilterCriteria {
            search_term: "PYTHON".into(),
            ..FilterCriteria::default()
        };
        assert_eq!(
            titles(&filter_courses(&courses, &criteria)),
            vec!["Python Basics", "Channel Setup"]
        );

        let partial = FilterCriteria {
            search_term: "  edit ".into(),
            ..FilterCriteria::default()
        };
        assert_eq!(titles(&filter_courses(&courses, &partial)), vec!["Advanced Editing"]);
    }

    #[test]
    fn category_and_level_use_exact_equality() {
        let courses = catalog();
        let by_category = FilterCriteria {
            category: category("fundamentos"),
            ..FilterCriteria::default()
        };
        assert_eq!(titles(&filter_courses(&courses, &by_category)), vec!["Python Basics"]);

        let by_level = FilterCriteria {
            level: LevelFilter::Only(CourseLevel::Intermediate),
            ..FilterCriteria::default()
        };
        assert_eq!(titles(&filter_courses(&courses, &by_level)), vec!["Growth"]);

        let unknown = FilterCriteria {
            category: category("fundamentos-extra"),
            ..FilterCriteria::default()
        };
        assert!(filter_courses(&courses, &unknown).is_empty());
    }

    #[test]
    fn default_criteria_is_identity() {
        let courses = catalog();
        let all = filter_courses(&courses, &FilterCriteria::default());
        assert_eq!(all.len(), courses.len());
        for (kept, original) in all.iter().zip(courses.iter()) {
            assert_eq!(*kept, original);
        }
    }

    #[test]
    fn sequential_filters_equal_combined_filter() {
        let courses = catalog();
        let first = FilterCriteria {
            search_term: "a".into(),
            ..FilterCriteria::default()
        };
        let second = FilterCriteria {
            featured_only: true,
            level: LevelFilter::Only(CourseLevel::Advanced),
            ..FilterCriteria::default()
        };
        let combined = FilterCriteria {
            search_term: "a".into(),
            featured_only: true,
            level: LevelFilter::Only(CourseLevel::Advanced),
            ..FilterCriteria::default()
        };

        let stage_one: Vec<Course> = filter_courses(&courses, &first).into_iter().cloned().collect();
        let sequential = filter_courses(&stage_one, &second);
        let once = filter_courses(&courses, &combined);
        assert_eq!(titles(&sequential), titles(&once));
        assert_eq!(titles(&once), vec!["Advanced Editing"]);
    }

    #[test]
    fn active_filters_detection() {
        assert!(!FilterCriteria::default().has_active_filters());

        let whitespace = FilterCriteria {
            search_term: "   ".into(),
            ..FilterCriteria::default()
        };
        assert!(!whitespace.has_active_filters());

        let variants = [
            FilterCriteria {
                search_term: "x".into(),
                ..FilterCriteria::default()
            },
            FilterCriteria {
                category: category("geral"),
                ..FilterCriteria::default()
            },
            FilterCriteria {
                level: LevelFilter::Only(CourseLevel::Beginner),
                ..FilterCriteria::default()
            },
            FilterCriteria {
                featured_only: true,
                ..FilterCriteria::default()
            },
        ];
        for criteria in variants {
            assert!(criteria.has_active_filters(), "{criteria:?}");
        }
    }

    #[test]
    fn clear_resets_every_field() {
        let mut criteria = FilterCriteria {
            search_term: "python".into(),
            category: category("geral"),
            level: LevelFilter::Only(CourseLevel::Advanced),
            featured_only: true,
        };
        criteria.clear();
        assert_eq!(criteria, FilterCriteria::default());
        assert!(!criteria.has_active_filters());
    }
}
