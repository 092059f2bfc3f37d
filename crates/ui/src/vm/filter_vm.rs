use academy_core::model::{CourseCategory, CourseLevel, KNOWN_CATEGORIES};
use academy_core::{CategoryFilter, FilterCriteria, LevelFilter};

use crate::vm::course_card_vm::level_label;

pub const ALL_VALUE: &str = "all";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

/// Everything the dashboard filter bar renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterBarVm {
    pub search_term: String,
    pub category_value: String,
    pub level_value: String,
    pub featured_only: bool,
    pub category_options: Vec<FilterOption>,
    pub level_options: Vec<FilterOption>,
    pub active_badges: Vec<String>,
    pub show_clear: bool,
    /// Shown instead of the grid when nothing is visible.
    pub empty_message: Option<&'static str>,
}

impl FilterBarVm {
    #[must_use]
    pub fn new(criteria: &FilterCriteria, total: usize, visible: usize) -> Self {
        let active = criteria.has_active_filters();
        let empty_message = match (visible, total, active) {
            (0, 0, _) => Some("No courses published yet."),
            (0, _, true) => Some("No courses match your filters."),
            _ => None,
        };

        Self {
            search_term: criteria.search_term.clone(),
            category_value: category_value(&criteria.category),
            level_value: level_value(criteria.level),
            featured_only: criteria.featured_only,
            category_options: category_options(),
            level_options: level_options(),
            active_badges: active_badges(criteria),
            show_clear: active,
            empty_message,
        }
    }
}

#[must_use]
pub fn category_label(value: &str) -> String {
    match value {
        "fundamentos" => "Fundamentals".to_string(),
        "criacao-canal" => "Channel Creation".to_string(),
        "monetizacao" => "Monetization".to_string(),
        "geral" => "General".to_string(),
        other => other.to_string(),
    }
}

/// Select value back to a filter; unknown or blank values mean "all".
#[must_use]
pub fn category_filter_from_value(value: &str) -> CategoryFilter {
    if value == ALL_VALUE {
        return CategoryFilter::All;
    }
    CourseCategory::new(value).map_or(CategoryFilter::All, CategoryFilter::Only)
}

#[must_use]
pub fn level_filter_from_value(value: &str) -> LevelFilter {
    value
        .parse::<CourseLevel>()
        .map_or(LevelFilter::All, LevelFilter::Only)
}

fn category_value(filter: &CategoryFilter) -> String {
    match filter {
        CategoryFilter::All => ALL_VALUE.to_string(),
        CategoryFilter::Only(category) => category.as_str().to_string(),
    }
}

fn level_value(filter: LevelFilter) -> String {
    match filter {
        LevelFilter::All => ALL_VALUE.to_string(),
        LevelFilter::Only(level) => level.as_str().to_string(),
    }
}

fn category_options() -> Vec<FilterOption> {
    std::iter::once(FilterOption {
        value: ALL_VALUE.to_string(),
        label: "All categories".to_string(),
    })
    .chain(KNOWN_CATEGORIES.iter().map(|value| FilterOption {
        value: (*value).to_string(),
        label: category_label(value),
    }))
    .collect()
}

fn level_options() -> Vec<FilterOption> {
    std::iter::once(FilterOption {
        value: ALL_VALUE.to_string(),
        label: "All levels".to_string(),
    })
    .chain(CourseLevel::ALL.iter().map(|level| FilterOption {
        value: level.as_str().to_string(),
        label: level_label(*level).to_string(),
    }))
    .collect()
}

fn active_badges(criteria: &FilterCriteria) -> Vec<String> {
    let mut badges = Vec::new();
    let term = criteria.trimmed_search();
    if !term.is_empty() {
        badges.push(format!("Search: {term}"));
    }
    if let CategoryFilter::Only(category) = &criteria.category {
        badges.push(category_label(category.as_str()));
    }
    if let LevelFilter::Only(level) = criteria.level {
        badges.push(level_label(level).to_string());
    }
    if criteria.featured_only {
        badges.push("Featured".to_string());
    }
    badges
}
