use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::{CourseId, UserId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CourseError {
    #[error("course title cannot be empty")]
    EmptyTitle,

    #[error("course category cannot be empty")]
    EmptyCategory,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown course level: {0}")]
pub struct ParseLevelError(String);

//
// ─── CATEGORY & LEVEL ──────────────────────────────────────────────────────────
//

/// Category tags the catalog ships with. The set is open: other tags are valid.
pub const KNOWN_CATEGORIES: [&str; 4] = ["fundamentos", "criacao-canal", "monetizacao", "geral"];

/// Category tag of a course (trimmed, non-empty).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CourseCategory(String);

impl CourseCategory {
    /// Create a validated category tag.
    ///
    /// # Errors
    ///
    /// Returns `CourseError::EmptyCategory` if the tag is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, CourseError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CourseError::EmptyCategory);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl CourseLevel {
    pub const ALL: [CourseLevel; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CourseLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(ParseLevelError(other.to_string())),
        }
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated input from the course creation form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDraft {
    pub title: String,
    pub description: String,
    pub is_published: bool,
    pub is_extra: bool,
    pub is_featured: bool,
    pub category: Option<String>,
    pub level: Option<CourseLevel>,
    pub duration_minutes: Option<u32>,
}

impl Default for CourseDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            is_published: true,
            is_extra: false,
            is_featured: false,
            category: None,
            level: None,
            duration_minutes: None,
        }
    }
}

impl CourseDraft {
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Check the draft without consuming it.
    ///
    /// # Errors
    ///
    /// Returns `CourseError::EmptyTitle` for a blank title, or
    /// `CourseError::EmptyCategory` for a blank category tag.
    pub fn check(&self) -> Result<(), CourseError> {
        if self.title.trim().is_empty() {
            return Err(CourseError::EmptyTitle);
        }
        if let Some(category) = &self.category {
            CourseCategory::new(category.as_str())?;
        }
        Ok(())
    }

    /// Validate into a course ready to be inserted.
    ///
    /// # Errors
    ///
    /// Same as [`CourseDraft::check`].
    pub fn validate(self, created_by: UserId, created_at: DateTime<Utc>) -> Result<NewCourse, CourseError> {
        self.check()?;
        let category = self.category.map(CourseCategory::new).transpose()?;
        Ok(NewCourse {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category,
            level: self.level,
            duration_minutes: self.duration_minutes,
            is_featured: self.is_featured,
            is_extra: self.is_extra,
            is_published: self.is_published,
            created_by,
            created_at,
        })
    }
}

/// A validated course that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub category: Option<CourseCategory>,
    pub level: Option<CourseLevel>,
    pub duration_minutes: Option<u32>,
    pub is_featured: bool,
    pub is_extra: bool,
    pub is_published: bool,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl NewCourse {
    /// Attach the id assigned by storage.
    #[must_use]
    pub fn into_course(self, id: CourseId) -> Course {
        Course {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
            level: self.level,
            duration_minutes: self.duration_minutes,
            is_featured: self.is_featured,
            is_extra: self.is_extra,
            is_published: self.is_published,
            created_by: self.created_by,
            created_at: self.created_at,
        }
    }
}

//
// ─── COURSE ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Course {
    id: CourseId,
    title: String,
    description: String,
    category: Option<CourseCategory>,
    level: Option<CourseLevel>,
    duration_minutes: Option<u32>,
    is_featured: bool,
    is_extra: bool,
    is_published: bool,
    created_by: UserId,
    created_at: DateTime<Utc>,
}

impl Course {
    /// Rebuild a course from persisted fields.
    ///
    /// # Errors
    ///
    /// Returns `CourseError::EmptyTitle` if the stored title is blank.
    #[allow(clippy::too_many_arguments, clippy::fn_params_excessive_bools)]
    pub fn from_persisted(
        id: CourseId,
        title: String,
        description: String,
        category: Option<CourseCategory>,
        level: Option<CourseLevel>,
        duration_minutes: Option<u32>,
        is_featured: bool,
        is_extra: bool,
        is_published: bool,
        created_by: UserId,
        created_at: DateTime<Utc>,
    ) -> Result<Self, CourseError> {
        if title.trim().is_empty() {
            return Err(CourseError::EmptyTitle);
        }
        Ok(Self {
            id,
            title,
            description,
            category,
            level,
            duration_minutes,
            is_featured,
            is_extra,
            is_published,
            created_by,
            created_at,
        })
    }

    #[must_use]
    pub fn id(&self) -> CourseId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn category(&self) -> Option<&CourseCategory> {
        self.category.as_ref()
    }

    #[must_use]
    pub fn level(&self) -> Option<CourseLevel> {
        self.level
    }

    #[must_use]
    pub fn duration_minutes(&self) -> Option<u32> {
        self.duration_minutes
    }

    #[must_use]
    pub fn is_featured(&self) -> bool {
        self.is_featured
    }

    #[must_use]
    pub fn is_extra(&self) -> bool {
        self.is_extra
    }

    #[must_use]
    pub fn is_published(&self) -> bool {
        self.is_published
    }

    #[must_use]
    pub fn created_by(&self) -> UserId {
        self.created_by
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Catalog listing order: featured first, then oldest first, then by id.
    #[must_use]
    pub fn catalog_order(&self, other: &Self) -> std::cmp::Ordering {
        other
            .is_featured
            .cmp(&self.is_featured)
            .then_with(|| self.created_at.cmp(&other.created_at))
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl AsRef<Course> for Course {
    fn as_ref(&self) -> &Course {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn draft_defaults_match_creation_form() {
        let draft = CourseDraft::default();
        assert!(draft.is_published);
        assert!(!draft.is_extra);
        assert!(!draft.is_featured);
    }

    #[test]
    fn blank_title_is_rejected() {
        let draft = CourseDraft::new("   ", "desc");
        assert_eq!(draft.check(), Err(CourseError::EmptyTitle));
        assert_eq!(
            draft.validate(UserId::random(), fixed_now()).unwrap_err(),
            CourseError::EmptyTitle
        );
    }

    #[test]
    fn validate_trims_and_parses_category() {
        let mut draft = CourseDraft::new("  Editing 101 ", " Learn cuts ");
        draft.category = Some(" monetizacao ".to_string());
        let creator = UserId::random();
        let course = draft.validate(creator, fixed_now()).unwrap();
        assert_eq!(course.title, "Editing 101");
        assert_eq!(course.description, "Learn cuts");
        assert_eq!(course.category.as_ref().map(CourseCategory::as_str), Some("monetizacao"));
        assert_eq!(course.created_by, creator);
    }

    #[test]
    fn blank_category_is_rejected() {
        let mut draft = CourseDraft::new("Title", "");
        draft.category = Some("  ".into());
        assert_eq!(draft.check(), Err(CourseError::EmptyCategory));
    }

    #[test]
    fn level_round_trips_through_str() {
        for level in CourseLevel::ALL {
            assert_eq!(level.as_str().parse::<CourseLevel>().unwrap(), level);
        }
        assert!("expert".parse::<CourseLevel>().is_err());
    }

    #[test]
    fn catalog_order_puts_featured_first_then_oldest() {
        let creator = UserId::random();
        let now = fixed_now();
        let make = |id: u64, featured: bool, offset_hours: i64| {
            let mut draft = CourseDraft::new(format!("Course {id}"), "");
            draft.is_featured = featured;
            draft
                .validate(creator, now + chrono::Duration::hours(offset_hours))
                .unwrap()
                .into_course(CourseId::new(id))
        };
        let mut courses = vec![make(1, false, 0), make(2, true, 5), make(3, true, 1)];
        courses.sort_by(Course::catalog_order);
        let ids: Vec<u64> = courses.iter().map(|c| c.id().value()).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }
}
