use async_trait::async_trait;
use chrono::{DateTime, Utc};
use academy_core::model::{
    CompletionRecord, Course, CourseId, Lesson, LessonCompletion, LessonId, LessonRef, NewCourse,
    Profile, ProfileUpdate, Role, UserId,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Course reads and the creation write.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Insert a validated course and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the course cannot be stored.
    async fn insert_new_course(&self, course: &NewCourse) -> Result<Course, StorageError>;

    /// Fetch a course by ID. Returns `Ok(None)` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on adapter failures.
    async fn get_course(&self, id: CourseId) -> Result<Option<Course>, StorageError>;

    /// Published courses only, featured first, then oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on adapter failures.
    async fn list_published_courses(&self) -> Result<Vec<Course>, StorageError>;
}

#[async_trait]
pub trait LessonRepository: Send + Sync {
    /// Persist or update a lesson.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the course is missing, and
    /// `StorageError::Conflict` if another lesson of the course already uses
    /// the same `order_index`.
    async fn upsert_lesson(&self, lesson: &Lesson) -> Result<(), StorageError>;

    /// Roster of every lesson: `(lesson id, course id)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on adapter failures.
    async fn list_lessons(&self) -> Result<Vec<LessonRef>, StorageError>;

    /// Lessons of one course ordered by `order_index`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on adapter failures.
    async fn list_course_lessons(&self, course_id: CourseId) -> Result<Vec<Lesson>, StorageError>;
}

#[async_trait]
pub trait CompletionRepository: Send + Sync {
    /// Completion markers for one user.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on adapter failures.
    async fn list_completions(&self, user_id: UserId) -> Result<Vec<LessonCompletion>, StorageError>;

    /// Mark a lesson completed. Re-marking keeps the original timestamp.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the lesson does not exist.
    async fn mark_complete(
        &self,
        user_id: UserId,
        lesson_id: LessonId,
        at: DateTime<Utc>,
    ) -> Result<(), StorageError>;
}

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Persist or replace a profile.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the profile cannot be stored.
    async fn upsert_profile(&self, profile: &Profile) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on adapter failures.
    async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>, StorageError>;

    /// Apply a profile edit.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the user has no profile.
    async fn update_profile(
        &self,
        user_id: UserId,
        update: &ProfileUpdate,
    ) -> Result<Profile, StorageError>;

    /// All profiles ordered by creation time.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on adapter failures.
    async fn list_profiles(&self) -> Result<Vec<Profile>, StorageError>;
}

#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` on adapter failures.
    async fn get_role(&self, user_id: UserId) -> Result<Option<Role>, StorageError>;

    /// Assign a role, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the user has no profile.
    async fn set_role(&self, user_id: UserId, role: Role) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on adapter failures.
    async fn list_roles(&self) -> Result<Vec<(UserId, Role)>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    courses: Arc<Mutex<BTreeMap<CourseId, Course>>>,
    lessons: Arc<Mutex<BTreeMap<LessonId, Lesson>>>,
    completions: Arc<Mutex<HashMap<(UserId, LessonId), CompletionRecord>>>,
    profiles: Arc<Mutex<HashMap<UserId, Profile>>>,
    roles: Arc<Mutex<HashMap<UserId, Role>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StorageError> {
    mutex
        .lock()
        .map_err(|e| StorageError::Connection(e.to_string()))
}

#[async_trait]
impl CourseRepository for InMemoryRepository {
    async fn insert_new_course(&self, course: &NewCourse) -> Result<Course, StorageError> {
        let mut guard = lock(&self.courses)?;
        let next = guard.keys().next_back().map_or(1, |id| id.value() + 1);
        let stored = course.clone().into_course(CourseId::new(next));
        guard.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn get_course(&self, id: CourseId) -> Result<Option<Course>, StorageError> {
        let guard = lock(&self.courses)?;
        Ok(guard.get(&id).cloned())
    }

    async fn list_published_courses(&self) -> Result<Vec<Course>, StorageError> {
        let guard = lock(&self.courses)?;
        let mut courses: Vec<Course> = guard
            .values()
            .filter(|course| course.is_published())
            .cloned()
            .collect();
        courses.sort_by(Course::catalog_order);
        Ok(courses)
    }
}

#[async_trait]
impl LessonRepository for InMemoryRepository {
    async fn upsert_lesson(&self, lesson: &Lesson) -> Result<(), StorageError> {
        if !lock(&self.courses)?.contains_key(&lesson.course_id()) {
            return Err(StorageError::NotFound);
        }
        let mut guard = lock(&self.lessons)?;
        let clash = guard.values().any(|other| {
            other.id() != lesson.id()
                && other.course_id() == lesson.course_id()
                && other.order_index() == lesson.order_index()
        });
        if clash {
            return Err(StorageError::Conflict);
        }
        guard.insert(lesson.id(), lesson.clone());
        Ok(())
    }

    async fn list_lessons(&self) -> Result<Vec<LessonRef>, StorageError> {
        let guard = lock(&self.lessons)?;
        Ok(guard.values().map(Lesson::roster_entry).collect())
    }

    async fn list_course_lessons(&self, course_id: CourseId) -> Result<Vec<Lesson>, StorageError> {
        let guard = lock(&self.lessons)?;
        let mut lessons: Vec<Lesson> = guard
            .values()
            .filter(|lesson| lesson.course_id() == course_id)
            .cloned()
            .collect();
        lessons.sort_by_key(Lesson::order_index);
        Ok(lessons)
    }
}

#[async_trait]
impl CompletionRepository for InMemoryRepository {
    async fn list_completions(&self, user_id: UserId) -> Result<Vec<LessonCompletion>, StorageError> {
        let guard = lock(&self.completions)?;
        let mut completions: Vec<LessonCompletion> = guard
            .values()
            .filter(|record| record.user_id == user_id)
            .map(CompletionRecord::lesson_completion)
            .collect();
        completions.sort_by_key(|c| c.lesson_id);
        Ok(completions)
    }

    async fn mark_complete(
        &self,
        user_id: UserId,
        lesson_id: LessonId,
        at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        if !lock(&self.lessons)?.contains_key(&lesson_id) {
            return Err(StorageError::NotFound);
        }
        let mut guard = lock(&self.completions)?;
        let record = guard
            .entry((user_id, lesson_id))
            .or_insert_with(|| CompletionRecord::completed(user_id, lesson_id, at));
        if !record.completed {
            record.completed = true;
            record.completed_at = Some(at);
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryRepository {
    async fn upsert_profile(&self, profile: &Profile) -> Result<(), StorageError> {
        let mut guard = lock(&self.profiles)?;
        guard.insert(profile.user_id, profile.clone());
        Ok(())
    }

    async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>, StorageError> {
        let guard = lock(&self.profiles)?;
        Ok(guard.get(&user_id).cloned())
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        update: &ProfileUpdate,
    ) -> Result<Profile, StorageError> {
        let mut guard = lock(&self.profiles)?;
        let profile = guard.get_mut(&user_id).ok_or(StorageError::NotFound)?;
        *profile = profile.apply(update);
        Ok(profile.clone())
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, StorageError> {
        let guard = lock(&self.profiles)?;
        let mut profiles: Vec<Profile> = guard.values().cloned().collect();
        profiles.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });
        Ok(profiles)
    }
}

#[async_trait]
impl RoleRepository for InMemoryRepository {
    async fn get_role(&self, user_id: UserId) -> Result<Option<Role>, StorageError> {
        let guard = lock(&self.roles)?;
        Ok(guard.get(&user_id).copied())
    }

    async fn set_role(&self, user_id: UserId, role: Role) -> Result<(), StorageError> {
        if !lock(&self.profiles)?.contains_key(&user_id) {
            return Err(StorageError::NotFound);
        }
        let mut guard = lock(&self.roles)?;
        guard.insert(user_id, role);
        Ok(())
    }

    async fn list_roles(&self) -> Result<Vec<(UserId, Role)>, StorageError> {
        let guard = lock(&self.roles)?;
        let mut roles: Vec<(UserId, Role)> = guard.iter().map(|(id, role)| (*id, *role)).collect();
        roles.sort_by_key(|(id, _)| *id);
        Ok(roles)
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub courses: Arc<dyn CourseRepository>,
    pub lessons: Arc<dyn LessonRepository>,
    pub completions: Arc<dyn CompletionRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub roles: Arc<dyn RoleRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_repository(InMemoryRepository::new())
    }

    /// Expose one adapter through every repository seam.
    #[must_use]
    pub fn from_repository<R>(repo: R) -> Self
    where
        R: CourseRepository
            + LessonRepository
            + CompletionRepository
            + ProfileRepository
            + RoleRepository
            + Clone
            + 'static,
    {
        Self {
            courses: Arc::new(repo.clone()),
            lessons: Arc::new(repo.clone()),
            completions: Arc::new(repo.clone()),
            profiles: Arc::new(repo.clone()),
            roles: Arc::new(repo),
        }
    }
}
