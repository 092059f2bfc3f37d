use std::sync::Arc;

use academy_core::model::UserId;
use storage::repository::Storage;

use crate::Clock;
use crate::catalog_service::CatalogService;
use crate::course_service::CourseService;
use crate::error::AppServicesError;
use crate::profile_service::ProfileService;
use crate::progress_service::ProgressService;
use crate::session::{SessionProvider, StoredSessionProvider};
use crate::user_admin_service::UserAdminService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    session: Arc<dyn SessionProvider>,
    catalog: Arc<CatalogService>,
    courses: Arc<CourseService>,
    progress: Arc<ProgressService>,
    profiles: Arc<ProfileService>,
    user_admin: Arc<UserAdminService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage, signed in as `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        user_id: Option<UserId>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock, user_id))
    }

    /// Build services over in-memory storage.
    #[must_use]
    pub fn in_memory(clock: Clock, user_id: Option<UserId>) -> Self {
        Self::from_storage(&Storage::in_memory(), clock, user_id)
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock, user_id: Option<UserId>) -> Self {
        let session = StoredSessionProvider::new(
            user_id,
            Arc::clone(&storage.profiles),
            Arc::clone(&storage.roles),
        );
        Self::with_session(storage, clock, Arc::new(session))
    }

    /// Same wiring with a caller-supplied session source.
    #[must_use]
    pub fn with_session(
        storage: &Storage,
        clock: Clock,
        session: Arc<dyn SessionProvider>,
    ) -> Self {
        let catalog = Arc::new(CatalogService::new(
            Arc::clone(&storage.courses),
            Arc::clone(&storage.lessons),
            Arc::clone(&storage.completions),
        ));
        let courses = Arc::new(CourseService::new(
            clock,
            Arc::clone(&storage.courses),
            Arc::clone(&storage.roles),
        ));
        let progress = Arc::new(ProgressService::new(
            clock,
            Arc::clone(&storage.courses),
            Arc::clone(&storage.lessons),
            Arc::clone(&storage.completions),
        ));
        let profiles = Arc::new(ProfileService::new(Arc::clone(&storage.profiles)));
        let user_admin = Arc::new(UserAdminService::new(
            Arc::clone(&storage.profiles),
            Arc::clone(&storage.roles),
        ));

        Self {
            session,
            catalog,
            courses,
            progress,
            profiles,
            user_admin,
        }
    }

    #[must_use]
    pub fn session(&self) -> Arc<dyn SessionProvider> {
        Arc::clone(&self.session)
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn courses(&self) -> Arc<CourseService> {
        Arc::clone(&self.courses)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn profiles(&self) -> Arc<ProfileService> {
        Arc::clone(&self.profiles)
    }

    #[must_use]
    pub fn user_admin(&self) -> Arc<UserAdminService> {
        Arc::clone(&self.user_admin)
    }
}
