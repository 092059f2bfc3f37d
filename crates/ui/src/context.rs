use std::sync::Arc;

use academy_core::model::UserSession;
use dioxus::prelude::*;
use services::{
    CatalogService, CourseService, ProfileService, ProgressService, SessionProvider,
    UserAdminService,
};

pub trait UiApp: Send + Sync {
    fn session_provider(&self) -> Arc<dyn SessionProvider>;

    fn catalog(&self) -> Arc<CatalogService>;
    fn courses(&self) -> Arc<CourseService>;
    fn progress(&self) -> Arc<ProgressService>;
    fn profiles(&self) -> Arc<ProfileService>;
    fn user_admin(&self) -> Arc<UserAdminService>;
}

#[derive(Clone)]
pub struct AppContext {
    session_provider: Arc<dyn SessionProvider>,
    catalog: Arc<CatalogService>,
    courses: Arc<CourseService>,
    progress: Arc<ProgressService>,
    profiles: Arc<ProfileService>,
    user_admin: Arc<UserAdminService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            session_provider: app.session_provider(),
            catalog: app.catalog(),
            courses: app.courses(),
            progress: app.progress(),
            profiles: app.profiles(),
            user_admin: app.user_admin(),
        }
    }

    #[must_use]
    pub fn session_provider(&self) -> Arc<dyn SessionProvider> {
        Arc::clone(&self.session_provider)
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

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

/// The signed-in user, shared with every view below the layout.
#[derive(Clone, Copy, PartialEq)]
pub struct CurrentSession(Signal<Option<UserSession>>);

impl CurrentSession {
    #[must_use]
    pub fn new(session: Option<UserSession>) -> Self {
        Self(Signal::new(session))
    }

    /// Read the session, subscribing the calling component to changes.
    #[must_use]
    pub fn get(&self) -> Option<UserSession> {
        *self.0.read()
    }

    pub fn set(&mut self, session: Option<UserSession>) {
        self.0.set(session);
    }

    /// Resolve the session again, e.g. after the user's role changed.
    /// A failed read keeps the current value.
    pub async fn refresh(mut self, provider: Arc<dyn SessionProvider>) {
        match provider.current_session().await {
            Ok(session) => self.set(session),
            Err(err) => tracing::warn!(error = %err, "failed to refresh session"),
        }
    }
}
